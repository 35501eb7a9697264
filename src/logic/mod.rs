// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Package logic: byte transform, zip container, codec and file exchange.

pub mod codec;
pub mod container;
pub mod exchange;
pub mod transform;
