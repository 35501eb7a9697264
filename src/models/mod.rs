// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: template records and the package manifest.

pub mod manifest;
pub mod template;
