// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filesystem-safe path components for package files written to disk.

/// Name used when nothing usable survives sanitization.
const FALLBACK_COMPONENT: &str = "fara_template";

/// Produce a filesystem-safe path component.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Ü" → "U").
/// - Keep ASCII alphanumerics plus `-`, `_`, and `.`; everything else becomes `_`.
/// - Collapse runs of `_` and `.`; drop `_` directly before a dot; trim leading
///   dots/underscores and trailing dots.
/// - Fall back to `fara_template` for empty or dot-only names, keeping the
///   extension when nothing precedes it.
/// - Suffix Windows reserved device names (`CON`, `LPT1`, ...) with `_`.
///
/// Path separators never survive, so the result cannot leave its directory.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = collapse_runs(transliterated.chars().map(|ch| {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            ch
        } else {
            '_'
        }
    }));

    while let Some(pos) = out.find("_.") {
        out.remove(pos);
    }
    while out.ends_with('.') || out.ends_with(' ') {
        out.pop();
    }
    // Leading dots would hide the file on Unix.
    let trimmed = out.trim_start_matches(['.', '_']);
    if trimmed.is_empty() {
        return FALLBACK_COMPONENT.to_string();
    }
    // Only an extension is left (e.g. "_.fara"): give it a stem.
    if out[..out.len() - trimmed.len()].ends_with('.') && !trimmed.contains('.') {
        return format!("{FALLBACK_COMPONENT}.{trimmed}");
    }
    let out = trimmed.to_string();

    let (basename, ext) = match out.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, Some(ext)),
        _ => (out.as_str(), None),
    };

    if is_reserved_device_name(basename) {
        return match ext {
            Some(ext) => format!("{basename}_.{ext}"),
            None => format!("{basename}_"),
        };
    }

    out
}

/// Keep one character from each run of `_` or `.`.
fn collapse_runs(chars: impl Iterator<Item = char>) -> String {
    let mut out = String::new();
    let mut last: Option<char> = None;
    for ch in chars {
        if matches!(ch, '_' | '.') && last == Some(ch) {
            continue;
        }
        out.push(ch);
        last = Some(ch);
    }
    out
}

fn is_reserved_device_name(basename: &str) -> bool {
    let upper = basename.to_ascii_uppercase();
    match upper.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        other => {
            let numbered = other
                .strip_prefix("COM")
                .or_else(|| other.strip_prefix("LPT"));
            matches!(numbered.map(str::as_bytes), Some([b'1'..=b'9']))
        }
    }
}
