//! Token name normalization.
//!
//! Maps a hierarchical token name such as `Color/Primary/On-Surface` onto a CSS
//! custom-property identifier such as `--on-surface`.
//!
//! # Rules
//!
//! Applied in order, each on the output of the previous one:
//!
//! 1. Lower-case the whole name.
//! 2. Replace `/` and spaces with `-`.
//! 3. Remove `&`, `(` and `)`.
//! 4. Collapse `--` into `-` (one non-overlapping pass).
//! 5. Remove every `styles-` occurrence.
//! 6. State-on-color contraction: `<prefix>-on-<suffix>` becomes
//!    `on-<suffix>`, where `<suffix>` follows the *last* `-on-`. Names
//!    containing `-integration-` are left alone.
//! 7. Drop a leading `color` segment when more segments follow.
//! 8. Prefix with `--`.
//!
//! The contraction runs on the whole string before it is split, so
//! `color-primary-on-surface` loses `color-primary` to rule 6 and rule 7 has
//! nothing left to drop.
//!
//! Normalization is a single-pass function. Feeding an already normalized
//! name back in is not an identity (the leading `--` gets collapsed), so
//! callers never re-apply it.

/// Normalizes a token name into a CSS custom-property identifier.
///
/// # Example
///
/// ```rust
/// use varsheet::normalize;
///
/// assert_eq!(normalize("Color/Primary/On-Surface"), "--on-surface");
/// assert_eq!(normalize("Size/Font-weight (Bold)"), "--size-font-weight-bold");
/// assert_eq!(normalize("Color/Accent"), "--accent");
/// ```
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '&' | '(' | ')'))
        .map(|c| if c == '/' || c == ' ' { '-' } else { c })
        .collect();
    let mut name = cleaned.replace("--", "-").replace("styles-", "");

    if let Some(suffix) = on_color_suffix(&name) {
        name = format!("on-{}", suffix);
    }

    let mut parts: Vec<&str> = name.split('-').collect();
    if parts.len() > 1 && parts[0] == "color" {
        parts.remove(0);
    }

    format!("--{}", parts.join("-"))
}

/// Normalizes a name and strips the `--` prefix.
///
/// This is the bare identifier used in the variable map report.
pub fn normalize_bare(raw: &str) -> String {
    let name = normalize(raw);
    match name.strip_prefix("--") {
        Some(bare) => bare.to_string(),
        None => name,
    }
}

/// Returns the text after the last `-on-`, unless the name is an
/// `-integration-` name.
fn on_color_suffix(name: &str) -> Option<&str> {
    if name.contains("-integration-") {
        return None;
    }
    name.rfind("-on-").map(|pos| &name[pos + "-on-".len()..])
}
