//! Host-computed CSS, passed through with token references renamed.
//!
//! The host renders bound tokens in its computed CSS as
//! `var(--Raw-Name, fallback)`. The fallback is dropped and the raw name is
//! normalized, so the output refers to the custom properties this crate emits.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::normalize::normalize;
use crate::scene::SceneNode;

/// `var(name, fallback)`, where the fallback may contain one call such as
/// `rgb(...)`.
static VAR_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\(([^)(]*?),([^)(]*?)(\(.*?\))?\)").expect("var() pattern is valid")
});

/// Rewrites every `var(name, fallback)` in `value` to `var(<normalized name>)`.
///
/// ```rust
/// use varsheet::rewrite_var_references;
///
/// assert_eq!(
///     rewrite_var_references("1px solid var(--Color/Border, rgb(0, 0, 0))"),
///     "1px solid var(--border)"
/// );
/// ```
pub fn rewrite_var_references(value: &str) -> String {
    VAR_REFERENCE
        .replace_all(value, |caps: &Captures| {
            let raw = caps[1].replace("--", "");
            format!("var({})", normalize(&raw))
        })
        .into_owned()
}

/// Renders the node's computed CSS as `property: value;` lines, in host
/// order, joined by newlines.
pub fn passthrough_css(node: &SceneNode) -> String {
    node.css
        .iter()
        .map(|(property, value)| format!("{}: {};", property, rewrite_var_references(value)))
        .collect::<Vec<_>>()
        .join("\n")
}
