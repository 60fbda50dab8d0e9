//! Token values to CSS literals.
//!
//! The formatter turns one token value into one custom-property declaration.
//! It branches on the payload type:
//!
//! | Value | CSS |
//! |-------|-----|
//! | Number, name contains `font-weight` | bare number: `400` |
//! | Number, any other name | pixels: `8px`, `0px` |
//! | String | single-quoted, font slugs replaced: `'Noto Sans'` |
//! | Color, opaque | `rgb(R, G, B)` |
//! | Color, translucent | `rgb(R, G, B, A)`, alpha not rescaled |
//! | Alias | `var(--target-name)` |
//! | Boolean | not renderable, skipped with an issue |
//!
//! Aliases reaching the formatter are kept as late-bound `var()` references
//! with a single token lookup. Flattening an alias to a literal is the job of
//! the [`AliasResolver`](crate::AliasResolver), used for palette tokens.
//!
//! A color with a non-finite channel is corrupt source data and fails the
//! whole run with [`GenerateError::MalformedValue`].

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{GenerateError, Issue};
use crate::model::{Color, TokenValue};
use crate::normalize::normalize;
use crate::store::{CachedStore, TokenStore};

/// One `name: value;` custom-property declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    /// Renders as an indented line without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {};", self.name, self.value)
    }
}

/// Outcome of formatting one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted {
    Line(Declaration),
    Skip(Issue),
}

/// Formats an RGBA color as a CSS `rgb()` literal.
///
/// Channels are scaled to 8 bits and rounded to nearest. A translucent color
/// gets a fourth argument carrying the original fractional alpha. Returns
/// `None` when any channel is not finite.
///
/// # Example
///
/// ```rust
/// use varsheet::{color_to_css, Color};
///
/// assert_eq!(color_to_css(&Color::rgb(1.0, 0.5, 0.0)).as_deref(), Some("rgb(255, 128, 0)"));
/// assert_eq!(
///     color_to_css(&Color::rgba(0.0, 0.0, 0.0, 0.55)).as_deref(),
///     Some("rgb(0, 0, 0, 0.55)")
/// );
/// assert_eq!(color_to_css(&Color::rgb(f64::NAN, 0.0, 0.0)), None);
/// ```
pub fn color_to_css(color: &Color) -> Option<String> {
    let channels = [color.r, color.g, color.b, color.a];
    if !channels.iter().all(|c| c.is_finite()) {
        return None;
    }

    let (r, g, b) = (to_byte(color.r), to_byte(color.g), to_byte(color.b));
    if color.a < 1.0 {
        Some(format!("rgb({}, {}, {}, {})", r, g, b, color.a))
    } else {
        Some(format!("rgb({}, {}, {})", r, g, b))
    }
}

fn to_byte(channel: f64) -> i64 {
    (channel * 255.0).round() as i64
}

/// Formats a number for the property `css_name`.
///
/// Font weights are unitless; everything else is in pixels, zero included.
pub fn number_to_css(value: f64, css_name: &str) -> String {
    // Avoid printing "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    if css_name.contains("font-weight") {
        value.to_string()
    } else {
        format!("{}px", value)
    }
}

/// Formats token values into declarations.
pub struct ValueFormatter<'a, S> {
    store: &'a CachedStore<S>,
    font_names: &'a BTreeMap<String, String>,
}

impl<'a, S: TokenStore> ValueFormatter<'a, S> {
    pub fn new(store: &'a CachedStore<S>, font_names: &'a BTreeMap<String, String>) -> Self {
        Self { store, font_names }
    }

    /// Formats `value` of the token named `token` as the property `css_name`.
    ///
    /// Aliases become `var()` references to the normalized target name; a
    /// target missing from the store yields [`Issue::MissingReference`].
    pub async fn format(
        &self,
        token: &str,
        css_name: &str,
        value: &TokenValue,
    ) -> Result<Formatted, GenerateError> {
        let target_id = match value {
            TokenValue::Alias(id) => id,
            terminal => return self.literal(token, css_name, terminal),
        };

        match self.store.token(target_id).await? {
            Some(target) => Ok(Formatted::Line(Declaration::new(
                css_name,
                format!("var({})", normalize(&target.name)),
            ))),
            None => Ok(Formatted::Skip(Issue::MissingReference {
                token: token.to_string(),
                target: target_id.clone(),
            })),
        }
    }

    /// Formats a terminal value. Aliases are reported as unsupported here;
    /// use [`format`](Self::format) or resolve them first.
    pub fn literal(
        &self,
        token: &str,
        css_name: &str,
        value: &TokenValue,
    ) -> Result<Formatted, GenerateError> {
        let css = match value {
            TokenValue::Number(n) if !n.is_finite() => {
                return Err(GenerateError::MalformedValue {
                    token: token.to_string(),
                    message: format!("non-finite number {}", n),
                });
            }
            TokenValue::Number(n) => number_to_css(*n, css_name),
            TokenValue::String(s) => {
                let display = self.font_names.get(s).unwrap_or(s);
                format!("'{}'", display)
            }
            TokenValue::Color(color) => {
                color_to_css(color).ok_or_else(|| GenerateError::MalformedValue {
                    token: token.to_string(),
                    message: format!("non-finite color channel in {:?}", color),
                })?
            }
            TokenValue::Boolean(_) | TokenValue::Alias(_) => {
                return Ok(Formatted::Skip(Issue::Unsupported {
                    token: token.to_string(),
                    kind: value.kind(),
                }));
            }
        };
        Ok(Formatted::Line(Declaration::new(css_name, css)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::model::Token;
    use crate::store::MemoryStore;

    fn fixture() -> (CachedStore<MemoryStore>, BTreeMap<String, String>) {
        let store = CachedStore::new(
            MemoryStore::new()
                .with_token(Token::new("t-gap", "Size/Gap Large", "c1").value("m", 8.0)),
        );
        (store, GeneratorConfig::default().font_names)
    }

    fn line(formatted: Formatted) -> String {
        match formatted {
            Formatted::Line(decl) => decl.to_string(),
            Formatted::Skip(issue) => panic!("Expected a line, got {issue:?}"),
        }
    }

    #[test]
    fn test_declaration_display() {
        assert_eq!(Declaration::new("--gap", "8px").to_string(), "  --gap: 8px;");
    }

    #[test]
    fn test_color_opaque() {
        assert_eq!(
            color_to_css(&Color::rgb(0.2, 0.4, 0.6)).as_deref(),
            Some("rgb(51, 102, 153)")
        );
    }

    #[test]
    fn test_color_translucent_keeps_fractional_alpha() {
        assert_eq!(
            color_to_css(&Color::rgba(1.0, 1.0, 1.0, 0.125)).as_deref(),
            Some("rgb(255, 255, 255, 0.125)")
        );
    }

    #[test]
    fn test_color_rounds_to_nearest() {
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(
            color_to_css(&Color::rgb(0.5, 0.001, 0.999)).as_deref(),
            Some("rgb(128, 0, 255)")
        );
    }

    #[test]
    fn test_color_channel_anchors() {
        assert_eq!(
            color_to_css(&Color::rgb(0.0, 1.0, 0.5)).as_deref(),
            Some("rgb(0, 255, 128)")
        );
    }

    #[test]
    fn test_color_non_finite() {
        assert_eq!(color_to_css(&Color::rgba(0.0, 0.0, 0.0, f64::NAN)), None);
        assert_eq!(color_to_css(&Color::rgb(0.0, f64::INFINITY, 0.0)), None);
    }

    #[test]
    fn test_number_units() {
        assert_eq!(number_to_css(400.0, "--font-weight-regular"), "400");
        assert_eq!(number_to_css(8.0, "--size-gap"), "8px");
        assert_eq!(number_to_css(1.5, "--line"), "1.5px");
        assert_eq!(number_to_css(0.0, "--radius"), "0px");
        assert_eq!(number_to_css(-0.0, "--radius"), "0px");
    }

    #[test]
    fn test_literal_string_font_substitution() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let out = formatter
            .literal("Font/Family", "--font-family", &"noto-sans".into())
            .unwrap();
        assert_eq!(line(out), "  --font-family: 'Noto Sans';");

        let out = formatter
            .literal("Font/Family", "--font-family", &"Inter".into())
            .unwrap();
        assert_eq!(line(out), "  --font-family: 'Inter';");
    }

    #[test]
    fn test_literal_boolean_is_skipped() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let out = formatter
            .literal("Flag", "--flag", &TokenValue::Boolean(true))
            .unwrap();
        assert_eq!(
            out,
            Formatted::Skip(Issue::Unsupported {
                token: "Flag".into(),
                kind: "boolean",
            })
        );
    }

    #[test]
    fn test_literal_nan_color_is_fatal() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let err = formatter
            .literal("Broken", "--broken", &Color::rgb(f64::NAN, 0.0, 0.0).into())
            .unwrap_err();
        assert!(matches!(err, GenerateError::MalformedValue { .. }));
    }

    #[tokio::test]
    async fn test_format_alias_as_var_reference() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let out = formatter
            .format("Button/Gap", "--button-gap", &TokenValue::alias("t-gap"))
            .await
            .unwrap();
        assert_eq!(line(out), "  --button-gap: var(--size-gap-large);");
    }

    #[tokio::test]
    async fn test_format_alias_missing_target() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let out = formatter
            .format("Button/Gap", "--button-gap", &TokenValue::alias("gone"))
            .await
            .unwrap();
        assert!(matches!(out, Formatted::Skip(Issue::MissingReference { .. })));
    }

    #[tokio::test]
    async fn test_format_number_by_name() {
        let (store, fonts) = fixture();
        let formatter = ValueFormatter::new(&store, &fonts);
        let weight = formatter
            .format("Type/Font-weight", "--type-font-weight", &400.0.into())
            .await
            .unwrap();
        assert_eq!(line(weight), "  --type-font-weight: 400;");

        let size = formatter
            .format("Type/Size", "--type-size", &8.0.into())
            .await
            .unwrap();
        assert_eq!(line(size), "  --type-size: 8px;");
    }
}
