//! CSS emission.
//!
//! The emitter walks collections, modes and tokens and produces CSS rule
//! blocks. It does not build one growing string: every step returns an
//! immutable [`Fragment`] (rule blocks or declarations, plus the issues met on
//! the way), and [`Emitter::css_variables`] composes them in a fixed order.
//!
//! ## Output sections
//!
//! The `cssvariables` stylesheet is, in cascade order:
//!
//! 1. One class block per mode of each switchable collection
//!    (`.obc-component-size-regular { ... }`).
//! 2. A `*` block holding every pinned collection's declarations followed by
//!    the static shared block (composite shadows).
//! 3. One `:root[data-theme='<mode>']` block per palette mode. The default
//!    theme also matches plain `:root`.
//! 4. The static trailer (blink animation).
//!
//! ## Two value paths
//!
//! Palette tokens are flattened to literals through the
//! [`AliasResolver`](crate::AliasResolver). Switchable and pinned tokens keep
//! their aliases as `var()` references so sizes stay late-bound.

mod palette;
mod passthrough;
mod sizes;

pub use passthrough::{passthrough_css, rewrite_var_references};

use std::collections::HashMap;
use std::fmt;

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, Issue};
use crate::format::{Declaration, Formatted, ValueFormatter};
use crate::mode::ModeSelector;
use crate::model::{Collection, Token};
use crate::store::{CachedStore, TokenStore};

/// A line inside a rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLine {
    Declaration(Declaration),
    /// Static text copied verbatim (trailing whitespace trimmed).
    Raw(String),
}

/// A CSS rule: selector list and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    pub selectors: Vec<String>,
    pub lines: Vec<RuleLine>,
}

impl RuleBlock {
    pub fn new(selectors: Vec<String>) -> Self {
        Self {
            selectors,
            lines: Vec::new(),
        }
    }

    pub fn declaration(&mut self, declaration: Declaration) {
        self.lines.push(RuleLine::Declaration(declaration));
    }

    pub fn raw(&mut self, text: impl Into<String>) {
        self.lines.push(RuleLine::Raw(text.into()));
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selectors.join(", "))?;
        for line in &self.lines {
            match line {
                RuleLine::Declaration(decl) => writeln!(f, "{}", decl)?,
                RuleLine::Raw(text) => {
                    let text = text.trim_end();
                    if !text.is_empty() {
                        writeln!(f, "{}", text)?;
                    }
                }
            }
        }
        writeln!(f, "}}")
    }
}

/// Items produced by one emission step, plus the issues it recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<T> {
    pub items: Vec<T>,
    pub issues: Vec<Issue>,
}

impl<T> Default for Fragment<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issues: Vec::new(),
        }
    }
}

impl<T> Fragment<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Records a recovered failure. The affected item is simply not pushed.
    pub fn skip(&mut self, issue: Issue) {
        tracing::warn!("{}", issue);
        self.issues.push(issue);
    }

    /// Moves another fragment's items and issues into this one.
    pub fn append(&mut self, mut other: Fragment<T>) {
        self.items.append(&mut other.items);
        self.issues.append(&mut other.issues);
    }
}

impl Fragment<RuleBlock> {
    /// Renders the blocks back to back.
    pub fn render(&self) -> String {
        self.items.iter().map(|block| block.to_string()).collect()
    }
}

/// The tokens and collections of one document, listed once per run.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    pub tokens: Vec<Token>,
    pub collections: Vec<Collection>,
}

impl DocumentIndex {
    /// Lists local tokens and fetches their collections concurrently.
    pub async fn load<S: TokenStore>(store: &CachedStore<S>) -> Result<Self, GenerateError> {
        let tokens = store.local_tokens().await?;
        let collections = store.collections_of(&tokens).await?;
        Ok(Self {
            tokens,
            collections,
        })
    }

    /// Finds a collection by name.
    pub fn collection_named(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Tokens owned by a collection, in document order.
    pub fn tokens_in<'a>(&'a self, collection: &'a Collection) -> impl Iterator<Item = &'a Token> {
        self.tokens
            .iter()
            .filter(move |t| t.collection_id == collection.id)
    }
}

/// Emits CSS for one generation run.
pub struct Emitter<'a, S> {
    store: &'a CachedStore<S>,
    config: &'a GeneratorConfig,
    selector: ModeSelector,
}

impl<'a, S: TokenStore> Emitter<'a, S> {
    /// Creates an emitter. `overrides` maps collection ids to the mode id the
    /// selected node explicitly uses.
    pub fn new(
        store: &'a CachedStore<S>,
        config: &'a GeneratorConfig,
        overrides: HashMap<String, String>,
    ) -> Self {
        let selector = ModeSelector::new(
            overrides,
            config.mode_defaults.clone(),
            config.categorical_collections.clone(),
        );
        Self {
            store,
            config,
            selector,
        }
    }

    fn formatter(&self) -> ValueFormatter<'a, S> {
        ValueFormatter::new(self.store, &self.config.font_names)
    }

    /// Formats every token of `collection` at `mode_id`, keeping aliases as
    /// `var()` references.
    async fn referencing_declarations<'t>(
        &self,
        tokens: impl Iterator<Item = &'t Token>,
        mode_id: &str,
        mode_name: &str,
    ) -> Result<Fragment<Declaration>, GenerateError> {
        let formatter = self.formatter();
        let mut out = Fragment::new();
        for token in tokens {
            let Some(value) = token.value_for(mode_id) else {
                out.skip(Issue::MissingValue {
                    token: token.name.clone(),
                    mode: mode_name.to_string(),
                });
                continue;
            };
            let css_name = crate::normalize(&token.name);
            match formatter.format(&token.name, &css_name, value).await? {
                Formatted::Line(decl) => out.push(decl),
                Formatted::Skip(issue) => out.skip(issue),
            }
        }
        Ok(out)
    }

    /// Composes the full `cssvariables` stylesheet.
    pub async fn css_variables(
        &self,
        index: &DocumentIndex,
    ) -> Result<(String, Vec<Issue>), GenerateError> {
        let mut issues = Vec::new();
        let mut css = String::new();

        for settings in &self.config.switchable {
            let blocks = self.switchable(index, settings).await?;
            css.push_str(&blocks.render());
            issues.extend(blocks.issues);
        }

        let shared = self.shared_block(index).await?;
        css.push_str(&shared.render());
        issues.extend(shared.issues);

        let palette = self.palette(index).await?;
        css.push_str("\n\n");
        css.push_str(&palette.render());
        issues.extend(palette.issues);

        css.push_str(&self.config.trailer);
        Ok((css, issues))
    }

    /// The `*` block: pinned declarations, then the static shared block.
    pub async fn shared_block(
        &self,
        index: &DocumentIndex,
    ) -> Result<Fragment<RuleBlock>, GenerateError> {
        let mut declarations = Fragment::new();
        for settings in &self.config.pinned {
            declarations.append(self.pinned(index, settings).await?);
        }

        let mut block = RuleBlock::new(vec!["*".to_string()]);
        for decl in declarations.items {
            block.declaration(decl);
        }
        block.raw(self.config.shared_block.clone());

        Ok(Fragment {
            items: vec![block],
            issues: declarations.issues,
        })
    }
}
