//! # Varsheet - Design Tokens to Themed CSS
//!
//! `varsheet` turns a document's design tokens into CSS custom properties.
//! Tokens live in collections; each collection has one or more modes (themes,
//! sizes, configurations) and each token has one value per mode. A value is a
//! literal (number, string, color) or an alias to another token, possibly in
//! another collection.
//!
//! ## Core Concepts
//!
//! - [`normalize`]: token names to CSS custom-property names
//! - [`ModeSelector`]: which mode of a foreign collection an alias reads
//! - [`AliasResolver`]: follows alias chains to a literal value
//! - [`ValueFormatter`]: literal values to CSS text
//! - [`Emitter`]: theme blocks, size classes and the shared block
//! - [`Generator`]: one entry point per [`OutputKind`]
//!
//! ## Quick Start
//!
//! ```rust
//! use varsheet::{CodegenRequest, Collection, Color, Generator, MemoryStore, OutputKind, Token};
//!
//! # let runtime = tokio::runtime::Runtime::new().unwrap();
//! # runtime.block_on(async {
//! let store = MemoryStore::new()
//!     .with_collection(Collection::new("c1", "Palette").mode("m1", "Day"))
//!     .with_token(Token::new("t1", "Color/Accent", "c1").value("m1", Color::rgb(1.0, 0.0, 0.0)));
//!
//! let generation = Generator::new(store)
//!     .generate(&CodegenRequest::new(OutputKind::Palette))
//!     .await
//!     .unwrap();
//! assert!(generation.code().unwrap().contains("--accent: rgb(255, 0, 0);"));
//! # });
//! ```
//!
//! ## Output kinds
//!
//! | Kind | Language | Content |
//! |------|----------|---------|
//! | `variables` | JSON | color tokens bound in the selected node |
//! | `cssvariables` | CSS | size classes, shared block, palette themes, trailer |
//! | `css` | CSS | the selected node's computed CSS |
//! | `palette` | CSS | palette themes only |
//!
//! ## Failures
//!
//! A broken reference drops one declaration and is reported as an [`Issue`];
//! the rest of the stylesheet is still produced. Unsupported kinds, store
//! failures, corrupt colors and alias cycles fail the request with a
//! [`GenerateError`].
//!
//! ## Configuration
//!
//! Collection names, selectors, the named mode defaults and the static CSS
//! payloads come from [`GeneratorConfig`], which can be loaded from YAML.

mod assets;
mod codegen;
pub mod config;
pub mod emit;
mod error;
mod format;
mod mode;
mod model;
mod normalize;
mod resolve;
pub mod scene;
pub mod store;

pub use codegen::{CodegenRequest, CodegenResult, Generation, Generator, Language, OutputKind};
pub use config::{
    GeneratorConfig, ModeDefaults, PaletteConfig, PinnedCollection, SwitchableCollection,
};
pub use emit::{
    passthrough_css, rewrite_var_references, DocumentIndex, Emitter, Fragment, RuleBlock,
};
pub use error::{GenerateError, Issue, LoadError, StoreError};
pub use format::{color_to_css, number_to_css, Declaration, Formatted, ValueFormatter};
pub use mode::{ModeChoice, ModeSelector};
pub use model::{Collection, Color, Mode, Token, TokenValue};
pub use normalize::{normalize, normalize_bare};
pub use resolve::{AliasResolver, Resolved, Scope};
pub use scene::{collect_color_token_ids, color_token_names, Paint, PaintKind, SceneNode};
pub use store::{CachedStore, MemoryStore, Snapshot, TokenStore};
