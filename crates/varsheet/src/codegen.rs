//! The codegen entry point.
//!
//! A host asks for one [`OutputKind`] at a time. [`Generator::generate`]
//! answers with a [`Generation`]: zero or more [`CodegenResult`]s plus the
//! [`Issue`]s recovered along the way. Each call builds a fresh
//! [`CachedStore`] around the generator's store, so nothing is shared between
//! invocations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::emit::{passthrough_css, DocumentIndex, Emitter};
use crate::error::{GenerateError, Issue};
use crate::scene::{color_token_names, SceneNode};
use crate::store::{CachedStore, Snapshot, TokenStore};

/// What to generate.
///
/// # Variants
///
/// - `Variables` - JSON report of the color tokens bound in the selected node
/// - `CssVariables` - the full themed stylesheet
/// - `Css` - the selected node's computed CSS, token references renamed
/// - `Palette` - palette theme blocks only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Variables,
    CssVariables,
    Css,
    /// Legacy kind kept for hosts that only ever asked for palette blocks.
    Palette,
}

impl OutputKind {
    /// Every kind, in the order hosts list them.
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Variables,
        OutputKind::CssVariables,
        OutputKind::Css,
        OutputKind::Palette,
    ];

    /// The name hosts use to request this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Variables => "variables",
            OutputKind::CssVariables => "cssvariables",
            OutputKind::Css => "css",
            OutputKind::Palette => "palette",
        }
    }

    /// Returns true if this kind reads the selected node.
    pub fn uses_node(&self) -> bool {
        matches!(self, OutputKind::Variables | OutputKind::Css)
    }

    /// The language of results of this kind.
    pub fn language(&self) -> Language {
        match self {
            OutputKind::Variables => Language::Json,
            _ => Language::Css,
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenerateError::UnsupportedKind(s.to_string()))
    }
}

/// Language tag of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Css,
    Json,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Css => f.write_str("CSS"),
            Language::Json => f.write_str("JSON"),
        }
    }
}

/// One codegen request.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenRequest {
    pub kind: OutputKind,
    /// The selected scene node. Kinds that read it treat `None` as an empty
    /// node.
    pub node: Option<SceneNode>,
    /// Explicit modes of the selected node, collection id to mode id.
    pub overrides: HashMap<String, String>,
}

impl CodegenRequest {
    pub fn new(kind: OutputKind) -> Self {
        Self {
            kind,
            node: None,
            overrides: HashMap::new(),
        }
    }

    /// Parses the kind name first, failing with
    /// [`GenerateError::UnsupportedKind`] before any work happens.
    pub fn parse(kind: &str) -> Result<Self, GenerateError> {
        Ok(Self::new(kind.parse()?))
    }

    /// A request carrying the node and overrides of a snapshot.
    pub fn from_snapshot(kind: OutputKind, snapshot: &Snapshot) -> Self {
        Self {
            kind,
            node: snapshot.node.clone(),
            overrides: snapshot.mode_overrides.clone(),
        }
    }

    pub fn with_node(mut self, node: SceneNode) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }
}

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenResult {
    pub language: Language,
    pub code: String,
    pub title: String,
}

/// Everything one invocation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub results: Vec<CodegenResult>,
    /// Recovered per-token failures, in the order they were met.
    pub issues: Vec<Issue>,
}

impl Generation {
    /// The code of the first result, if any.
    pub fn code(&self) -> Option<&str> {
        self.results.first().map(|r| r.code.as_str())
    }
}

/// Runs codegen requests against a token store.
pub struct Generator<S> {
    store: S,
    config: GeneratorConfig,
}

impl<S: TokenStore> Generator<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, GeneratorConfig::default())
    }

    pub fn with_config(store: S, config: GeneratorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one request.
    ///
    /// # Errors
    ///
    /// Any [`GenerateError`]. No partial output is returned on error.
    pub async fn generate(&self, request: &CodegenRequest) -> Result<Generation, GenerateError> {
        tracing::debug!(kind = %request.kind, "generating");
        let store = CachedStore::new(&self.store);
        let empty = SceneNode::default();
        let node = request.node.as_ref().unwrap_or(&empty);

        let (code, issues) = match request.kind {
            OutputKind::Variables => {
                let names = color_token_names(&store, node).await?;
                (serde_json::to_string_pretty(&names)?, Vec::new())
            }
            OutputKind::Css => (passthrough_css(node), Vec::new()),
            OutputKind::CssVariables => {
                let index = DocumentIndex::load(&store).await?;
                let emitter = Emitter::new(&store, &self.config, request.overrides.clone());
                emitter.css_variables(&index).await?
            }
            OutputKind::Palette => {
                let index = DocumentIndex::load(&store).await?;
                let emitter = Emitter::new(&store, &self.config, request.overrides.clone());
                let palette = emitter.palette(&index).await?;
                (palette.render(), palette.issues)
            }
        };

        Ok(Generation {
            results: vec![CodegenResult {
                language: request.kind.language(),
                code,
                title: self.config.title.clone(),
            }],
            issues,
        })
    }
}
