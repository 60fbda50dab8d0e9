//! Switchable class blocks and pinned declarations.
//!
//! Both keep aliases as `var()` references, so a size token pointing at a
//! primitive follows whatever the primitive is set to at render time.

use super::{DocumentIndex, Emitter, Fragment, RuleBlock};
use crate::config::{PinnedCollection, SwitchableCollection};
use crate::error::{GenerateError, Issue};
use crate::format::Declaration;
use crate::store::TokenStore;

impl<'a, S: TokenStore> Emitter<'a, S> {
    /// Emits one class block per mode of a switchable collection.
    pub async fn switchable(
        &self,
        index: &DocumentIndex,
        settings: &SwitchableCollection,
    ) -> Result<Fragment<RuleBlock>, GenerateError> {
        let mut out = Fragment::new();
        let Some(collection) = index.collection_named(&settings.collection) else {
            out.skip(Issue::CollectionNotConfigured {
                name: settings.collection.clone(),
            });
            return Ok(out);
        };

        for mode in &collection.modes {
            let class = mode.name.to_lowercase();
            let mut selectors = Vec::with_capacity(2);
            if settings.default_mode.as_deref() == Some(class.as_str()) {
                selectors.push(":root".to_string());
            }
            selectors.push(format!("{}{}", settings.class_prefix, class));

            let declarations = self
                .referencing_declarations(index.tokens_in(collection), &mode.mode_id, &mode.name)
                .await?;

            let mut block = RuleBlock::new(selectors);
            for decl in declarations.items {
                block.declaration(decl);
            }
            out.issues.extend(declarations.issues);
            out.push(block);
        }

        Ok(out)
    }

    /// Emits the declarations of a pinned collection at its pinned mode.
    ///
    /// A single-mode collection uses its only mode whatever is configured.
    pub async fn pinned(
        &self,
        index: &DocumentIndex,
        settings: &PinnedCollection,
    ) -> Result<Fragment<Declaration>, GenerateError> {
        let mut out = Fragment::new();
        let Some(collection) = index.collection_named(&settings.collection) else {
            out.skip(Issue::CollectionNotConfigured {
                name: settings.collection.clone(),
            });
            return Ok(out);
        };

        let mode = match collection.modes.as_slice() {
            [only] => only,
            _ => match collection.mode_by_name(&settings.mode) {
                Some(mode) => mode,
                None => {
                    out.skip(Issue::PinnedModeMissing {
                        collection: settings.collection.clone(),
                        mode: settings.mode.clone(),
                    });
                    return Ok(out);
                }
            },
        };

        self.referencing_declarations(index.tokens_in(collection), &mode.mode_id, &mode.name)
            .await
    }
}
