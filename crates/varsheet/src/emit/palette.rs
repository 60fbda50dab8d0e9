//! Theme-scoped palette blocks.

use super::{DocumentIndex, Emitter, Fragment, RuleBlock};
use crate::error::{GenerateError, Issue};
use crate::format::Formatted;
use crate::normalize::normalize;
use crate::resolve::{AliasResolver, Resolved, Scope};
use crate::store::TokenStore;

impl<'a, S: TokenStore> Emitter<'a, S> {
    /// Emits one `:root[attr='<mode>']` block per palette mode.
    ///
    /// Every palette value is flattened to a literal: aliases are followed
    /// with the palette collection and the block's mode as scope. Tokens whose
    /// chain is suppressed are left out silently; tokens whose chain is broken
    /// are left out with an issue.
    pub async fn palette(
        &self,
        index: &DocumentIndex,
    ) -> Result<Fragment<RuleBlock>, GenerateError> {
        let settings = &self.config.palette;
        let mut out = Fragment::new();

        let Some(palette) = index.collection_named(&settings.collection) else {
            out.skip(Issue::CollectionNotConfigured {
                name: settings.collection.clone(),
            });
            return Ok(out);
        };

        let resolver = AliasResolver::new(self.store, &self.selector);
        let formatter = self.formatter();

        for mode in &palette.modes {
            let theme = mode.name.to_lowercase();
            let mut selectors = Vec::with_capacity(2);
            if theme == settings.default_theme {
                selectors.push(":root".to_string());
            }
            selectors.push(format!(":root[{}='{}']", settings.theme_attribute, theme));

            let mut block = RuleBlock::new(selectors);
            if let Some(preamble) = settings.preamble.get(&theme) {
                block.raw(preamble.clone());
            }

            let scope = Scope {
                collection_id: &palette.id,
                mode_id: &mode.mode_id,
            };
            for token in index.tokens_in(palette) {
                let Some(value) = token.value_for(&mode.mode_id) else {
                    out.skip(Issue::MissingValue {
                        token: token.name.clone(),
                        mode: mode.name.clone(),
                    });
                    continue;
                };

                let css_name = normalize(&token.name);
                match resolver.resolve(token, value, scope).await? {
                    Resolved::Value(resolved) => {
                        match formatter.literal(&token.name, &css_name, &resolved)? {
                            Formatted::Line(decl) => block.declaration(decl),
                            Formatted::Skip(issue) => out.skip(issue),
                        }
                    }
                    Resolved::Suppressed => {}
                    Resolved::Missing(issue) => out.skip(issue),
                }
            }
            out.push(block);
        }

        Ok(out)
    }
}
