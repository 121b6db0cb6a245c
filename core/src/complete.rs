//! Tab-completion candidates.

use std::collections::{BTreeSet, HashSet};

use crate::types::normalize_token;
use crate::{FlagId, FlagRegistry, PresenceClass};

impl FlagRegistry {
    /// Completion candidates for the token being typed.
    ///
    /// `previous` holds the complete tokens before the cursor and `partial`
    /// the incomplete one. When the last complete token is a flag that
    /// takes a value, its value suggestions are offered; an `Optional` flag
    /// additionally offers the remaining flag tokens since its value may be
    /// omitted. Otherwise the primary tokens and aliases of every flag not
    /// yet used are offered.
    ///
    /// Candidates are filtered by case-insensitive prefix, sorted and
    /// deduplicated. This never fails; a flag whose suggestion source is
    /// unavailable simply contributes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_flags_core::*;
    ///
    /// struct Kind;
    /// impl FlagBehavior<String> for Kind {
    ///     fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
    ///         Ok(input.to_string())
    ///     }
    ///     fn suggest(&self) -> Vec<String> {
    ///         vec!["flat".into(), "normal".into(), "amplified".into()]
    ///     }
    /// }
    ///
    /// let kind = Flag::required("WorldType", "--type", Kind).with_aliases(["-t"]);
    /// let mut builder = FlagRegistry::builder();
    /// builder.register(&kind).unwrap();
    /// let registry = builder.build();
    ///
    /// assert_eq!(registry.complete(&["-t"], "f"), vec!["flat"]);
    /// assert_eq!(registry.complete::<&str>(&[], "--"), vec!["--type"]);
    /// assert!(registry.complete(&["--type", "flat"], "-").is_empty());
    /// ```
    pub fn complete<S: AsRef<str>>(&self, previous: &[S], partial: &str) -> Vec<String> {
        let prefix = normalize_token(partial);
        let mut candidates = BTreeSet::new();

        let pending = previous
            .last()
            .and_then(|token| self.lookup(token.as_ref()))
            .filter(|flag| flag.spec().presence.accepts_value());

        if let Some(flag) = pending {
            candidates.extend(
                flag.suggest()
                    .into_iter()
                    .filter(|candidate| normalize_token(candidate).starts_with(&prefix)),
            );
            if flag.spec().presence == PresenceClass::Required {
                return candidates.into_iter().collect();
            }
        }

        let used: HashSet<FlagId> = previous
            .iter()
            .filter_map(|token| self.resolve(token.as_ref()))
            .map(|spec| spec.id())
            .collect();

        for spec in self.flags().filter(|spec| !used.contains(&spec.id())) {
            candidates.extend(
                spec.tokens()
                    .filter(|token| normalize_token(token).starts_with(&prefix))
                    .map(String::from),
            );
        }

        candidates.into_iter().collect()
    }
}
