//! The field-type vocabulary.
//!
//! The set of valid field-type identifiers is supplied externally: the
//! registry serves it at `GET /v1/field-types`, and releases of the CLI pin a
//! built-in copy used when no registry is configured. The vocabulary is
//! fetched lazily, at most once per process, and treated as immutable for the
//! process lifetime.
//!
//! The vocabulary is a plain value handed to
//! [`SchemaValidator::new`](crate::schema::SchemaValidator::new), so tests
//! can construct a fixed vocabulary without any environment coupling.

use crate::config::GlobalConfig;
use crate::core::BlocksmithError;
use crate::registry::RegistryClient;
use crate::schema::model::{
    TYPE_COLOR, TYPE_DATE, TYPE_IMAGE, TYPE_LINK, TYPE_MULTI_LINE, TYPE_NUMBER, TYPE_REPEATER,
    TYPE_RICH_TEXT, TYPE_SELECT, TYPE_SINGLE_LINE, TYPE_TOGGLE,
};
use anyhow::Result;
use std::collections::BTreeSet;
use tokio::sync::OnceCell;

/// The field types pinned into this release of the CLI.
///
/// Used when no registry is configured; kept in sync with the registry's
/// published vocabulary at release time.
pub const BUILTIN_FIELD_TYPES: &[&str] = &[
    TYPE_SINGLE_LINE,
    TYPE_MULTI_LINE,
    TYPE_RICH_TEXT,
    TYPE_NUMBER,
    TYPE_TOGGLE,
    TYPE_SELECT,
    TYPE_IMAGE,
    TYPE_LINK,
    TYPE_COLOR,
    TYPE_DATE,
    TYPE_REPEATER,
];

/// The authoritative set of valid field-type identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeVocabulary {
    types: BTreeSet<String>,
}

impl FieldTypeVocabulary {
    /// Build a vocabulary from an arbitrary set of type names.
    #[must_use]
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { types: types.into_iter().map(Into::into).collect() }
    }

    /// The vocabulary pinned into this CLI release.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_types(BUILTIN_FIELD_TYPES.iter().copied())
    }

    /// Membership predicate: is `field_type` a valid type identifier?
    #[must_use]
    pub fn contains(&self, field_type: &str) -> bool {
        self.types.contains(field_type)
    }

    /// All valid type names, sorted, for error messages.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(String::as_str).collect()
    }
}

static VOCABULARY: OnceCell<FieldTypeVocabulary> = OnceCell::const_new();

/// Obtain the process-wide vocabulary, fetching it on first use.
///
/// With a registry configured, fetches `GET /v1/field-types` once and caches
/// the result for the rest of the process; without one, returns the pinned
/// built-in vocabulary. A failed fetch is fatal to the calling validation -
/// there is no stale or partial fallback - but leaves the cache unset so a
/// later call may retry.
pub async fn obtain(config: &GlobalConfig) -> Result<&'static FieldTypeVocabulary> {
    VOCABULARY
        .get_or_try_init(|| async {
            match config.registry_url() {
                Some(url) => {
                    let client = RegistryClient::new(url);
                    let types = client.fetch_field_types().await.map_err(|e| {
                        anyhow::Error::from(BlocksmithError::VocabularyUnavailable {
                            reason: format!("{e:#}"),
                        })
                    })?;
                    Ok(FieldTypeVocabulary::from_types(types))
                }
                None => Ok(FieldTypeVocabulary::builtin()),
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_core_types() {
        let vocab = FieldTypeVocabulary::builtin();
        assert!(vocab.contains("singleLine"));
        assert!(vocab.contains("repeater"));
        assert!(vocab.contains("select"));
        assert!(!vocab.contains("wysiwyg"));
    }

    #[test]
    fn names_are_sorted() {
        let vocab = FieldTypeVocabulary::from_types(["b", "a", "c"]);
        assert_eq!(vocab.names(), vec!["a", "b", "c"]);
    }
}
