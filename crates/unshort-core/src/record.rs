//! One result per input URL.

use serde::Serialize;

/// Outcome of expanding a single input URL.
///
/// Created once by the pipeline and handed, unchanged, to exactly one
/// formatter. A record without `resolved_url` is a resolution failure and
/// never carries a canonical URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// The URL as extracted from the input text.
    pub short_url: String,
    /// Final URL after following the redirect chain.
    pub resolved_url: Option<String>,
    /// Trimmed `<title>` text; empty when missing or unreachable.
    pub title: String,
    /// Normalized form of `resolved_url`.
    pub canonical_url: Option<String>,
    /// Why resolution failed, if it did.
    pub failure: Option<String>,
}

impl ResultRecord {
    pub fn expanded(
        short_url: impl Into<String>,
        resolved_url: impl Into<String>,
        title: impl Into<String>,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            short_url: short_url.into(),
            resolved_url: Some(resolved_url.into()),
            title: title.into(),
            canonical_url: Some(canonical_url.into()),
            failure: None,
        }
    }

    pub fn failed(short_url: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            short_url: short_url.into(),
            resolved_url: None,
            title: String::new(),
            canonical_url: None,
            failure: Some(failure.into()),
        }
    }

    /// True if the redirect chain was resolved.
    pub fn is_expanded(&self) -> bool {
        self.failure.is_none() && self.resolved_url.is_some()
    }
}
