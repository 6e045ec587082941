//! Expansion pipeline: resolve, fetch title, canonicalize, one URL at a time.
//!
//! Every input yields exactly one [`ResultRecord`], in input order. A failure
//! is confined to its own record; the batch as a whole cannot fail.

use crate::canonical::canonicalize;
use crate::record::ResultRecord;
use crate::resolver::Resolver;
use crate::suggest::Suggester;
use crate::title::TitleFetcher;

/// Operator-facing notice produced while processing a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The redirect chain could not be resolved.
    ResolutionFailed {
        short_url: String,
        message: String,
        /// Raw service body, when the service answered with a non-200 status.
        detail: Option<String>,
    },
    /// Hint returned by the suggestion collaborator for a failure.
    Suggestion { short_url: String, text: String },
    /// The suggestion collaborator itself failed.
    SuggestionUnavailable { short_url: String, reason: String },
    /// The page title could not be read; the record carries an empty title.
    TitleDegraded { url: String, reason: String },
}

pub struct Pipeline<'a> {
    resolver: &'a dyn Resolver,
    titles: &'a dyn TitleFetcher,
    suggester: Option<&'a dyn Suggester>,
}

impl<'a> Pipeline<'a> {
    pub fn new(resolver: &'a dyn Resolver, titles: &'a dyn TitleFetcher) -> Self {
        Self {
            resolver,
            titles,
            suggester: None,
        }
    }

    /// Ask `suggester` for a hint whenever a URL fails to resolve.
    pub fn with_suggester(mut self, suggester: &'a dyn Suggester) -> Self {
        self.suggester = Some(suggester);
        self
    }

    /// Processes `urls` and discards diagnostics (they are still logged).
    pub fn process<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ResultRecord> {
        self.process_with(urls, |_| {})
    }

    /// Processes `urls`, passing each diagnostic to `on_diagnostic` as it occurs.
    pub fn process_with<S, F>(&self, urls: &[S], mut on_diagnostic: F) -> Vec<ResultRecord>
    where
        S: AsRef<str>,
        F: FnMut(Diagnostic),
    {
        let mut records = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            tracing::debug!(index, url, "expanding");
            records.push(self.process_one(url, &mut on_diagnostic));
        }
        let failed = records.iter().filter(|r| !r.is_expanded()).count();
        tracing::info!(total = records.len(), failed, "batch complete");
        records
    }

    fn process_one(
        &self,
        short_url: &str,
        on_diagnostic: &mut dyn FnMut(Diagnostic),
    ) -> ResultRecord {
        let resolved = match self.resolver.resolve(short_url) {
            Ok(resolved) => resolved,
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(short_url, "{}", message);
                on_diagnostic(Diagnostic::ResolutionFailed {
                    short_url: short_url.to_string(),
                    message: message.clone(),
                    detail: err.response_body().map(str::to_string),
                });
                self.ask_for_suggestion(short_url, &message, on_diagnostic);
                return ResultRecord::failed(short_url, message);
            }
        };

        let title = match self.titles.fetch(&resolved) {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(url = %resolved, "no title: {}", e);
                on_diagnostic(Diagnostic::TitleDegraded {
                    url: resolved.clone(),
                    reason: e.to_string(),
                });
                String::new()
            }
        };

        let canonical = canonicalize(&resolved);
        ResultRecord::expanded(short_url, resolved, title, canonical)
    }

    fn ask_for_suggestion(
        &self,
        short_url: &str,
        message: &str,
        on_diagnostic: &mut dyn FnMut(Diagnostic),
    ) {
        let Some(suggester) = self.suggester else {
            return;
        };
        match suggester.suggest(message) {
            Ok(text) => on_diagnostic(Diagnostic::Suggestion {
                short_url: short_url.to_string(),
                text,
            }),
            Err(e) => {
                tracing::warn!(short_url, "suggestion failed: {:#}", e);
                on_diagnostic(Diagnostic::SuggestionUnavailable {
                    short_url: short_url.to_string(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }
}
