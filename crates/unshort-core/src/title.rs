//! Page title lookup.
//!
//! A missing or unreachable title is never fatal: [`TitleFetcher::fetch_title`]
//! degrades to an empty string and logs a warning.

use scraper::{Html, Selector};
use thiserror::Error;

use crate::http::{self, HttpOptions};

/// Why no title could be read for a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("title tag is missing in the HTML content")]
    Missing,
    #[error("unable to retrieve the HTML content (HTTP {0})")]
    Status(u32),
    #[error("unable to retrieve the HTML content ({0})")]
    Transport(String),
}

/// Looks up the `<title>` of a page.
pub trait TitleFetcher {
    fn fetch(&self, url: &str) -> Result<String, TitleError>;

    /// Title or empty string; never fails.
    ///
    /// For callers that only want the title. The pipeline calls [`fetch`](Self::fetch)
    /// directly because it reports the reason as a diagnostic.
    fn fetch_title(&self, url: &str) -> String {
        match self.fetch(url) {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(url, "no title: {}", e);
                String::new()
            }
        }
    }
}

/// Extracts the trimmed text of the first `<title>` element.
pub fn extract_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Fetches pages over HTTP and reads their title.
#[derive(Debug, Clone, Default)]
pub struct HttpTitleFetcher {
    http: HttpOptions,
}

impl HttpTitleFetcher {
    pub fn new(http: HttpOptions) -> Self {
        Self { http }
    }
}

impl TitleFetcher for HttpTitleFetcher {
    fn fetch(&self, url: &str) -> Result<String, TitleError> {
        let resp =
            http::get(url, &self.http).map_err(|e| TitleError::Transport(format!("{:#}", e)))?;
        if !resp.is_ok() {
            return Err(TitleError::Status(resp.status));
        }
        extract_title(&resp.text()).ok_or(TitleError::Missing)
    }
}
