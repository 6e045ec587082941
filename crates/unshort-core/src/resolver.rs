//! Redirect resolution through an external redirect-chain service.
//!
//! The pipeline only depends on the [`Resolver`] trait; the service-backed
//! implementation posts `{"requestUrl": ...}` and reads the final element of
//! `response.chain`. One attempt per URL, no retries.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::http::{self, HttpOptions};

/// Why a short URL could not be resolved.
///
/// The `Display` text is what the operator sees and what gets forwarded to
/// the suggestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Error expanding URL: {url} - not a valid absolute URL")]
    InvalidUrl { url: String },
    #[error("Error expanding URL: {url} - HTTP {status}")]
    Status { url: String, status: u32, body: String },
    #[error("Error expanding URL: {url} - {reason}")]
    Malformed { url: String, reason: String },
    #[error("Error expanding URL: {url} - {reason}")]
    Transport { url: String, reason: String },
}

impl ResolveError {
    /// The input URL that failed.
    pub fn url(&self) -> &str {
        match self {
            ResolveError::InvalidUrl { url }
            | ResolveError::Status { url, .. }
            | ResolveError::Malformed { url, .. }
            | ResolveError::Transport { url, .. } => url,
        }
    }

    /// Raw service body for non-200 responses.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ResolveError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Turns a short URL into the final URL of its redirect chain.
pub trait Resolver {
    fn resolve(&self, short_url: &str) -> Result<String, ResolveError>;
}

#[derive(Debug, Serialize)]
struct StatusRequest<'a> {
    #[serde(rename = "requestUrl")]
    request_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    response: ChainEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChainEnvelope {
    chain: Vec<ChainHop>,
}

#[derive(Debug, Deserialize)]
struct ChainHop {
    url: Option<String>,
}

/// Resolver backed by an httpstatus-style JSON service.
#[derive(Debug, Clone)]
pub struct HttpStatusResolver {
    endpoint: String,
    http: HttpOptions,
}

impl HttpStatusResolver {
    pub fn new(endpoint: impl Into<String>, http: HttpOptions) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Resolver for HttpStatusResolver {
    fn resolve(&self, short_url: &str) -> Result<String, ResolveError> {
        if Url::parse(short_url).is_err() {
            return Err(ResolveError::InvalidUrl {
                url: short_url.to_string(),
            });
        }

        let body = serde_json::to_vec(&StatusRequest {
            request_url: short_url,
        })
        .map_err(|e| ResolveError::Malformed {
            url: short_url.to_string(),
            reason: e.to_string(),
        })?;

        let resp = http::post_json(&self.endpoint, &[], &body, &self.http).map_err(|e| {
            ResolveError::Transport {
                url: short_url.to_string(),
                reason: format!("{:#}", e),
            }
        })?;

        let resolved = parse_chain_response(short_url, resp.status, &resp.body)?;
        tracing::debug!(short_url, resolved = %resolved, "resolved redirect chain");
        Ok(resolved)
    }
}

/// Interprets a service reply: HTTP 200 with a non-empty chain whose last
/// hop carries a `url`.
pub fn parse_chain_response(
    short_url: &str,
    status: u32,
    body: &[u8],
) -> Result<String, ResolveError> {
    if status != 200 {
        return Err(ResolveError::Status {
            url: short_url.to_string(),
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let malformed = |reason: String| ResolveError::Malformed {
        url: short_url.to_string(),
        reason,
    };

    let parsed: StatusResponse =
        serde_json::from_slice(body).map_err(|e| malformed(format!("invalid response: {}", e)))?;
    let last = parsed
        .response
        .chain
        .into_iter()
        .last()
        .ok_or_else(|| malformed("redirect chain is empty".to_string()))?;
    last.url
        .filter(|u| !u.trim().is_empty())
        .map(|u| u.trim().to_string())
        .ok_or_else(|| malformed("last chain entry has no url".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = "https://bit.ly/abc";

    #[test]
    fn picks_last_hop() {
        let body = br#"{"response":{"chain":[
            {"statusCode":301,"url":"https://bit.ly/abc"},
            {"statusCode":302,"url":"https://example.com/login?next=1"},
            {"statusCode":200,"url":"https://example.com/final?utm=x"}
        ]}}"#;
        assert_eq!(
            parse_chain_response(SHORT, 200, body).unwrap(),
            "https://example.com/final?utm=x"
        );
    }

    #[test]
    fn single_hop_chain() {
        let body = br#"{"response":{"chain":[{"url":"https://example.com/"}]}}"#;
        assert_eq!(
            parse_chain_response(SHORT, 200, body).unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn non_200_keeps_status_and_body() {
        let err = parse_chain_response(SHORT, 500, b"upstream exploded").unwrap_err();
        assert_eq!(
            err,
            ResolveError::Status {
                url: SHORT.to_string(),
                status: 500,
                body: "upstream exploded".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Error expanding URL: https://bit.ly/abc - HTTP 500");
        assert_eq!(err.response_body(), Some("upstream exploded"));
        assert_eq!(err.url(), SHORT);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_chain_response(SHORT, 200, b"<html>").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
        assert!(err.to_string().starts_with("Error expanding URL: https://bit.ly/abc - "));
    }

    #[test]
    fn missing_chain_is_malformed() {
        let err = parse_chain_response(SHORT, 200, br#"{"response":{}}"#).unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
    }

    #[test]
    fn empty_chain_is_malformed() {
        let err = parse_chain_response(SHORT, 200, br#"{"response":{"chain":[]}}"#).unwrap_err();
        match err {
            ResolveError::Malformed { reason, .. } => assert!(reason.contains("empty")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn last_hop_without_url_is_malformed() {
        let body = br#"{"response":{"chain":[{"url":"https://a.example"},{"statusCode":200}]}}"#;
        let err = parse_chain_response(SHORT, 200, body).unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
    }

    #[test]
    fn relative_input_is_rejected_without_network() {
        let r = HttpStatusResolver::new("http://127.0.0.1:9/status", HttpOptions::default());
        let err = r.resolve("bit.ly/abc").unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidUrl {
                url: "bit.ly/abc".to_string()
            }
        );
    }

    #[test]
    fn request_body_shape() {
        let json = serde_json::to_string(&StatusRequest { request_url: SHORT }).unwrap();
        assert_eq!(json, r#"{"requestUrl":"https://bit.ly/abc"}"#);
    }
}
