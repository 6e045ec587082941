//! Blocking HTTP transport over libcurl.
//!
//! Every call uses a fresh `Easy` handle and runs on the current thread.
//! Any HTTP status is returned to the caller as data; only transport
//! failures (DNS, connect, timeout, TLS) surface as `Err`.

use anyhow::{Context, Result};
use std::time::Duration;

/// Maximum redirects followed by a page GET.
const MAX_REDIRECTIONS: u32 = 10;

/// Per-request settings shared by the resolver, title fetcher and suggester.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            user_agent: concat!("unshort/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Status code and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs a GET, following redirects.
pub fn get(url: &str, opts: &HttpOptions) -> Result<HttpResponse> {
    let mut easy = new_easy(url, opts)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTIONS)?;
    perform(easy, url, "GET")
}

/// Performs a POST with a JSON body. `headers` are extra `(name, value)` pairs
/// sent in addition to `Content-Type: application/json`.
pub fn post_json(
    url: &str,
    headers: &[(&str, &str)],
    body: &[u8],
    opts: &HttpOptions,
) -> Result<HttpResponse> {
    let mut easy = new_easy(url, opts)?;
    easy.post(true)?;
    easy.post_fields_copy(body)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    list.append("Accept: application/json")?;
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    easy.http_headers(list)?;

    perform(easy, url, "POST")
}

fn new_easy(url: &str, opts: &HttpOptions) -> Result<curl::easy::Easy> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    // Accept whatever compression libcurl supports.
    easy.accept_encoding("")?;
    Ok(easy)
}

fn perform(mut easy: curl::easy::Easy, url: &str, method: &str) -> Result<HttpResponse> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("{} {} failed", method, url))?;
    }

    let status = easy.response_code().context("no response code")?;
    tracing::debug!(method, url, status, bytes = body.len(), "http request complete");
    Ok(HttpResponse { status, body })
}
