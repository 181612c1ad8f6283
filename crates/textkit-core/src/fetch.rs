//! Blocking HTTP GET of a text payload.
//!
//! Uses the curl crate (libcurl). One request, no retries; redirects are followed up to
//! a bound and both the connect phase and the whole transfer have timeouts.

use std::time::Duration;
use thiserror::Error;

/// Timeouts and redirect bound for [`fetch_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirections: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            max_redirections: 10,
        }
    }
}

/// Failure of a single fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {scheme:?} (expected http or https)")]
    UnsupportedScheme { scheme: String },
    /// Transport failure reported by curl (DNS, connect, timeout, TLS, ...).
    #[error("GET {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
}

/// Check that `url` parses and is http(s).
fn validate(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// GET `url` and return the body as text. Invalid UTF-8 is replaced with U+FFFD.
pub fn fetch_text(url: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    let body = fetch_bytes(url, opts)?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// GET `url` and return the raw body. Non-2xx status is an error.
pub fn fetch_bytes(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    validate(url)?;
    let curl_err = |source: curl::Error| FetchError::Curl {
        url: url.to_string(),
        source,
    };

    let mut body = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.get(true).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(opts.max_redirections).map_err(curl_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(curl_err)?;
    easy.timeout(opts.timeout).map_err(curl_err)?;

    tracing::debug!(url, "GET");
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        tracing::warn!(url, code, "non-success status");
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }
    tracing::debug!(url, code, bytes = body.len(), "GET finished");
    Ok(body)
}
