//! Synchronous client for the **population.io API (v1.0)**.
//!
//! The client owns the base URL and a pooled blocking HTTP client. Endpoint
//! types in [`crate::endpoints`] build their paths on top of it and call
//! [`Client::get_json`], which is the single place where requests are sent.
//!
//! ### Notes
//! - One attempt per request. There is no retry and no backoff.
//! - The body is decoded before the status is checked, so a non-2xx answer
//!   whose body is not JSON is reported as [`ApiError::Request`].
//! - Cloning a `Client` is cheap; clones share one connection pool.
//!
//! Typical usage:
//! ```no_run
//! # use popio::{Client, Sex};
//! let client = Client::default();
//! let rank = client
//!     .wp_rank("1990-05-17".parse()?, Sex::Female, "United Kingdom")
//!     .today()?;
//! println!("rank today: {rank}");
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::error::ApiError;
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Public endpoint of the service.
pub const DEFAULT_BASE_URL: &str = "http://api.population.io:80/1.0";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

/// Replace every space with `%20` so a free-text country name can sit in a
/// path segment. Nothing else is escaped.
///
/// ```
/// assert_eq!(popio::escape_spaces("United Kingdom"), "United%20Kingdom");
/// ```
pub fn escape_spaces(text: &str) -> String {
    text.replace(' ', "%20")
}

impl Client {
    /// Client talking to `base_url` instead of the public service. A trailing
    /// slash is dropped.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("popio/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Absolute URL for `path`, which must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// ### Errors
    /// - [`ApiError::Request`]: network failure, or a body that is not UTF-8
    ///   JSON. Carries the URL and the raw body.
    /// - [`ApiError::Service`]: non-success status. Carries the body's
    ///   `detail` message, or `HTTP <status>` when it has none.
    ///
    /// Any 2xx status counts as success, not only 200. A 2xx answer with an
    /// empty body (e.g. 204) is still an [`ApiError::Request`] since it is not JSON.
    pub fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| request_error(url, &[], e))?;
        let status = resp.status();
        let bytes = resp.bytes().map_err(|e| request_error(url, &[], e))?;

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| request_error(url, &bytes, e))?;
        let value: Value = serde_json::from_str(text)
            .map_err(|e| request_error(url, &bytes, e))?;

        if !status.is_success() {
            let detail = value
                .get("detail")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("HTTP {}", status));
            warn!("GET {} failed with {}: {}", url, status, detail);
            return Err(ApiError::Service {
                url: url.to_string(),
                status: status.as_u16(),
                detail,
            });
        }
        Ok(value)
    }

    /// GET `url` and pull out the value at JSON `pointer` (e.g. `/rank`).
    pub(crate) fn fetch_field<T: DeserializeOwned>(&self, url: &str, pointer: &str) -> Result<T> {
        let value = self.get_json(url)?;
        extract(value, pointer, url)
    }
}

fn request_error(url: &str, body: &[u8], source: impl Into<crate::error::BoxError>) -> ApiError {
    ApiError::Request {
        url: url.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source: source.into(),
    }
}

/// Take the value at `pointer` out of `value` and deserialize it.
pub(crate) fn extract<T: DeserializeOwned>(
    mut value: Value,
    pointer: &str,
    url: &str,
) -> Result<T> {
    let field = pointer.trim_start_matches('/').replace('/', ".");
    let found = value
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| ApiError::MissingField {
            url: url.to_string(),
            field: field.clone(),
        })?;
    serde_json::from_value(found).map_err(|source| ApiError::UnexpectedField {
        url: url.to_string(),
        field,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_spaces_only_touches_spaces() {
        assert_eq!(escape_spaces("United Kingdom"), "United%20Kingdom");
        assert_eq!(escape_spaces("Côte d'Ivoire"), "Côte%20d'Ivoire");
        assert_eq!(escape_spaces("a  b"), "a%20%20b");
        assert_eq!(escape_spaces("Brazil"), "Brazil");
        assert_eq!(escape_spaces("x/y?z#%"), "x/y?z#%");
    }

    #[test]
    fn with_base_url_trims_trailing_slash() {
        let c = Client::with_base_url("http://localhost:9999/1.0/");
        assert_eq!(c.base_url, "http://localhost:9999/1.0");
        assert_eq!(c.url("/countries"), "http://localhost:9999/1.0/countries");
        assert_eq!(Client::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn extract_reads_nested_and_indexed_fields() {
        let v = json!({"total_population": [{"population": 10}, {"population": 11}]});
        let n: u64 = extract(v.clone(), "/total_population/1/population", "u").unwrap();
        assert_eq!(n, 11);

        let err = extract::<u64>(v.clone(), "/total_population/2/population", "u").unwrap_err();
        match err {
            ApiError::MissingField { field, url } => {
                assert_eq!(field, "total_population.2.population");
                assert_eq!(url, "u");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = extract::<u64>(v, "/total_population", "u").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedField { .. }));
    }
}
