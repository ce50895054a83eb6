use thiserror::Error;

/// Boxed transport/decode cause carried by [`ApiError::Request`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong talking to population.io.
///
/// `Request` and `Service` are the two failure kinds of the request helper.
/// The remaining variants come from pulling a field out of a decoded body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request failed, or the body was not UTF-8 JSON.
    #[error("some critical errors were encountered in url:\n{url}\nbody:\n{body}")]
    Request {
        url: String,
        /// Raw body, lossily decoded. Empty when no body was received.
        body: String,
        #[source]
        source: BoxError,
    },

    /// The service answered with a non-success status; `detail` is its message.
    #[error("{detail}")]
    Service {
        url: String,
        status: u16,
        detail: String,
    },

    /// The decoded body has no such field.
    #[error("response from {url} has no field `{field}`")]
    MissingField { url: String, field: String },

    /// The field exists but has the wrong shape.
    #[error("field `{field}` in response from {url} has unexpected shape: {source}")]
    UnexpectedField {
        url: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// No per-country record matched the configured country.
    #[error("no record for country `{country}` in response from {url}")]
    CountryNotFound { url: String, country: String },

    /// Population mode outside 1..=3.
    #[error("invalid population mode {0}, expected 1 (total), 2 (male) or 3 (female)")]
    InvalidMode(u8),
}

/// Failure to parse a request parameter token (sex, diabetes status, mode).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} `{value}`, expected one of: {expected}")]
pub struct ParseParamError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
