//! Error types for outbound HTTP calls.
//!
//! Every finished call ends in either a [`Response`](crate::Response) or exactly one
//! [`Error`]. The first four variants are the outcomes an attempt can produce; the
//! remaining ones are raised before the first attempt starts and are never retried.

use http::{HeaderMap, StatusCode};

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for outbound calls.
///
/// Callers are expected to branch on the variant, not on the message text.
///
/// # Examples
///
/// ```no_run
/// use outbound::{CallOptions, Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().timeout_ms(1_000).build()?;
///
/// match client
///     .get::<serde_json::Value>("https://api.example.com/status", CallOptions::default())
///     .await
/// {
///     Ok(response) => println!("Success: {:?}", response.data),
///     Err(Error::Timeout { timeout_ms }) => eprintln!("gave up after {timeout_ms}ms"),
///     Err(Error::HttpError { status, raw_body, .. }) => {
///         eprintln!("HTTP error {}: {}", status, raw_body);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The attempt deadline fired before the response was complete.
    ///
    /// The in-flight transport future is dropped when this happens, which closes
    /// the underlying connection.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline that was in effect for the attempt, in milliseconds.
        timeout_ms: u64,
    },

    /// The server answered with a non-2xx status code.
    ///
    /// The body is read as text and kept verbatim; it is never decoded as JSON.
    #[error("{message}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The server's reason phrase, else the canonical one (empty when neither exists)
        status_text: String,
        /// `HTTP {status}: {status_text}`, or `HTTP {status}` without a status text
        message: String,
        /// The raw response body
        raw_body: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// A network-level failure (DNS lookup, refused or reset connection, etc.).
    #[error("Network error: {0}")]
    Transport(#[source] BoxError),

    /// A 2xx response declared as JSON could not be decoded into the requested type.
    #[error("Failed to decode response (status {status}): {message}")]
    Decode {
        /// The raw response body that failed to decode
        raw_body: String,
        /// The decoder's error message
        message: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Invalid configuration was provided (bad header name or value, transport setup).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request body could not be encoded as JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// The call target is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Builds an [`Error::HttpError`] from a status and the body read as text.
    pub(crate) fn http(
        status: StatusCode,
        status_text: String,
        raw_body: String,
        headers: HeaderMap,
    ) -> Self {
        let message = if status_text.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            format!("HTTP {}: {}", status.as_u16(), status_text)
        };
        Error::HttpError {
            message,
            status,
            status_text,
            raw_body,
            headers,
        }
    }

    /// Returns `true` if another attempt may succeed.
    ///
    /// Timeouts, transport failures and HTTP errors outside the 4xx band are
    /// retryable. 4xx responses, decode failures and pre-flight errors are not.
    ///
    /// # Examples
    ///
    /// ```
    /// use outbound::Error;
    ///
    /// assert!(Error::Timeout { timeout_ms: 1_000 }.is_retryable());
    /// assert!(!Error::Configuration("bad header".to_string()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        crate::retry::classify(self) == crate::retry::Classification::Retryable
    }

    /// Returns `true` for [`Error::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error carries one.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_body, .. } => Some(raw_body),
            Error::Decode { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }
}

/// A specialized `Result` type for outbound calls.
pub type Result<T> = std::result::Result<T, Error>;
