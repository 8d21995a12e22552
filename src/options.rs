//! Per-call overrides.

use http::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// Optional overrides for a single call.
///
/// Every field left unset falls back to the client's configured default.
///
/// # Examples
///
/// ```
/// use outbound::CallOptions;
/// use std::time::Duration;
///
/// let options = CallOptions::new()
///     .timeout(Duration::from_secs(5))
///     .retries(2)
///     .retry_delay(Duration::from_millis(200))
///     .header("Authorization", "Bearer token")
///     .unwrap();
///
/// assert_eq!(options.retries, Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Deadline for each attempt of this call.
    pub timeout: Option<Duration>,

    /// Headers merged over the client defaults; these win on conflicting keys.
    pub headers: HeaderMap,

    /// Retries after the first attempt.
    pub retries: Option<usize>,

    /// Fixed pause between attempts.
    pub retry_delay: Option<Duration>,
}

impl CallOptions {
    /// Creates empty options; every setting falls back to the client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the per-attempt deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the per-attempt deadline, in milliseconds.
    pub fn timeout_ms(self, timeout_ms: u64) -> Self {
        self.timeout(Duration::from_millis(timeout_ms))
    }

    /// Adds a header to this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets how many times a retryable failure is retried.
    pub fn retries(mut self, retries: usize) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Overrides the pause between attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }
}

pub(crate) fn parse_header(
    name: &str,
    value: &str,
) -> Result<(HeaderName, HeaderValue), crate::Error> {
    let name = HeaderName::try_from(name)
        .map_err(|e| crate::Error::Configuration(format!("Invalid header name: {}", e)))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| crate::Error::Configuration(format!("Invalid header value: {}", e)))?;
    Ok((name, value))
}
