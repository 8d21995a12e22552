//! The envelope returned by a successful call.
//!
//! [`Response`] carries the decoded body together with the status, headers and raw
//! text of the response that produced it, plus how long the call took and how
//! many attempts it needed.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful response.
///
/// # Type Parameters
///
/// * `T` - The type the body was decoded into
///
/// # Examples
///
/// ```no_run
/// use outbound::{CallOptions, Client};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Tenant {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), outbound::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let response = client.get::<Tenant>("/tenants/7", CallOptions::default()).await?;
///
/// println!("Tenant: {}", response.data.name);
/// println!("Status: {} {}", response.status, response.status_text);
/// println!("Took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response data.
    pub data: T,

    /// The raw response body as text.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The server's reason phrase, else the canonical one for `status`.
    pub status_text: String,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from the start of the first attempt until this response arrived.
    pub latency: Duration,

    /// Number of attempts the call needed (1 when no retry happened).
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status_text: status_text(status, None),
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Replaces the status text with the one the server reported, if any.
    pub fn with_status_text(mut self, reported: Option<&str>) -> Self {
        self.status_text = status_text(self.status, reported);
        self
    }

    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use outbound::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     42,
    ///     "42".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    ///     1,
    /// );
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// assert_eq!(string_response.status_text, "OK");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the call needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name, if present and valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// # use outbound::Response;
    /// # use http::{HeaderMap, StatusCode, HeaderValue};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = Response::new(
    ///     (),
    ///     String::new(),
    ///     StatusCode::OK,
    ///     headers,
    ///     Duration::from_millis(100),
    ///     1,
    /// );
    ///
    /// assert_eq!(response.header("Content-Type"), Some("application/json"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// Picks the reported reason phrase when it is non-empty, else the canonical one.
pub(crate) fn status_text(status: StatusCode, reported: Option<&str>) -> String {
    match reported.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => status.canonical_reason().unwrap_or_default().to_string(),
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_status_text_wins_over_canonical() {
        assert_eq!(status_text(StatusCode::OK, Some("All Good")), "All Good");
        assert_eq!(status_text(StatusCode::OK, Some("")), "OK");
        assert_eq!(status_text(StatusCode::OK, None), "OK");
    }

    #[test]
    fn unknown_status_without_report_has_empty_text() {
        let status = StatusCode::from_u16(520).unwrap();
        assert_eq!(status_text(status, None), "");
        assert_eq!(
            status_text(status, Some("Web Server Returned an Unknown Error")),
            "Web Server Returned an Unknown Error"
        );
    }
}
