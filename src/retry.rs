//! Failure classification and the retry decision.
//!
//! The client consults [`decide`] after every failed attempt. Retries use a fixed
//! delay; there is no backoff growth and no jitter.

use crate::Error;

/// Whether a failure may succeed on another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Retrying cannot help (4xx, decode and pre-flight errors).
    Permanent,
    /// Another attempt may succeed (timeouts, transport failures, non-4xx HTTP errors).
    Retryable,
}

/// Classifies an error. Never fails.
///
/// # Examples
///
/// ```
/// use outbound::retry::{classify, Classification};
/// use outbound::Error;
///
/// assert_eq!(classify(&Error::Timeout { timeout_ms: 50 }), Classification::Retryable);
/// ```
pub fn classify(error: &Error) -> Classification {
    match error {
        Error::HttpError { status, .. } if status.is_client_error() => Classification::Permanent,
        Error::HttpError { .. } | Error::Timeout { .. } | Error::Transport(_) => {
            Classification::Retryable
        }
        Error::Decode { .. }
        | Error::Configuration(_)
        | Error::Serialization(_)
        | Error::InvalidUrl(_) => Classification::Permanent,
    }
}

/// What the client does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the retry delay, then run the next attempt.
    Retry,
    /// Surface this error to the caller.
    Fail,
}

/// Decides the next step after attempt `attempt` (0-based) failed with `error`.
pub fn decide(error: &Error, attempt: usize, max_retries: usize) -> RetryDecision {
    match classify(error) {
        Classification::Permanent => RetryDecision::Fail,
        Classification::Retryable if attempt >= max_retries => RetryDecision::Fail,
        Classification::Retryable => RetryDecision::Retry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};

    fn http(code: u16) -> Error {
        Error::http(
            StatusCode::from_u16(code).unwrap(),
            String::new(),
            String::new(),
            HeaderMap::new(),
        )
    }

    #[test]
    fn client_errors_are_permanent() {
        for code in [400, 401, 404, 409, 422, 429, 499] {
            assert_eq!(classify(&http(code)), Classification::Permanent, "{code}");
        }
    }

    #[test]
    fn statuses_outside_the_4xx_band_are_retryable() {
        for code in [500, 502, 503, 599, 304, 101] {
            assert_eq!(classify(&http(code)), Classification::Retryable, "{code}");
        }
    }

    #[test]
    fn timeouts_and_transport_failures_are_retryable() {
        assert_eq!(
            classify(&Error::Timeout { timeout_ms: 10 }),
            Classification::Retryable
        );
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert_eq!(
            classify(&Error::Transport(Box::new(io))),
            Classification::Retryable
        );
    }

    #[test]
    fn decode_errors_are_permanent() {
        let err = Error::Decode {
            raw_body: "x".to_string(),
            message: "expected value".to_string(),
            status: StatusCode::OK,
        };
        assert_eq!(classify(&err), Classification::Permanent);
    }

    #[test]
    fn permanent_errors_fail_even_with_retries_left() {
        assert_eq!(decide(&http(404), 0, 3), RetryDecision::Fail);
    }

    #[test]
    fn retryable_errors_retry_until_the_last_attempt() {
        let err = http(500);
        assert_eq!(decide(&err, 0, 2), RetryDecision::Retry);
        assert_eq!(decide(&err, 1, 2), RetryDecision::Retry);
        assert_eq!(decide(&err, 2, 2), RetryDecision::Fail);
    }

    #[test]
    fn zero_retries_never_retries() {
        assert_eq!(
            decide(&Error::Timeout { timeout_ms: 1 }, 0, 0),
            RetryDecision::Fail
        );
    }
}
