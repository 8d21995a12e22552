//! Client-level defaults and their resolution against per-call options.

use crate::CallOptions;
use http::HeaderMap;
use std::time::Duration;
use url::Url;

/// Default attempt deadline when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

/// Immutable defaults owned by one [`Client`](crate::Client).
///
/// Built by [`ClientBuilder`](crate::ClientBuilder) and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline applied to each attempt.
    pub timeout: Duration,
    /// Headers sent with every request.
    pub default_headers: HeaderMap,
    /// Retries after the first attempt (0 = single attempt).
    pub max_retries: usize,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
    /// Optional base that relative call targets are joined onto.
    pub base_url: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
            max_retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            base_url: None,
        }
    }
}

/// The settings one call actually runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    /// Deadline for each attempt of the call.
    pub timeout: Duration,
    /// Client defaults, method headers and call headers, merged in that order.
    pub headers: HeaderMap,
    /// Retries after the first attempt.
    pub max_retries: usize,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
}

impl ClientConfig {
    /// Merges these defaults with per-call overrides.
    ///
    /// Headers are layered as client defaults, then `method_headers`, then the
    /// call's own headers; a later layer replaces earlier values for the same key.
    pub fn resolve(&self, options: &CallOptions, method_headers: &HeaderMap) -> EffectiveConfig {
        let mut headers = self.default_headers.clone();
        merge_headers(&mut headers, method_headers);
        merge_headers(&mut headers, &options.headers);

        EffectiveConfig {
            timeout: options.timeout.unwrap_or(self.timeout),
            headers,
            max_retries: options.retries.unwrap_or(self.max_retries),
            retry_delay: options.retry_delay.unwrap_or(self.retry_delay),
        }
    }

    /// Turns a call target into an absolute URL.
    pub fn target_url(&self, target: &str) -> crate::Result<Url> {
        match &self.base_url {
            Some(base) => Ok(base.join(target)?),
            None => Ok(Url::parse(target)?),
        }
    }
}

/// Override-by-key merge: every key present in `overrides` replaces all values of
/// that key in `base`.
pub fn merge_headers(base: &mut HeaderMap, overrides: &HeaderMap) {
    for key in overrides.keys() {
        base.remove(key);
    }
    for (key, value) in overrides {
        base.append(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{header, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn absent_options_fall_back_to_client_defaults() {
        let config = ClientConfig {
            timeout: Duration::from_millis(500),
            default_headers: headers(&[("x-app", "admin")]),
            ..ClientConfig::default()
        };

        let effective = config.resolve(&CallOptions::default(), &HeaderMap::new());

        assert_eq!(effective.timeout, Duration::from_millis(500));
        assert_eq!(effective.max_retries, 0);
        assert_eq!(effective.retry_delay, DEFAULT_RETRY_DELAY);
        assert_eq!(effective.headers, headers(&[("x-app", "admin")]));
    }

    #[test]
    fn call_options_win_over_every_other_layer() {
        let config = ClientConfig {
            default_headers: headers(&[("x-app", "admin"), ("content-type", "text/plain")]),
            ..ClientConfig::default()
        };
        let method = headers(&[("content-type", "application/json")]);
        let options = CallOptions::new()
            .timeout(Duration::from_millis(250))
            .retries(3)
            .retry_delay(Duration::from_millis(10))
            .header("X-App", "mail")
            .unwrap();

        let effective = config.resolve(&options, &method);

        assert_eq!(effective.timeout, Duration::from_millis(250));
        assert_eq!(effective.max_retries, 3);
        assert_eq!(effective.retry_delay, Duration::from_millis(10));
        assert_eq!(effective.headers.get("x-app").unwrap(), "mail");
        assert_eq!(
            effective.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(effective.headers.len(), 2);
    }

    #[test]
    fn method_headers_override_defaults() {
        let config = ClientConfig {
            default_headers: headers(&[("content-type", "text/plain")]),
            ..ClientConfig::default()
        };
        let method = headers(&[("content-type", "application/json")]);

        let effective = config.resolve(&CallOptions::default(), &method);

        assert_eq!(
            effective.headers.get_all(header::CONTENT_TYPE).iter().count(),
            1
        );
        assert_eq!(
            effective.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn target_url_joins_relative_paths_onto_base() {
        let config = ClientConfig {
            base_url: Some(Url::parse("https://api.example.com/v1/").unwrap()),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.target_url("users/7").unwrap().as_str(),
            "https://api.example.com/v1/users/7"
        );
        assert_eq!(
            config.target_url("https://other.example.com/x").unwrap().as_str(),
            "https://other.example.com/x"
        );
    }

    #[test]
    fn target_url_without_base_requires_absolute() {
        let config = ClientConfig::default();
        assert!(matches!(
            config.target_url("/relative"),
            Err(crate::Error::InvalidUrl(_))
        ));
    }
}
