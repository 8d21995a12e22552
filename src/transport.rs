//! The transport capability consumed by the client.
//!
//! A [`Transport`] issues one HTTP request and yields the status, headers and the
//! fully-read body. The client bounds every call to [`Transport::send`] with a
//! deadline and drops the returned future when it fires, so implementations must
//! release their connection on drop (as `reqwest` does).

use crate::error::BoxError;
use http::{HeaderMap, Method, StatusCode};
use std::future::Future;
use url::Url;

/// A fully resolved request for a single attempt.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: Method,
    /// The absolute target URL.
    pub url: Url,
    /// The merged request headers.
    pub headers: HeaderMap,
    /// Optional encoded request body.
    pub body: Option<Vec<u8>>,
}

/// What a transport hands back for one request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Reason phrase reported by the server, when the backend exposes one.
    pub status_text: Option<String>,
    /// Response headers as received.
    pub headers: HeaderMap,
    /// The complete response body.
    pub body: Vec<u8>,
}

/// Pluggable HTTP backend.
///
/// # Examples
///
/// ```
/// use outbound::{BoxError, HttpRequest, HttpResponse, Transport};
/// use http::{HeaderMap, StatusCode};
/// use std::future::Future;
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     fn send(
///         &self,
///         _request: HttpRequest,
///     ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send {
///         async {
///             Ok(HttpResponse {
///                 status: StatusCode::OK,
///                 status_text: None,
///                 headers: HeaderMap::new(),
///                 body: b"ok".to_vec(),
///             })
///         }
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and reads the whole response.
    ///
    /// Only network-level failures are errors; any status code is a response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send;
}

/// Default transport backed by a shared `reqwest::Client`.
///
/// Has no `Default` impl. Use [`ReqwestTransport::new`], or
/// [`ClientBuilder::build`](crate::ClientBuilder::build), which reports a failing
/// backend as [`Error::Configuration`](crate::Error::Configuration).
///
/// ```compile_fail
/// let transport = outbound::ReqwestTransport::default();
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest::Client`.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        async move {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok::<_, BoxError>(HttpResponse {
                status,
                // reqwest does not expose the wire reason phrase.
                status_text: None,
                headers,
                body,
            })
        }
    }
}
