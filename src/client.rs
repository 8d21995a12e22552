//! The client: public call surface and retry loop.
//!
//! The [`Client`] type is the entry point for outbound calls. Use
//! [`ClientBuilder`] to configure one, or [`Client::new`] for the common case of
//! a timeout plus default headers.

use crate::{
    config::ClientConfig,
    executor::execute_attempt,
    options::parse_header,
    retry::{decide, RetryDecision},
    CallOptions, Error, HttpRequest, ReqwestTransport, Response, Result, Transport,
};
use http::{header, HeaderMap, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An outbound HTTP client with per-attempt deadlines and fixed-delay retries.
///
/// A client holds only immutable configuration, so one instance can be cloned
/// cheaply and shared by any number of concurrent callers.
///
/// # Examples
///
/// ```no_run
/// use outbound::{CallOptions, Client, Response};
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
///
/// #[derive(Serialize)]
/// struct Prompt {
///     text: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Completion {
///     text: String,
/// }
///
/// # async fn example() -> Result<(), outbound::Error> {
/// let client = Client::builder()
///     .base_url("https://ai.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "admin-console/1.0")?
///     .build()?;
///
/// let prompt = Prompt { text: "Summarise today's mail".to_string() };
/// let options = CallOptions::new().retries(2).retry_delay(Duration::from_millis(500));
/// let completion: Response<Completion> = client
///     .post("/v1/complete", Some(&prompt), options)
///     .await?;
/// println!("{}", completion.data.text);
/// # Ok(())
/// # }
/// ```
pub struct Client<T = ReqwestTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
    config: ClientConfig,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client with a default timeout and default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use outbound::Client;
    ///
    /// # fn example() -> Result<(), outbound::Error> {
    /// let client = Client::new(10_000, [("Authorization", "Bearer abc")])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<I, K, V>(timeout_ms: u64, default_headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut builder = ClientBuilder::new().timeout_ms(timeout_ms);
        for (name, value) in default_headers {
            builder = builder.default_header(name, value)?;
        }
        builder.build()
    }
}

impl<T: Transport> Client<T> {
    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Makes a call: resolves the options, then runs attempts until one succeeds,
    /// a permanent error occurs, or the retries are used up.
    ///
    /// The error returned after exhausting retries is the last one observed.
    pub async fn call<Req, Res>(
        &self,
        method: Method,
        target: &str,
        body: Option<&Req>,
        options: CallOptions,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let config = &self.inner.config;
        let url = config.target_url(target)?;

        let mut method_headers = HeaderMap::new();
        let body = match body {
            Some(body) => {
                let encoded = serde_json::to_vec(body)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                method_headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                Some(encoded)
            }
            None => None,
        };

        let effective = config.resolve(&options, &method_headers);
        let started = Instant::now();
        let mut attempt = 0;

        loop {
            let request = HttpRequest {
                method: method.clone(),
                url: url.clone(),
                headers: effective.headers.clone(),
                body: body.clone(),
            };

            let error = match execute_attempt(
                &self.inner.transport,
                request,
                effective.timeout,
                attempt,
                started,
            )
            .await
            {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            tracing::warn!(
                error = %error,
                attempt = attempt + 1,
                method = %method,
                url = %url,
                "Request failed"
            );

            match decide(&error, attempt, effective.max_retries) {
                RetryDecision::Fail => return Err(error),
                RetryDecision::Retry => {
                    tracing::info!(
                        delay_ms = effective.retry_delay.as_millis(),
                        attempt = attempt + 1,
                        max_retries = effective.max_retries,
                        "Retrying request after delay"
                    );
                    tokio::time::sleep(effective.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Makes a GET request.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use outbound::{CallOptions, Client};
    ///
    /// # async fn example() -> Result<(), outbound::Error> {
    /// let client = Client::new(5_000, [("Accept", "application/json")])?;
    /// let status = client
    ///     .get::<serde_json::Value>("https://api.example.com/health", CallOptions::new().timeout_ms(1_000))
    ///     .await?;
    /// println!("{}", status.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<Res>(&self, target: &str, options: CallOptions) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.call::<(), Res>(Method::GET, target, None, options).await
    }

    /// Makes a POST request with an optional JSON body.
    pub async fn post<Req, Res>(
        &self,
        target: &str,
        body: Option<&Req>,
        options: CallOptions,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(Method::POST, target, body, options).await
    }

    /// Makes a PUT request with an optional JSON body.
    pub async fn put<Req, Res>(
        &self,
        target: &str,
        body: Option<&Req>,
        options: CallOptions,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(Method::PUT, target, body, options).await
    }

    /// Makes a PATCH request with an optional JSON body.
    pub async fn patch<Req, Res>(
        &self,
        target: &str,
        body: Option<&Req>,
        options: CallOptions,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.call(Method::PATCH, target, body, options).await
    }

    /// Makes a DELETE request.
    pub async fn delete<Res>(&self, target: &str, options: CallOptions) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.call::<(), Res>(Method::DELETE, target, None, options).await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use outbound::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), outbound::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://graph.example.com/v1.0/")?
///     .timeout(Duration::from_secs(15))
///     .max_retries(2)
///     .retry_delay(Duration::from_millis(250))
///     .default_header("User-Agent", "admin-console/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a base URL that relative call targets are joined onto.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.config.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.config.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the default per-attempt deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the default per-attempt deadline, in milliseconds.
    pub fn timeout_ms(self, timeout_ms: u64) -> Self {
        self.timeout(Duration::from_millis(timeout_ms))
    }

    /// Sets how many times a retryable failure is retried by default.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the default pause between attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Builds a client on top of the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(self.build_with_transport(ReqwestTransport::new(http)))
    }

    /// Builds a client that sends through the given transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Client<T> {
        Client {
            inner: Arc::new(ClientInner {
                transport,
                config: self.config,
            }),
        }
    }
}
