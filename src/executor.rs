//! A single timed attempt.
//!
//! The transport future runs under `tokio::time::timeout`. When the deadline fires
//! the future is dropped, which aborts the in-flight request and closes its
//! connection. The deadline timer itself is owned by the timeout future, so it is
//! released on every exit path of the attempt.

use crate::{
    decode::decode_body, response::status_text, Error, HttpRequest, Response, Result, Transport,
};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Runs one attempt and turns its outcome into a response or a typed error.
///
/// `started` is the start of the whole call and only feeds the reported latency.
pub(crate) async fn execute_attempt<T, Res>(
    transport: &T,
    request: HttpRequest,
    timeout: Duration,
    attempt: usize,
    started: Instant,
) -> Result<Response<Res>>
where
    T: Transport,
    Res: DeserializeOwned,
{
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        method = %request.method,
        url = %request.url,
        attempt = attempt,
        timeout_ms = timeout_ms,
        "Executing HTTP request"
    );

    let response = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(source)) => return Err(Error::Transport(source)),
        Err(_elapsed) => {
            tracing::warn!(timeout_ms = timeout_ms, attempt = attempt, "Request timed out");
            return Err(Error::Timeout { timeout_ms });
        }
    };

    let latency = started.elapsed();
    let status = response.status;
    let raw_body = String::from_utf8_lossy(&response.body).into_owned();

    tracing::info!(
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        attempt = attempt,
        "Received HTTP response"
    );

    if !status.is_success() {
        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                response = %raw_body,
                "Client error (4xx)"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                response = %raw_body,
                "Unsuccessful status"
            );
        }
        let status_text = status_text(status, response.status_text.as_deref());
        return Err(Error::http(status, status_text, raw_body, response.headers));
    }

    let data: Res = decode_body(status, &response.headers, &response.body)?;
    Ok(Response::new(
        data,
        raw_body,
        status,
        response.headers,
        latency,
        attempt + 1,
    )
    .with_status_text(response.status_text.as_deref()))
}
