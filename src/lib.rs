//! # Outbound - a bounded, retrying HTTP client
//!
//! Outbound wraps every external HTTP call an application makes (completion
//! services, mail and calendar providers, generic APIs) behind one small call
//! surface. Each attempt runs under its own deadline, failures are classified into
//! a closed set of typed errors, and retryable failures are retried after a fixed
//! delay.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outbound::{CallOptions, Client};
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize)]
//! struct CreateEvent {
//!     title: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Event {
//!     id: String,
//!     title: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), outbound::Error> {
//!     // Built once at start-up and handed to whoever needs it.
//!     let calendar = Client::builder()
//!         .base_url("https://calendar.example.com/v1/")?
//!         .timeout(Duration::from_secs(10))
//!         .default_header("Authorization", "Bearer token")?
//!         .build()?;
//!
//!     let event = calendar
//!         .get::<Event>("events/42", CallOptions::default())
//!         .await?;
//!     println!("Event: {}", event.data.title);
//!
//!     let new_event = CreateEvent { title: "Standup".to_string() };
//!     let created = calendar
//!         .post::<_, Event>("events", Some(&new_event), CallOptions::new().retries(2))
//!         .await?;
//!     println!("Created {} after {} attempt(s)", created.data.id, created.attempts);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! A call ends in exactly one [`Response`] or one [`Error`]:
//!
//! - [`Error::Timeout`] - the attempt deadline fired; the request was aborted.
//! - [`Error::HttpError`] - a non-2xx status. 4xx is permanent, anything else is retried.
//! - [`Error::Transport`] - DNS or connection failure; retried.
//! - [`Error::Decode`] - a JSON body could not be decoded; surfaced immediately.
//!
//! When retries run out, the last observed error is returned.

mod client;
pub mod config;
mod decode;
mod error;
mod executor;
mod options;
mod response;
pub mod retry;
mod transport;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{BoxError, Error, Result};
pub use options::CallOptions;
pub use response::Response;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
