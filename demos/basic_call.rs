//! Basic example: one shared client, a GET, a POST with per-call options, and
//! typed error handling.
//!
//! Run with: `cargo run --example basic_call`

use outbound::{CallOptions, Client, Error};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

/// A collaborator that receives the client instead of reaching for a global one.
struct DigestService {
    api: Client,
}

impl DigestService {
    async fn latest_title(&self) -> Result<String, Error> {
        let post = self
            .api
            .get::<Post>("/posts/1", CallOptions::new().retries(2))
            .await?;
        Ok(post.data.title.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("outbound=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .timeout(Duration::from_secs(10))
        .default_header("User-Agent", "outbound-demo/0.1")?
        .build()?;

    println!("=== GET Request Example ===");
    let digests = DigestService {
        api: client.clone(),
    };
    println!("Latest title: {}", digests.latest_title().await?);
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let options = CallOptions::new()
        .timeout(Duration::from_secs(5))
        .retries(1)
        .retry_delay(Duration::from_millis(250));
    let response = client
        .post::<_, Post>("/posts", Some(&new_post), options)
        .await?;

    println!("Created post ID: {}", response.data.id);
    println!("Status: {} {}", response.status.as_u16(), response.status_text);
    println!("Request latency: {:?}", response.latency);
    println!("Content-Type: {:?}", response.header("content-type"));
    println!("Was retried: {}", response.was_retried());
    println!();

    println!("=== Error Handling Example ===");
    match client
        .get::<Post>("/posts/does-not-exist", CallOptions::new().retries(3))
        .await
    {
        Ok(post) => println!("Unexpected post: {:?}", post.data),
        Err(Error::HttpError { status, message, .. }) => {
            println!("Permanent failure ({}), not retried: {}", status, message)
        }
        Err(Error::Timeout { timeout_ms }) => println!("Timed out after {}ms", timeout_ms),
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
