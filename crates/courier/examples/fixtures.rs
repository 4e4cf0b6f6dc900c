//! Running endpoints against canned fixtures, both awaited and streamed
//!
//! Nothing here touches the network: the client is built over an
//! `HttpTransport` but every endpoint is mocked.
//!
//! Run with: `cargo run -p courier --example fixtures`

use std::sync::Arc;

use courier::{ApiClient, Empty, EndpointDescriptor, HttpMethod, HttpTransport};
use futures::StreamExt;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    display_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier=debug".into()),
        )
        .init();

    let client = ApiClient::new(Arc::new(HttpTransport::new()?));

    let endpoint = EndpointDescriptor::builder()
        .base_url("https://api.example.com")
        .version("v1")
        .path("users/42")
        .use_fixture(true)
        .fixture(r#"{"id":"42","displayName":"Ada Lovelace"}"#)
        .build()?;

    let user: User = client
        .request_once(&endpoint, None::<&Empty>, HttpMethod::Get)
        .await?;
    println!("awaited:  {} ({})", user.display_name, user.id);

    let mut stream = client.request_stream::<_, Empty, User>(&endpoint, None, HttpMethod::Get);
    while let Some(result) = stream.next().await {
        let user = result?;
        println!("streamed: {} ({})", user.display_name, user.id);
    }

    let envelope = EndpointDescriptor::builder()
        .base_url("https://api.example.com")
        .path("me")
        .use_fixture(true)
        .fixture(r#"{"status":"error","error":{"title":"Forbidden","message":"token expired"}}"#)
        .build()?;

    match client
        .request_unwrapped::<_, Empty, User>(&envelope, None, HttpMethod::Get)
        .await
    {
        Ok(user) => println!("unexpected user {}", user.id),
        Err(e) => println!("envelope error: {}", e.diagnostic_message().unwrap_or("unknown")),
    }

    Ok(())
}
