use anyhow::Result;
use bytes::Bytes;
use para_core::Context;
use para_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::env;
use std::time::Duration;

/// Asks a Para server for its version through a tuned reqwest client.
///
/// Usage: `cargo run --example custom_client -- http://localhost:8080`
#[tokio::main]
async fn main() -> Result<()> {
    let endpoint = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://paraio.com".to_string());

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("para-client-example/0.1")
        .build()?;
    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let req = http::Request::builder()
        .method("GET")
        .uri(format!("{}/v1/", endpoint.trim_end_matches('/')))
        .header("Authorization", "Anonymous app:para")
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("status: {}", resp.status());
            println!("body: {}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => eprintln!("request failed: {e}"),
    }

    Ok(())
}
