#![allow(dead_code)]

use std::time::Duration;

use portico::{Collaborators, ModeConfig};
use serde_json::{json, Value};

/// Starts the demo server for `mode` in the background and waits for it to bind.
pub async fn spawn(mode: ModeConfig) -> String {
    let base = format!("http://{}", mode.addr());
    let app = portico_server::build_app(mode, Collaborators::in_memory())
        .await
        .expect("mode failed to start");

    tokio::spawn(async move {
        let _ = app.listen().await;
    });
    tokio::time::sleep(Duration::from_millis(300)).await;
    base
}

pub async fn graphql(
    client: &reqwest::Client,
    url: &str,
    query: &str,
    cookie: Option<&str>,
) -> reqwest::Response {
    let mut request = client.post(url).json(&json!({ "query": query }));
    if let Some(cookie) = cookie {
        request = request.header("cookie", cookie);
    }
    request.send().await.expect("request failed")
}

/// `name=value` pairs of every Set-Cookie header, joined for a Cookie header.
pub fn cookie_header(response: &reqwest::Response) -> String {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub async fn data(response: reqwest::Response) -> Value {
    let body: Value = response.json().await.expect("body was not JSON");
    body["data"].clone()
}
