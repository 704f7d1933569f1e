//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{body::Body, http::Request, Json, Router};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use api_gateway::config::{GatewayConfig, ServiceConfig};
use api_gateway::{HttpServer, Shutdown};

/// Start an echo backend that reports the request it received as JSON.
pub async fn spawn_echo_backend() -> SocketAddr {
    spawn_backend_with_delay(Duration::ZERO).await
}

/// Start an echo backend that sleeps before answering.
#[allow(dead_code)]
pub async fn spawn_backend_with_delay(delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(move |request: Request<Body>| async move {
        tokio::time::sleep(delay).await;
        echo(request).await
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn echo(request: Request<Body>) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, 1024 * 1024)
        .await
        .unwrap_or_default();

    let headers: serde_json::Map<String, Value> = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.to_string(), Value::String(v.to_string())))
        })
        .collect();

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Gateway config with a single "auth" service mounted at /api/authz.
pub fn single_service_config(backend: SocketAddr, secret: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.jwt_secret = secret.to_string();
    config.services.push(ServiceConfig {
        name: "auth".to_string(),
        mount_prefix: "/api/authz".to_string(),
        origin: format!("http://{backend}"),
    });
    config
}

/// Spawn the gateway on an ephemeral port; returns its address and the
/// shutdown handle keeping it alive.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(config).expect("gateway config should compile");

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Mint an HS256 token with a nested user object.
pub fn mint_token(secret: &str, user: Value, exp_offset_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + exp_offset_secs;
    encode(
        &Header::default(),
        &json!({"exp": exp, "user": user}),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
