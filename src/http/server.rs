//! HTTP server setup and the per-request gateway pipeline.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (request ID, trace,
//!   body limit, rate limit)
//! - Run the admission pipeline: classify → verify + propagate → route
//! - Forward requests to the owning backend and relay responses verbatim
//! - Map upstream failures to the gateway error envelope
//!
//! # Pipeline per request
//! ```text
//! Received → Classified → {Public → Routing}
//!                       | {Protected → Authenticating → {401 | Verified → HeaderInjection → Routing}}
//! Routing → {Forwarded(status) | 404 | 502 BackendUnavailable | 408 Timeout}
//! ```
//! No state is retried; each request is independent. All failure arms
//! converge on [`GatewayError`], so exactly one response is produced.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::PathAndQuery, Request, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::{strip_identity_headers, AuthError, TokenVerifier};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{RouteClassifier, RouteTable, RouteTableError};
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
///
/// Everything here is read-only after startup except the pooled client,
/// which is internally synchronized; request handling takes no locks.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<RouteClassifier>,
    pub table: Arc<RouteTable>,
    pub verifier: Arc<TokenVerifier>,
    pub client: Client<HttpConnector, Body>,
    pub request_timeout: Duration,
}

/// HTTP server for the API gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compile the configuration into a ready-to-run server.
    pub fn new(config: GatewayConfig) -> Result<Self, RouteTableError> {
        let classifier = Arc::new(RouteClassifier::new(&config.auth.public_routes));
        let table = Arc::new(RouteTable::from_config(&config.services)?);
        let verifier = Arc::new(TokenVerifier::new(&config.auth.jwt_secret));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            classifier,
            table,
            verifier,
            client,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let rate_limiter = Arc::new(RateLimiterState::new(config.rate_limit.clone()));

        let router = Router::new()
            .route("/health", get(health_handler))
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(middleware::from_fn_with_state(
                rate_limiter,
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid));

        Ok(Self { router })
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "gateway listening");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }
}

/// Admission and forwarding pipeline for every non-health request.
async fn gateway_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    // Identity headers are gateway-set only; drop spoofed copies before
    // anything downstream can see them.
    strip_identity_headers(request.headers_mut());

    if !state.classifier.is_public(&path) {
        let authorization = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match state.verifier.verify(authorization.as_deref()) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.id, path = %path, "request authenticated");
                identity.apply(request.headers_mut());
            }
            Err(e) => {
                if e == AuthError::ServerMisconfigured {
                    tracing::error!(path = %path, "JWT secret is not configured");
                } else {
                    tracing::debug!(path = %path, error = %e, "authentication rejected");
                }
                metrics::record_auth_failure(e.kind());
                let response = GatewayError::Auth(e).into_response();
                metrics::record_request(&method, response.status().as_u16(), "none", start);
                return response;
            }
        }
    }

    let target = match state.table.resolve(&path) {
        Some(t) => t,
        None => {
            tracing::warn!(path = %path, "no route matched");
            metrics::record_request(&method, 404, "none", start);
            return GatewayError::RouteNotFound.into_response();
        }
    };

    // Rewrite scheme and authority only; path and query reach the backend
    // byte-identical to what arrived at the mount point.
    let mut uri_parts = request.uri().clone().into_parts();
    uri_parts.scheme = Some(target.scheme.clone());
    uri_parts.authority = Some(target.authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    match Uri::from_parts(uri_parts) {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => {
            tracing::error!(service = %target.name, error = %e, "failed to build upstream URI");
            metrics::record_request(&method, 500, &target.name, start);
            return GatewayError::Internal.into_response();
        }
    }

    tracing::debug!(service = %target.name, uri = %request.uri(), "forwarding request");

    match tokio::time::timeout(state.request_timeout, state.client.request(request)).await {
        Ok(Ok(response)) => {
            let status = response.status();
            metrics::record_request(&method, status.as_u16(), &target.name, start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Ok(Err(e)) => {
            // Raw connection diagnostics stay in the log; the caller only
            // learns which service failed.
            tracing::error!(service = %target.name, error = %e, "upstream request failed");
            metrics::record_request(&method, 502, &target.name, start);
            GatewayError::BackendUnavailable {
                service: target.name.clone(),
            }
            .into_response()
        }
        Err(_) => {
            tracing::warn!(
                service = %target.name,
                timeout_secs = state.request_timeout.as_secs(),
                "upstream deadline expired"
            );
            metrics::record_request(&method, 408, &target.name, start);
            GatewayError::Timeout.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    success: bool,
    message: String,
    services: Vec<HealthService>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct HealthService {
    name: String,
    mount_prefix: String,
    origin: String,
}

/// Liveness endpoint. Always 200 while the process runs; reports the
/// configured backends without probing them.
async fn health_handler(State(state): State<AppState>) -> Json<HealthBody> {
    let services = state
        .table
        .targets()
        .iter()
        .map(|t| HealthService {
            name: t.name.clone(),
            mount_prefix: t.mount_prefix.clone(),
            origin: format!("{}://{}", t.scheme, t.authority),
        })
        .collect();

    Json(HealthBody {
        success: true,
        message: "Gateway is running".to_string(),
        services,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
