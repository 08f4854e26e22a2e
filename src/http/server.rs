//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the upstream forwarder as downstream handler
//! - Put the blocklist gate in front of it
//! - Wire up middleware (tracing, request timeout)
//! - Serve with peer addresses attached and drain on shutdown

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::response::bad_gateway;
use crate::security::Gate;

/// State for the upstream forwarder.
#[derive(Clone)]
pub struct UpstreamState {
    pub authority: Authority,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server fronting a single upstream with the blocklist gate.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    gate: Gate,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and gate.
    pub fn new(config: ProxyConfig, gate: Gate) -> Result<Self, axum::http::uri::InvalidUri> {
        let authority = Authority::from_str(&config.upstream.address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let downstream = Router::new()
            .route("/", any(forward_handler))
            .route("/{*path}", any(forward_handler))
            .with_state(UpstreamState { authority, client });

        let router = Self::build_router(&config, &gate, downstream);
        Ok(Self {
            router,
            config,
            gate,
        })
    }

    /// Wrap `downstream` with the gate and the outer middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ProxyConfig, gate: &Gate, downstream: Router) -> Router {
        gate.wrap(downstream).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server until `shutdown` fires, then stop the gate's refresh loop.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            blocklist = %self.gate.path().display(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        self.gate.shutdown().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Downstream handler: relays the request to the configured upstream.
async fn forward_handler(State(state): State<UpstreamState>, request: Request) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build upstream URI");
            return bad_gateway();
        }
    };

    match state.client.request(axum::http::Request::from_parts(parts, body)).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(e) => {
            tracing::error!(upstream = %state.authority, error = %e, "Upstream error");
            bad_gateway()
        }
    }
}
