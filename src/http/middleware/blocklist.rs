//! Blocklist middleware.
//! Rejects clients whose address is in the current denylist snapshot.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::response::forbidden;
use crate::observability::metrics;
use crate::security::gate::Gate;

/// Requires the router to be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`; without a peer
/// address the `ConnectInfo` extractor rejects the request with a 500.
pub async fn blocklist_middleware(
    State(gate): State<Gate>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_identifier(&addr);

    if gate.is_blocked(&client) {
        tracing::warn!(client = %client, path = %request.uri().path(), "Request blocked");
        metrics::record_blocked();
        return forbidden();
    }

    metrics::record_allowed();
    next.run(request).await
}

/// The denylist key for a peer: its IP without the port.
///
/// IPv6 peers yield the bare address (`2001:db8::1`, no brackets) and
/// IPv4-mapped IPv6 peers yield their dotted IPv4 form.
pub fn client_identifier(addr: &SocketAddr) -> String {
    addr.ip().to_canonical().to_string()
}
