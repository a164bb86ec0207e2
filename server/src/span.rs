use std::net::IpAddr;

use axum::extract::Query;
use http::Request;
use serde::Deserialize;
use tracing::Span;

/// The candidate of an availability check, when the request carries one in its query.
#[derive(Deserialize)]
struct Candidate {
    username: Option<String>,
}

pub fn span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("<unknown-request-id>");

    let client_ip = request
        .extensions()
        .get::<Option<IpAddr>>()
        .copied()
        .flatten();

    let username = Query::<Candidate>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(candidate)| candidate.username);

    // error level so the span survives `RUST_LOG=warn` and still wraps
    // whatever a failing check logs further down
    tracing::error_span!(
        "request",
        client_ip = client_ip.map(tracing::field::display),
        request_id,
        method = %request.method(),
        path = request.uri().path(),
        username = username.as_deref(),
    )
}
