//! Cross-origin policy: any loopback origin, whatever its port.
//!
//! Notebook front ends run on localhost but not always on the same port.

use axum::http::{header, request::Parts, HeaderValue, Method, Uri};
use std::net::IpAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _request: &Parts| is_loopback_origin(origin),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn is_loopback_origin(origin: &HeaderValue) -> bool {
    let Some(uri) = origin.to_str().ok().and_then(|s| s.parse::<Uri>().ok()) else {
        return false;
    };

    if !matches!(uri.scheme_str(), Some("http") | Some("https")) {
        return false;
    }

    match uri.host() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
