//! Request tracking middleware
//!
//! Generates a request ID for requests that arrive without one, echoes it on
//! the response, and hides credentials from the trace output.

use http::header::{self, HeaderName};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::config::RequestTrackingConfig;
use crate::ids::MakeTypedRequestId;

/// Default request ID header
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sensitive headers that should be masked in logs
pub fn sensitive_headers() -> Vec<HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::PROXY_AUTHORIZATION,
        header::COOKIE,
        header::SET_COOKIE,
        HeaderName::from_static("x-api-key"),
        HeaderName::from_static("x-auth-token"),
    ]
}

/// Header carrying the request ID, falling back to `x-request-id` when the
/// configured name is not a valid header name
pub fn request_id_header(config: &RequestTrackingConfig) -> HeaderName {
    HeaderName::try_from(config.request_id_header.as_str()).unwrap_or_else(|e| {
        tracing::warn!(
            header = %config.request_id_header,
            "Invalid request ID header name ({}), using {}", e, REQUEST_ID_HEADER
        );
        HeaderName::from_static(REQUEST_ID_HEADER)
    })
}

/// Create a request ID layer that generates `req_`-prefixed UUIDv7 IDs
pub fn request_id_layer(config: &RequestTrackingConfig) -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::new(request_id_header(config), MakeTypedRequestId)
}

/// Create a request ID propagation layer
pub fn request_id_propagation_layer(config: &RequestTrackingConfig) -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header(config))
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(sensitive_headers())
}
