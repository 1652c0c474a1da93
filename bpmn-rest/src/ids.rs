//! Request identifiers
//!
//! Request IDs are `req_` followed by a UUIDv7 in simple (hyphenless) form,
//! so they sort by creation time in logs:
//!
//! ```rust
//! use bpmn_rest::ids::RequestId;
//!
//! let id = RequestId::new();
//! assert!(id.as_str().starts_with("req_"));
//! ```

use std::fmt;
use std::str::FromStr;

use http::Request;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};
use uuid::Uuid;

/// A prefixed, time-sortable request identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// The prefix used for request IDs
    pub const PREFIX: &'static str = "req";

    #[must_use]
    pub fn new() -> Self {
        Self(format!("{}_{}", Self::PREFIX, Uuid::now_v7().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UUID part of the identifier
    pub fn uuid(&self) -> Option<Uuid> {
        self.0
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|raw| Uuid::parse_str(raw).ok())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error parsing a [`RequestId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request id '{0}'")]
pub struct ParseRequestIdError(String);

impl FromStr for RequestId {
    type Err = ParseRequestIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.to_string());
        match id.uuid() {
            Some(_) => Ok(id),
            None => Err(ParseRequestIdError(s.to_string())),
        }
    }
}

/// Generates a [`RequestId`] for requests that arrive without one
///
/// ```rust
/// use bpmn_rest::ids::MakeTypedRequestId;
/// use tower_http::request_id::SetRequestIdLayer;
///
/// let layer = SetRequestIdLayer::x_request_id(MakeTypedRequestId);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = RequestId::new();
        let header_value = http::HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_new() {
        let id = RequestId::new();
        assert!(id.as_str().starts_with("req_"));
        // prefix (3) + underscore (1) + simple uuid (32)
        assert_eq!(id.as_str().len(), 36);
        assert_eq!(id.uuid().map(|u| u.get_version_num()), Some(7));
    }

    #[test]
    fn test_request_id_roundtrip() {
        let id = RequestId::new();
        let parsed: RequestId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_request_id_rejects_foreign_values() {
        assert!("abc".parse::<RequestId>().is_err());
        assert!("task_0190b6b2a1e87c3d9a0b1c2d3e4f5a6b".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_make_request_id() {
        let mut maker = MakeTypedRequestId;
        let request = http::Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request).unwrap();
        let header_value = id.into_header_value();
        assert!(header_value.to_str().unwrap().starts_with("req_"));
    }
}
