//! Paging, sorting and the paginated response envelope
//!
//! List resources read `start`, `size`, `sort` and `order` from the same raw
//! parameter map as their filter fields. `sort` is checked against the
//! properties the resource can order by.
//!
//! # Example
//!
//! ```rust
//! use bpmn_rest::query::{PageLimits, PageRequest, RawParams, SortOrder, SortSpec};
//!
//! const SORT: SortSpec = SortSpec {
//!     default: "id",
//!     allowed: &["id", "name"],
//! };
//!
//! let params: RawParams = [("sort", "name"), ("order", "desc"), ("size", "5")]
//!     .into_iter()
//!     .collect();
//! let page = PageRequest::from_params(&params, &SORT, &PageLimits::default()).unwrap();
//!
//! assert_eq!(page.sort, "name");
//! assert_eq!(page.order, SortOrder::Descending);
//! assert_eq!(page.size, 5);
//! ```

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::params::{Coercion, RawParams};
use crate::error::{Error, Result};

/// Direction for ordering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(Error::invalid_argument(format!(
                "Value for param 'order' is not valid, '{}' must be 'asc' or 'desc'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Sortable properties of one list resource
#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    /// Property used when the request names none
    pub default: &'static str,
    pub allowed: &'static [&'static str],
}

/// Page size bounds taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 1000,
        }
    }
}

/// Window and ordering requested for a list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of results to skip
    pub start: u64,
    /// Maximum number of results to return
    pub size: u64,
    /// Property to sort by, one of the resource's allowed properties
    pub sort: String,
    pub order: SortOrder,
}

impl PageRequest {
    /// Read the paging parameters out of `params`
    pub fn from_params(params: &RawParams, sorting: &SortSpec, limits: &PageLimits) -> Result<Self> {
        let coercion = Coercion::default();

        let start = match params.get("start") {
            Some(raw) => coercion.integer("start", raw)?,
            None => 0,
        };

        let size = match params.get("size") {
            Some(raw) => coercion.integer("size", raw)?,
            None => limits.default_size,
        }
        .min(limits.max_size);

        let sort = match params.get("sort") {
            Some(raw) if sorting.allowed.contains(&raw) => raw.to_string(),
            Some(raw) => {
                return Err(Error::invalid_argument(format!(
                    "Value for param 'sort' is not valid, '{}' is not a valid property",
                    raw
                )))
            }
            None => sorting.default.to_string(),
        };

        let order = match params.get("order") {
            Some(raw) => SortOrder::parse(raw)?,
            None => SortOrder::default(),
        };

        Ok(Self {
            start,
            size,
            sort,
            order,
        })
    }

    /// Slice an already sorted collection to the requested window
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.start).unwrap_or(usize::MAX);
        let take = usize::try_from(self.size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

/// One page of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matches across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Paginated collection response
///
/// `size` is the number of items in `data`, which may be smaller than the
/// requested page size on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub start: u64,
    pub sort: String,
    pub order: SortOrder,
    pub size: u64,
}

impl<T> DataResponse<T> {
    pub fn new(page: Page<T>, request: &PageRequest) -> Self {
        let size = page.items.len() as u64;
        Self {
            data: page.items,
            total: page.total,
            start: request.start,
            sort: request.sort.clone(),
            order: request.order,
            size,
        }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: SortSpec = SortSpec {
        default: "processInstanceId",
        allowed: &["processInstanceId", "startTime"],
    };

    fn request(pairs: &[(&str, &str)]) -> Result<PageRequest> {
        let params: RawParams = pairs.iter().copied().collect();
        PageRequest::from_params(&params, &SPEC, &PageLimits::default())
    }

    #[test]
    fn test_defaults() {
        let page = request(&[]).unwrap();
        assert_eq!(page.start, 0);
        assert_eq!(page.size, 10);
        assert_eq!(page.sort, "processInstanceId");
        assert_eq!(page.order, SortOrder::Ascending);
    }

    #[test]
    fn test_size_is_capped() {
        let params: RawParams = [("size", "5000")].into_iter().collect();
        let limits = PageLimits {
            default_size: 10,
            max_size: 100,
        };
        let page = PageRequest::from_params(&params, &SPEC, &limits).unwrap();
        assert_eq!(page.size, 100);
    }

    #[test]
    fn test_unknown_sort_property() {
        let err = request(&[("sort", "name")]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("'name'")));
    }

    #[test]
    fn test_bad_order() {
        let err = request(&[("order", "up")]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("'asc' or 'desc'")));
    }

    #[test]
    fn test_bad_start_and_size() {
        assert!(request(&[("start", "abc")]).is_err());
        assert!(request(&[("size", "-3")]).is_err());
    }

    #[test]
    fn test_window() {
        let page = request(&[("start", "2"), ("size", "2")]).unwrap();
        assert_eq!(page.window(vec![1, 2, 3, 4, 5]), vec![3, 4]);

        let past_end = request(&[("start", "10")]).unwrap();
        assert!(past_end.window(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn test_data_response_size_is_item_count() {
        let page_request = request(&[("size", "10"), ("order", "desc")]).unwrap();
        let response = DataResponse::new(Page::new(vec!["a", "b"], 7), &page_request);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["total"], 7);
        assert_eq!(json["order"], "desc");
        assert_eq!(json["sort"], "processInstanceId");
    }
}
