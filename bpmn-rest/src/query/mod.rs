//! Request parameter handling for list resources
//!
//! - [`params`]: raw parameter map and value coercion
//! - [`mapper`]: declarative parameter-to-filter tables
//! - [`paging`]: start/size/sort/order and the paginated envelope
//! - [`historic`]: the historic process instance filter

pub mod historic;
pub mod mapper;
pub mod paging;
pub mod params;

pub use historic::{HistoricProcessInstanceFilter, HISTORIC_PROCESS_INSTANCE_SORT};
pub use mapper::{FieldMapping, ParameterMapper, QueryFilter, Setter};
pub use paging::{DataResponse, Page, PageLimits, PageRequest, SortOrder, SortSpec};
pub use params::{BooleanPolicy, Coercion, DateFormats, RawParams, RFC3339};
