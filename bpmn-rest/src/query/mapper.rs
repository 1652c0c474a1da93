//! Declarative parameter-to-filter mapping
//!
//! A filter type lists its recognized parameters once, as a table of
//! [`FieldMapping`] entries. The setter variant decides how the raw value is
//! coerced. [`ParameterMapper`] walks the table against a [`RawParams`] map:
//! absent keys are skipped, present keys are coerced and set, and keys the
//! table does not name are ignored.
//!
//! # Example
//!
//! ```rust
//! use bpmn_rest::query::{FieldMapping, ParameterMapper, QueryFilter, RawParams, Setter};
//!
//! #[derive(Debug, Default)]
//! struct TaskFilter {
//!     assignee: Option<String>,
//!     suspended: Option<bool>,
//! }
//!
//! impl QueryFilter for TaskFilter {
//!     const FIELDS: &'static [FieldMapping<Self>] = &[
//!         FieldMapping::new("assignee", Setter::Text(|f, v| f.assignee = Some(v))),
//!         FieldMapping::new("suspended", Setter::Flag(|f, v| f.suspended = Some(v))),
//!     ];
//! }
//!
//! let params: RawParams = [("assignee", "kermit"), ("unknown", "x")].into_iter().collect();
//! let filter: TaskFilter = ParameterMapper::default().populate(&params).unwrap();
//!
//! assert_eq!(filter.assignee.as_deref(), Some("kermit"));
//! assert_eq!(filter.suspended, None);
//! ```

use chrono::{DateTime, Utc};

use super::params::{Coercion, RawParams};
use crate::error::Result;

/// Typed setter for one filter field; the variant fixes the coercion
pub enum Setter<F> {
    /// Raw value is passed through unchanged
    Text(fn(&mut F, String)),
    /// Raw value is read with the configured boolean policy
    Flag(fn(&mut F, bool)),
    /// Raw value is read with the configured date formats
    Date(fn(&mut F, DateTime<Utc>)),
}

impl<F> Setter<F> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Date(_) => "date",
        }
    }
}

/// One recognized query parameter and the filter field it populates
pub struct FieldMapping<F> {
    pub param: &'static str,
    pub setter: Setter<F>,
}

impl<F> FieldMapping<F> {
    pub const fn new(param: &'static str, setter: Setter<F>) -> Self {
        Self { param, setter }
    }
}

/// A filter that can be populated from raw request parameters
pub trait QueryFilter: Default + 'static {
    /// Recognized parameters, applied in order
    const FIELDS: &'static [FieldMapping<Self>];
}

/// Applies field-mapping tables using shared coercion rules
#[derive(Debug, Clone, Default)]
pub struct ParameterMapper {
    coercion: Coercion,
}

impl ParameterMapper {
    pub fn new(coercion: Coercion) -> Self {
        Self { coercion }
    }

    pub fn coercion(&self) -> &Coercion {
        &self.coercion
    }

    /// Build a fresh filter from `params`
    pub fn populate<F: QueryFilter>(&self, params: &RawParams) -> Result<F> {
        let mut filter = F::default();
        self.apply(F::FIELDS, params, &mut filter)?;
        Ok(filter)
    }

    /// Apply `fields` to an existing filter
    ///
    /// Stops at the first value that fails to coerce. Fields set before the
    /// failure stay set, so callers should discard the filter on error.
    pub fn apply<F>(
        &self,
        fields: &[FieldMapping<F>],
        params: &RawParams,
        filter: &mut F,
    ) -> Result<()> {
        let mut applied = 0usize;
        for field in fields {
            let Some(raw) = params.get(field.param) else {
                continue;
            };
            applied += 1;

            match &field.setter {
                Setter::Text(set) => set(filter, raw.to_string()),
                Setter::Flag(set) => set(filter, self.coercion.flag(field.param, raw)?),
                Setter::Date(set) => set(filter, self.coercion.date(field.param, raw)?),
            }
        }

        tracing::trace!(recognized = fields.len(), applied, "Mapped query parameters");
        Ok(())
    }
}
