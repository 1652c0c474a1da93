//! Raw request parameters and value coercion
//!
//! Query strings arrive as plain string pairs. [`RawParams`] holds them as
//! received and [`Coercion`] turns individual values into the types a filter
//! field expects. Every coercion failure is an invalid-argument error naming
//! the offending parameter.
//!
//! # Example
//!
//! ```rust
//! use bpmn_rest::query::{BooleanPolicy, Coercion, RawParams};
//!
//! let params: RawParams = [("finished", "TRUE")].into_iter().collect();
//! let coercion = Coercion::default();
//!
//! assert_eq!(coercion.policy(), BooleanPolicy::Strict);
//! assert!(coercion.flag("finished", params.get("finished").unwrap()).unwrap());
//! assert!(coercion.flag("finished", "yes").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Format token selecting RFC 3339 parsing in a [`DateFormats`] list
pub const RFC3339: &str = "rfc3339";

/// Mapping from parameter name to raw string value, as supplied by the HTTP layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(HashMap<String, String>);

impl RawParams {
    /// Raw value for `name`, if the parameter was supplied
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for RawParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How flag parameters are read
///
/// `Strict` accepts only `true`/`false` (ASCII case-insensitive) and rejects
/// anything else. `Loose` reads a case-insensitive `true` as true and every
/// other value as false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanPolicy {
    #[default]
    Strict,
    Loose,
}

impl fmt::Display for BooleanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Loose => write!(f, "loose"),
        }
    }
}

impl BooleanPolicy {
    /// Parse `raw` as the value of flag parameter `name`
    pub fn parse(self, name: &str, raw: &str) -> Result<bool> {
        if raw.eq_ignore_ascii_case("true") {
            return Ok(true);
        }
        match self {
            Self::Loose => Ok(false),
            Self::Strict if raw.eq_ignore_ascii_case("false") => Ok(false),
            Self::Strict => Err(Error::invalid_argument(format!(
                "Value for param '{}' is not a valid boolean: '{}'. Use 'true' or 'false'.",
                name, raw
            ))),
        }
    }
}

/// Ordered list of accepted date formats
///
/// Each entry is either [`RFC3339`] or a chrono `strftime` pattern. Patterns
/// with an offset specifier keep the offset; patterns with a time but no
/// offset are read as UTC; date-only patterns resolve to midnight UTC. The
/// first format that parses wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateFormats(Vec<String>);

impl Default for DateFormats {
    fn default() -> Self {
        Self(vec![
            RFC3339.to_string(),
            "%Y-%m-%dT%H:%M:%S%.f%z".to_string(),
            "%Y-%m-%dT%H:%M:%S%.f".to_string(),
            "%Y-%m-%d".to_string(),
        ])
    }
}

impl DateFormats {
    pub fn new(formats: Vec<String>) -> Self {
        Self(formats)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Parse `raw` as the value of date parameter `name`
    pub fn parse(&self, name: &str, raw: &str) -> Result<DateTime<Utc>> {
        self.0
            .iter()
            .find_map(|format| parse_with(format, raw))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Failed to parse date '{}' for param '{}'",
                    raw, name
                ))
            })
    }
}

fn parse_with(format: &str, raw: &str) -> Option<DateTime<Utc>> {
    if format.eq_ignore_ascii_case(RFC3339) {
        return DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    if format.contains("%z") || format.contains("%:z") || format.contains("%#z") {
        return DateTime::parse_from_str(raw, format)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coercion rules shared by every filter mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coercion {
    boolean_policy: BooleanPolicy,
    date_formats: DateFormats,
}

impl Coercion {
    pub fn new(boolean_policy: BooleanPolicy, date_formats: DateFormats) -> Self {
        Self {
            boolean_policy,
            date_formats,
        }
    }

    pub fn policy(&self) -> BooleanPolicy {
        self.boolean_policy
    }

    pub fn flag(&self, name: &str, raw: &str) -> Result<bool> {
        self.boolean_policy.parse(name, raw)
    }

    pub fn date(&self, name: &str, raw: &str) -> Result<DateTime<Utc>> {
        self.date_formats.parse(name, raw)
    }

    /// Parse a non-negative integer parameter
    pub fn integer(&self, name: &str, raw: &str) -> Result<u64> {
        raw.trim().parse::<u64>().map_err(|_| {
            Error::invalid_argument(format!(
                "Value for param '{}' is not a valid non-negative integer: '{}'",
                name, raw
            ))
        })
    }
}
