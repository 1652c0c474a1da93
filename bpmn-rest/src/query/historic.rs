//! Filter for the historic process instance collection

use chrono::{DateTime, Utc};

use super::mapper::{FieldMapping, QueryFilter, Setter};
use super::paging::SortSpec;

/// Properties historic process instances can be sorted by
pub const HISTORIC_PROCESS_INSTANCE_SORT: SortSpec = SortSpec {
    default: "processInstanceId",
    allowed: &[
        "processInstanceId",
        "processDefinitionId",
        "businessKey",
        "startTime",
        "endTime",
        "duration",
        "tenantId",
    ],
};

/// Constraints on a historic process instance query
///
/// Every field is optional; `None` leaves that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricProcessInstanceFilter {
    pub process_instance_id: Option<String>,
    pub process_definition_key: Option<String>,
    pub process_definition_id: Option<String>,
    pub business_key: Option<String>,
    /// Started by, or holding an identity link on, the instance
    pub involved_user: Option<String>,
    pub finished: Option<bool>,
    pub super_process_instance_id: Option<String>,
    pub exclude_subprocesses: Option<bool>,
    pub finished_after: Option<DateTime<Utc>>,
    pub finished_before: Option<DateTime<Utc>>,
    pub started_after: Option<DateTime<Utc>>,
    pub started_before: Option<DateTime<Utc>>,
    pub started_by: Option<String>,
    /// Carry process variables in the response; does not constrain matches
    pub include_process_variables: Option<bool>,
    pub tenant_id: Option<String>,
    /// SQL `LIKE` pattern (`%` and `_` wildcards)
    pub tenant_id_like: Option<String>,
    pub without_tenant_id: Option<bool>,
}

impl HistoricProcessInstanceFilter {
    pub fn includes_variables(&self) -> bool {
        self.include_process_variables.unwrap_or(false)
    }
}

impl QueryFilter for HistoricProcessInstanceFilter {
    const FIELDS: &'static [FieldMapping<Self>] = &[
        FieldMapping::new(
            "processInstanceId",
            Setter::Text(|f, v| f.process_instance_id = Some(v)),
        ),
        FieldMapping::new(
            "processDefinitionKey",
            Setter::Text(|f, v| f.process_definition_key = Some(v)),
        ),
        FieldMapping::new(
            "processDefinitionId",
            Setter::Text(|f, v| f.process_definition_id = Some(v)),
        ),
        FieldMapping::new("businessKey", Setter::Text(|f, v| f.business_key = Some(v))),
        FieldMapping::new("involvedUser", Setter::Text(|f, v| f.involved_user = Some(v))),
        FieldMapping::new("finished", Setter::Flag(|f, v| f.finished = Some(v))),
        FieldMapping::new(
            "superProcessInstanceId",
            Setter::Text(|f, v| f.super_process_instance_id = Some(v)),
        ),
        FieldMapping::new(
            "excludeSubprocesses",
            Setter::Flag(|f, v| f.exclude_subprocesses = Some(v)),
        ),
        FieldMapping::new("finishedAfter", Setter::Date(|f, v| f.finished_after = Some(v))),
        FieldMapping::new("finishedBefore", Setter::Date(|f, v| f.finished_before = Some(v))),
        FieldMapping::new("startedAfter", Setter::Date(|f, v| f.started_after = Some(v))),
        FieldMapping::new("startedBefore", Setter::Date(|f, v| f.started_before = Some(v))),
        FieldMapping::new("startedBy", Setter::Text(|f, v| f.started_by = Some(v))),
        FieldMapping::new(
            "includeProcessVariables",
            Setter::Flag(|f, v| f.include_process_variables = Some(v)),
        ),
        FieldMapping::new("tenantId", Setter::Text(|f, v| f.tenant_id = Some(v))),
        FieldMapping::new("tenantIdLike", Setter::Text(|f, v| f.tenant_id_like = Some(v))),
        FieldMapping::new(
            "withoutTenantId",
            Setter::Flag(|f, v| f.without_tenant_id = Some(v)),
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ParameterMapper, RawParams};
    use chrono::TimeZone;

    #[test]
    fn test_every_field_is_mapped_once() {
        let mut names: Vec<_> = HistoricProcessInstanceFilter::FIELDS
            .iter()
            .map(|m| m.param)
            .collect();
        assert_eq!(names.len(), 17);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn test_full_population() {
        let params: RawParams = [
            ("processInstanceId", "pi-1"),
            ("processDefinitionKey", "invoice"),
            ("processDefinitionId", "invoice:1:4"),
            ("businessKey", "order-7"),
            ("involvedUser", "kermit"),
            ("finished", "true"),
            ("superProcessInstanceId", "pi-0"),
            ("excludeSubprocesses", "false"),
            ("finishedAfter", "2013-04-01"),
            ("finishedBefore", "2013-05-01T00:00:00Z"),
            ("startedAfter", "2013-03-01T12:00:00+01:00"),
            ("startedBefore", "2013-04-30"),
            ("startedBy", "fozzie"),
            ("includeProcessVariables", "TRUE"),
            ("tenantId", "acme"),
            ("tenantIdLike", "ac%"),
            ("withoutTenantId", "False"),
        ]
        .into_iter()
        .collect();

        let filter: HistoricProcessInstanceFilter =
            ParameterMapper::default().populate(&params).unwrap();

        assert_eq!(filter.process_instance_id.as_deref(), Some("pi-1"));
        assert_eq!(filter.process_definition_key.as_deref(), Some("invoice"));
        assert_eq!(filter.process_definition_id.as_deref(), Some("invoice:1:4"));
        assert_eq!(filter.business_key.as_deref(), Some("order-7"));
        assert_eq!(filter.involved_user.as_deref(), Some("kermit"));
        assert_eq!(filter.finished, Some(true));
        assert_eq!(filter.super_process_instance_id.as_deref(), Some("pi-0"));
        assert_eq!(filter.exclude_subprocesses, Some(false));
        assert_eq!(
            filter.finished_after,
            Some(Utc.with_ymd_and_hms(2013, 4, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            filter.finished_before,
            Some(Utc.with_ymd_and_hms(2013, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            filter.started_after,
            Some(Utc.with_ymd_and_hms(2013, 3, 1, 11, 0, 0).unwrap())
        );
        assert_eq!(
            filter.started_before,
            Some(Utc.with_ymd_and_hms(2013, 4, 30, 0, 0, 0).unwrap())
        );
        assert_eq!(filter.started_by.as_deref(), Some("fozzie"));
        assert!(filter.includes_variables());
        assert_eq!(filter.tenant_id.as_deref(), Some("acme"));
        assert_eq!(filter.tenant_id_like.as_deref(), Some("ac%"));
        assert_eq!(filter.without_tenant_id, Some(false));
    }

    #[test]
    fn test_single_key_sets_only_its_field() {
        for mapping in HistoricProcessInstanceFilter::FIELDS {
            let value = match mapping.setter.kind() {
                "flag" => "true",
                "date" => "2020-02-02",
                _ => "x",
            };
            let params: RawParams = [(mapping.param, value)].into_iter().collect();
            let filter: HistoricProcessInstanceFilter =
                ParameterMapper::default().populate(&params).unwrap();
            assert_ne!(
                filter,
                HistoricProcessInstanceFilter::default(),
                "{} did not set a field",
                mapping.param
            );
        }
    }

    #[test]
    fn test_default_sort_is_allowed() {
        assert!(HISTORIC_PROCESS_INSTANCE_SORT
            .allowed
            .contains(&HISTORIC_PROCESS_INSTANCE_SORT.default));
    }
}
