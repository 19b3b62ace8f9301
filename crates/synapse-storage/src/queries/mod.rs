//! Tenant-scoped query modules. Every statement filters by
//! `organization_id`; a query without the filter is a correctness bug.

pub mod causal_ops;
pub mod edge_ops;
pub mod explanation_ops;
pub mod state_ops;
pub mod tenant_ops;

use chrono::{DateTime, Utc};

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_ts(s: &str) -> SynapseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {s}: {e}")))
}

/// Parse an optional RFC 3339 timestamp column.
pub(crate) fn parse_ts_opt(s: Option<String>) -> SynapseResult<Option<DateTime<Utc>>> {
    s.as_deref().map(parse_ts).transpose()
}
