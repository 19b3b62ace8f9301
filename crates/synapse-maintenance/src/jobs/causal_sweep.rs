//! Periodic causal sweep: promotes proposed hypotheses whose accumulated
//! evidence and confidence clear the activation thresholds.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use synapse_core::constants::{
    CAUSAL_ACTIVATION_CONFIDENCE_MIN, CAUSAL_ACTIVATION_EVIDENCE_MIN,
};
use synapse_core::errors::SynapseResult;
use synapse_core::traits::{ICausalStorage, ITenantDirectory};

use crate::budget::JobBudget;

/// Outcome of one sweep. `resume_org` is set when the budget ran out.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub tenants_processed: usize,
    pub promoted: usize,
    pub resume_org: Option<String>,
}

pub struct CausalSweepJob<'a> {
    causal: &'a dyn ICausalStorage,
    tenants: &'a dyn ITenantDirectory,
}

impl<'a> CausalSweepJob<'a> {
    pub fn new(causal: &'a dyn ICausalStorage, tenants: &'a dyn ITenantDirectory) -> Self {
        Self { causal, tenants }
    }

    /// Sweep all tenants. The promotion statement is status-guarded, so
    /// re-running after an abort cannot promote twice.
    pub fn run(
        &self,
        now: DateTime<Utc>,
        budget: &JobBudget,
        resume_org: Option<&str>,
    ) -> SynapseResult<SweepReport> {
        let organizations = self.tenants.organizations()?;
        let mut report = SweepReport::default();

        let start_index = match resume_org {
            Some(org) => organizations.iter().position(|o| o == org).unwrap_or(0),
            None => 0,
        };

        for org in &organizations[start_index..] {
            if budget.expired() {
                info!(org = %org, "sweep budget exhausted, returning resume point");
                report.resume_org = Some(org.clone());
                return Ok(report);
            }

            match self.causal.promote_eligible(
                org,
                CAUSAL_ACTIVATION_EVIDENCE_MIN,
                CAUSAL_ACTIVATION_CONFIDENCE_MIN,
                now,
            ) {
                Ok(promoted) => report.promoted += promoted,
                Err(e) => {
                    warn!(org = %org, error = %e, "causal sweep failed for tenant, continuing");
                }
            }
            report.tenants_processed += 1;
        }

        info!(
            tenants = report.tenants_processed,
            promoted = report.promoted,
            "causal sweep complete"
        );
        Ok(report)
    }
}
