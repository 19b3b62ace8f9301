//! Engine configuration. Resolved once and passed by reference — weights
//! are never process-global, so concurrent tenants cannot observe each
//! other's overrides.

mod graph_config;
mod maintenance_config;
mod weights;

use serde::{Deserialize, Serialize};

pub use graph_config::GraphConfig;
pub use maintenance_config::MaintenanceConfig;
pub use weights::{ActivationConfig, ComponentWeights};

use crate::errors::{SynapseError, SynapseResult};

/// Top-level configuration, TOML-loadable. Every section has defaults, so
/// an empty file (or no file) yields a working engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynapseConfig {
    pub activation: ActivationConfig,
    pub graph: GraphConfig,
    pub maintenance: MaintenanceConfig,
}

impl SynapseConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> SynapseResult<Self> {
        toml::from_str(s).map_err(|e| SynapseError::Config {
            reason: e.to_string(),
        })
    }

    /// Component weights for a tenant: the per-tenant override when one
    /// exists, the defaults otherwise.
    pub fn weights_for(&self, organization_id: &str) -> &ComponentWeights {
        self.activation
            .tenant_weights
            .get(organization_id)
            .unwrap_or(&self.activation.weights)
    }
}
