//! Access gating. The engine applies decisions, it does not invent policy:
//! either the caller hands in a precomputed decision, or clearance is
//! compared against classification the same way the policy owner does.

use synapse_core::model::{Classification, GateDecision, GateInput};

/// Resolve the gate input for one candidate into a decision.
pub fn decide(gate: &GateInput, classification: Classification) -> GateDecision {
    match gate {
        GateInput::Precomputed { allowed: true, .. } => GateDecision::allowed(),
        GateInput::Precomputed {
            allowed: false,
            reason,
        } => GateDecision::denied(
            reason
                .clone()
                .unwrap_or_else(|| "access denied by policy".to_string()),
        ),
        GateInput::Policy { clearance } => {
            if clearance.rank() >= classification.rank() {
                GateDecision::allowed()
            } else {
                GateDecision::denied(format!(
                    "clearance {:?} below classification {:?}",
                    clearance, classification
                ))
            }
        }
    }
}
