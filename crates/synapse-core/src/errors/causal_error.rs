/// Causal ledger errors.
#[derive(Debug, thiserror::Error)]
pub enum CausalError {
    #[error("hypothesis not found: {id}")]
    NotFound { id: String },

    #[error("illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("evaluation reason required for {operation}")]
    ReasonRequired { operation: &'static str },

    #[error("invalid relation: {reason}")]
    InvalidRelation { reason: String },
}
