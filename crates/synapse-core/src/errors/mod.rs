//! Error taxonomy: one enum per subsystem, aggregated into [`SynapseError`].

mod causal_error;
mod graph_error;
mod ranking_error;
mod storage_error;

pub use causal_error::CausalError;
pub use graph_error::GraphError;
pub use ranking_error::RankingError;
pub use storage_error::StorageError;

/// Result alias used by every fallible function in the workspace.
pub type SynapseResult<T> = Result<T, SynapseError>;

/// Top-level error aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum SynapseError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Causal(#[from] CausalError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    Config { reason: String },
}
