/// Retrieval ranking errors.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    /// Ranking fails hard when activation state cannot be loaded — scores
    /// without state would be meaningless.
    #[error("state store unreachable: {reason}")]
    StateStoreUnreachable { reason: String },
}
