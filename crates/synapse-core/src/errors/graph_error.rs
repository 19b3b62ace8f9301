/// Co-activation graph invariant violations. These are programming errors
/// and fail loudly in the maintainer; the write path never repairs them.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("self-loop edge rejected: {memory_id}")]
    SelfLoop { memory_id: String },

    #[error("non-canonical pair orientation: ({a}, {b})")]
    NonCanonicalPair { a: String, b: String },

    #[error("negative or overflowed count on edge ({a}, {b})")]
    InvalidCount { a: String, b: String },
}
