use thiserror::Error;

/// Error types for the lloyd-kmeans library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// Invalid clustering request (k out of range, empty input, zero iteration budget)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A cluster ended up with no members and the configured policy rejects that
    #[error("Cluster {cluster} has no member points")]
    DegenerateCluster { cluster: usize },

    /// Nearest-centroid lookup against an empty centroid list
    #[error("No centroids to compare against")]
    NoCentroids,

    /// A step was requested after the run converged or hit its iteration cap
    #[error("Run already finished after {iterations} iterations")]
    RunFinished { iterations: usize },

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call train() or fit() first.")]
    NotFitted,

    /// Array input does not have two columns
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
