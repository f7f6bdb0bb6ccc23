use thiserror::Error;

/// Error types for the medkmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// No points were supplied
    #[error("No input points were provided")]
    EmptyInput,

    /// The number of clusters k is invalid (must be in 1..=n_points)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Vectors of different dimensions were compared
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call train() or fit() first.")]
    NotFitted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A field in a point file is not a number
    #[error("Could not parse value: {0}")]
    ParseFloat(String),

    #[error(transparent)]
    Npy(#[from] ndarray_npy::ReadNpyError),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
