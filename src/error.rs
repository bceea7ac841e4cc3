use thiserror::Error;

/// Errors raised by the network, the training driver and config loading.
///
/// Every variant is produced before any parameter is touched, so a call that
/// returns `Err` leaves the network exactly as it was.
#[derive(Error, Debug)]
pub enum Error {
    /// A vector handed to the network does not match the declared layer size.
    #[error("{vector} vector has length {actual}, expected {expected}")]
    ShapeMismatch {
        vector: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with `ShapeMismatch` unless `values` has exactly `expected` entries.
pub(crate) fn check_len(vector: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(Error::ShapeMismatch { vector, expected, actual: values.len() });
    }
    Ok(())
}
