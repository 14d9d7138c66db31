use thiserror::Error;

/// Errors surfaced by the pager and its file helpers.
///
/// Broken engine invariants are not represented here; those panic.
#[derive(Debug, Error)]
pub enum PagingError {
    #[error("virtual address {address} out of range (limit {limit})")]
    OutOfRange { address: usize, limit: usize },

    #[error("invalid pager configuration: {0}")]
    InvalidConfig(String),

    #[error("backing store holds {actual} bytes, expected {expected}")]
    BackingStoreSize { expected: usize, actual: usize },

    #[error("backing store uses {actual}-byte pages, expected {expected}")]
    PageSizeMismatch { expected: usize, actual: usize },

    #[error("trace line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PagingError>;
