use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `at_left` / `at_right` was asked for a key the map does not hold.
    #[error("key not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
