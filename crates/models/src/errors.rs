use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid rating: {0}")]
    InvalidRating(String),
    #[error("validation error: {0}")]
    Validation(String),
}
