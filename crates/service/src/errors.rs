use thiserror::Error;

/// Failure of a call to the CMS API before a response envelope was obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unexpected status: {0}")]
    Status(u16),
}

impl ApiError {
    /// Stable numeric code for logging
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Network(_) => 2001,
            ApiError::Decode(_) => 2002,
            ApiError::Status(_) => 2003,
        }
    }
}
