//! Provisioning error types

use thiserror::Error;

/// Provisioning backend errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Plan has {0} unresolved validation error(s); refusing to provision")]
    InvalidPlan(usize),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
