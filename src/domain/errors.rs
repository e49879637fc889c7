//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Advice request failed: {0}")]
    Advice(String),

    #[error("UI error: {0}")]
    Ui(String),
}
