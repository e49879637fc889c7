//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the calculator.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive form loop until the user quits.
    async fn run(&mut self) -> Result<(), DomainError>;
}
