//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{BmiCategory, DomainError, Gender, HealthAdvice};

/// Advice capability backed by an external text-generation service.
///
/// Best-effort: callers log failures and carry on without advice.
#[async_trait::async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Request structured advice for a computed BMI.
    ///
    /// # Errors
    /// Returns `DomainError::Advice` on transport, status, or parse failure.
    async fn request_advice(
        &self,
        bmi: f64,
        category: BmiCategory,
        age: u32,
        gender: Gender,
    ) -> Result<HealthAdvice, DomainError>;
}
