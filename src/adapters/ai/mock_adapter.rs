//! Mock advice adapter for testing without API calls.
//!
//! Returns canned advice per category, or a simulated failure.

use crate::domain::{BmiCategory, DomainError, Gender, HealthAdvice};
use crate::ports::AdviceProvider;
use std::time::Duration;
use tracing::info;

/// Mock advice adapter.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAdviceAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail: bool,
}

impl MockAdviceAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self {
            delay_ms: 100,
            fail: false,
        }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: false,
        }
    }

    /// Create a mock adapter whose every request fails after the delay.
    pub fn failing(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: true,
        }
    }

    fn canned_tips(category: BmiCategory) -> (&'static str, &'static str) {
        match category {
            BmiCategory::Underweight => (
                "Add a strength session twice a week to build lean mass",
                "Include an extra protein-rich snack between meals",
            ),
            BmiCategory::Normal => (
                "Keep up at least 150 minutes of moderate activity per week",
                "Keep meals balanced with vegetables, whole grains and lean protein",
            ),
            BmiCategory::Overweight => (
                "Add a brisk 30-minute walk on most days",
                "Swap sugary drinks for water or unsweetened tea",
            ),
            BmiCategory::Obese => (
                "Start with low-impact activity such as swimming or cycling",
                "Talk to a doctor or dietitian about a sustainable meal plan",
            ),
        }
    }
}

impl Default for MockAdviceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AdviceProvider for MockAdviceAdapter {
    async fn request_advice(
        &self,
        bmi: f64,
        category: BmiCategory,
        age: u32,
        gender: Gender,
    ) -> Result<HealthAdvice, DomainError> {
        info!(bmi, category = %category, age, gender = %gender, "[MOCK] Simulating advice request");

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail {
            return Err(DomainError::Advice("[MOCK] simulated advice outage".to_string()));
        }

        let (activity, diet) = Self::canned_tips(category);
        Ok(HealthAdvice {
            summary: format!(
                "[MOCK] A {}-year-old {} with a BMI of {:.1} falls in the {} range.",
                age,
                gender,
                bmi,
                category.label()
            ),
            recommendations: vec![
                activity.to_string(),
                "Aim for 7-9 hours of sleep each night".to_string(),
            ],
            diet_tips: vec![diet.to_string(), "Drink water throughout the day".to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter() {
        let adapter = MockAdviceAdapter::with_delay(10);

        let advice = adapter
            .request_advice(20.2, BmiCategory::Normal, 25, Gender::Female)
            .await
            .unwrap();

        assert!(advice.summary.contains("25-year-old female"));
        assert!(advice.summary.contains("20.2"));
        assert_eq!(advice.recommendations.len(), 2);
        assert_eq!(advice.diet_tips.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_adapter_failing() {
        let adapter = MockAdviceAdapter::failing(0);
        let result = adapter
            .request_advice(31.0, BmiCategory::Obese, 40, Gender::Male)
            .await;
        assert!(matches!(result, Err(DomainError::Advice(_))));
    }
}
