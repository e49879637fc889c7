//! BMI computation and classification. Pure functions.

use super::entities::{BmiCategory, BmiResult, FormInput, Measurement};

pub const UNDERWEIGHT_BELOW: f64 = 18.5;
pub const NORMAL_BELOW: f64 = 25.0;
pub const OVERWEIGHT_BELOW: f64 = 30.0;

/// Map a BMI value to its band. Lower bounds are inclusive.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// `weight / (height_cm / 100)^2`. None unless both inputs are positive and finite.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Parse user-entered weight/height and classify.
///
/// Blank, non-numeric, zero or negative input yields `None`: the calculation is a no-op.
pub fn classify(weight: &str, height: &str) -> Option<BmiResult> {
    let weight_kg = parse_positive(weight)?;
    let height_cm = parse_positive(height)?;
    compute_bmi(weight_kg, height_cm).map(result_for)
}

/// Classify an already validated measurement.
pub fn classify_measurement(m: &Measurement) -> Option<BmiResult> {
    compute_bmi(m.weight_kg, m.height_cm).map(result_for)
}

fn result_for(bmi: f64) -> BmiResult {
    let category = classify_bmi(bmi);
    BmiResult {
        bmi,
        category,
        display_tag: category.display_tag().to_string(),
    }
}

/// Validate a whole form into a `Measurement`. Same no-op rules as [`classify`].
pub fn parse_measurement(input: &FormInput) -> Option<Measurement> {
    Some(Measurement {
        weight_kg: parse_positive(&input.weight)?,
        height_cm: parse_positive(&input.height)?,
        age: input.age,
        gender: input.gender,
    })
}

fn parse_positive(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    is_positive(value).then_some(value)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
