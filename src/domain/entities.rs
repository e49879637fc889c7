//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here; adapters map to and from these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as selected in the form. Embedded verbatim in the advice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form values as typed by the user. Weight and height stay strings until classification.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub weight: String,
    pub height: String,
    pub age: u32,
    pub gender: Gender,
}

/// A parsed, validated measurement. Held only for the duration of one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
}

/// Four ordinal BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Human-readable label, used in the prompt and in the result panel.
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal (healthy)",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Colour tag the renderer maps to a terminal colour.
    pub fn display_tag(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "blue",
            BmiCategory::Normal => "green",
            BmiCategory::Overweight => "yellow",
            BmiCategory::Obese => "red",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one calculation. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub display_tag: String,
}

impl BmiResult {
    /// BMI rounded to one decimal place, as displayed and sent in the prompt.
    pub fn rounded(&self) -> f64 {
        (self.bmi * 10.0).round() / 10.0
    }
}

/// Structured advice returned by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvice {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub diet_tips: Vec<String>,
}
