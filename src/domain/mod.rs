//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod classifier;
pub mod entities;
pub mod errors;
pub mod gauge;

pub use classifier::{
    classify, classify_bmi, classify_measurement, compute_bmi, parse_measurement,
};
pub use entities::{BmiCategory, BmiResult, FormInput, Gender, HealthAdvice, Measurement};
pub use errors::DomainError;
pub use gauge::{BAND_WIDTHS, gauge_position};
