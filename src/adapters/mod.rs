//! Infrastructure adapters. Implement ports.
//!
//! Gemini/mock advice providers and the terminal UI. Map errors to DomainError.

pub mod ai;
pub mod ui;
