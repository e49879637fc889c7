//! Application use cases. Orchestrate domain logic via ports.

pub mod calculator;

pub use calculator::{AdviceRequest, AppState, CalculatorService, Command, Msg, update};
