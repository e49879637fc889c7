//! AI adapter module. Implements AdviceProvider for LLM integration.
//!
//! Provides the Gemini adapter and a mock adapter for testing/offline use.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockAdviceAdapter;
