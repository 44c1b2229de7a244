//! LLM provider abstractions for Parley.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `transcript`: flattens a session into the single prompt sent upstream
//! - `ModelClient`: one bounded, non-retrying generation per call

pub mod box_provider;
pub mod client;
pub mod provider;
pub mod transcript;

pub use box_provider::BoxLlmProvider;
pub use client::ModelClient;
pub use provider::LlmProvider;
