//! Infrastructure layer for Parley.
//!
//! Contains the concrete [`LlmProvider`](parley_core::llm::LlmProvider)
//! for the Anthropic Messages API and the gateway configuration loader
//! (TOML file, `.env`, and environment overrides).

pub mod config;
pub mod llm;
