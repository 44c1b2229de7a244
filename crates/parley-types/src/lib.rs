//! Shared domain types for Parley.
//!
//! This crate contains the domain types used across the gateway:
//! chat messages, session configuration, the prompt catalog names,
//! LLM request/response shapes, gateway configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
