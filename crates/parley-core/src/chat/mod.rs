//! Chat orchestration.

pub mod service;

pub use service::{ChatOutcome, ChatService, ChatTurn};
