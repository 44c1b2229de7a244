//! HTTP request handlers.

pub mod chat;
pub mod prompt;
pub mod session;
pub mod system;
