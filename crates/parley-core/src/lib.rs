//! Business logic for Parley.
//!
//! Holds the prompt catalog, the in-memory session store, the
//! `LlmProvider` port, and the chat service that ties them together.
//! Depends only on `parley-types` -- never on `parley-infra` or any
//! network crate.

pub mod chat;
pub mod llm;
pub mod prompt;
pub mod session;
