//! In-memory session state.
//!
//! - `SessionStore`: concurrent map from session id to history + config

pub mod store;

pub use store::SessionStore;
