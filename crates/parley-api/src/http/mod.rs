//! HTTP surface of the gateway.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
