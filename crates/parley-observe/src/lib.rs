//! Observability setup for Parley: structured logging through `tracing`
//! and optional OpenTelemetry span export.

pub mod tracing_setup;
