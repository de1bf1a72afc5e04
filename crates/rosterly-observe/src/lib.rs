//! Observability setup for Rosterly.

pub mod tracing_setup;
