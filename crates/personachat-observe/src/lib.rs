//! Observability setup for Persona Chat: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
