//! HTTP/REST API layer for Persona Chat.
//!
//! Axum-based REST API at `/api/v1/` with a plain JSON contract:
//! the chat envelope on success, `{"error": ...}` on failure.

pub mod error;
pub mod handlers;
pub mod router;
