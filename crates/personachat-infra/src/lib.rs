//! Infrastructure layer for Persona Chat.
//!
//! Contains implementations of the ports defined in `personachat-core`:
//! SQLite storage for characters and conversations, the OpenAI-compatible
//! completion provider, and configuration loading.

pub mod config;
pub mod llm;
pub mod sqlite;
