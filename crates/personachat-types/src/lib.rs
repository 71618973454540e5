//! Shared domain types for Persona Chat.
//!
//! This crate contains the domain types used across the workspace:
//! Character, Conversation, the chat request/reply shapes, LLM request
//! types, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod character;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
