//! Business logic and repository trait definitions for Persona Chat.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `personachat-types` --
//! never on `personachat-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
