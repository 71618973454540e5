//! Core services: character lookup and conversation recording.
//!
//! Services are generic over the repository traits and hold their handles
//! explicitly; nothing is initialized at module scope.

pub mod character;
pub mod conversation;
