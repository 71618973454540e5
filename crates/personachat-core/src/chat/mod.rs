//! Chat request handling: validate, look up the persona, complete, record.

pub mod service;
