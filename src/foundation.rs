//! Shared geometry helpers and the error taxonomy.

pub mod core;
pub mod error;
