//! Utils module - Shared utilities and helpers

/// Display-width aware text helpers
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
