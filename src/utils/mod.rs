//! Utility functions for code generation and URL processing.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_normalizer`] - Target URL scheme normalization
//! - [`short_url`] - Absolute short-URL derivation
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod short_url;
pub mod url_normalizer;
