//! Error types and error handling for the transformer.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures with source position information
//! - Front-end variants for lexing and parsing
//! - Rewrite variants for unsupported annotations and typed defaults
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
