//! Runtime type check insertion.
//!
//! Every annotated function gets assertions on its arguments and, when it
//! declares a return type, on its result. Checks call into a validation
//! library through the alias tracked per file.

pub mod alias;
pub mod assertion;
pub mod rewriter;
pub mod translator;
pub mod visitor;

#[cfg(test)]
mod tests;
