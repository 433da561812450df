//! Code generation: prints the syntax tree back to source text.

pub mod expr;
pub mod printer;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
