/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree
///
/// Submodules:
/// - ast: Core AST traits and wrappers
/// - expressions: Definitions for the expression nodes
/// - functions: Function nodes shared by declarations and expressions
/// - statements: Definitions for the statement nodes
/// - types: The type annotation enum
pub mod ast;
pub mod expressions;
pub mod functions;
pub mod statements;
pub mod types;
