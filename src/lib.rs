//! Crate root: wires together the compilation pipeline.
//!
//! The stages are intentionally small and composable so they can be evolved
//! independently:
//! - `lexer` performs lexical analysis over a `source` cursor and produces
//!   a flat token sequence.
//! - `parser` owns all syntactic knowledge and builds the `ast` through a
//!   `stream` cursor with kind-mask lookahead.
//! - `optimizer` folds constant additions in place.
//! - `codegen` lowers the tree into stack-machine assembly.
//! - `visitor` is the double-dispatch mechanism shared by the two tree
//!   passes, and `error` centralises reporting for all of them.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod optimizer;
pub mod parser;
pub mod source;
pub mod stream;
pub mod token;
pub mod visitor;

pub use error::{CompileError, CompileResult};

/// Compile a source string into stack-machine assembly. `filename` only
/// labels diagnostics.
pub fn compile(source: &str, filename: &str) -> CompileResult<String> {
  let tokens = lexer::lex(source, filename)?;
  let mut ast = parser::parse(tokens)?;
  optimizer::optimize(&mut ast);
  codegen::generate(&mut ast)
}

/// The same pipeline with the optimizer pass skipped.
pub fn compile_unoptimized(source: &str, filename: &str) -> CompileResult<String> {
  let tokens = lexer::lex(source, filename)?;
  let mut ast = parser::parse(tokens)?;
  codegen::generate(&mut ast)
}
