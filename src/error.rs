//! Shared error utilities used across the compilation pipeline.
//!
//! Every stage reports failures through one enum so callers only ever deal
//! with a single error type. Formatting matters here: the parse-failure
//! snippet is part of the public contract and tests assert on its shape.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  /// The character cursor was asked for more input than remains. The lexer
  /// checks `eof` before consuming, so reaching this indicates a misuse of
  /// the cursor rather than bad source text.
  #[snafu(display("end of input: requested {requested} character(s) past the end"))]
  EndOfInput { requested: usize },

  /// An `expect` on the token stream found a token outside the required
  /// kind mask. `snippet` carries the reconstructed source rendering.
  #[snafu(display("{message}\n{snippet}"))]
  Parse { message: String, snippet: String },

  /// A variable was referenced or assigned before being declared.
  #[snafu(display("undeclared variable '{name}' at {file}:{line}:{col}"))]
  UndeclaredVariable {
    name: String,
    file: String,
    line: usize,
    col: usize,
  },

  /// A hand-built AST handed the code generator an operator token whose
  /// kind has no lowering. The parser never produces such trees.
  #[snafu(display("operator '{lexeme}' cannot be lowered"))]
  UnsupportedOperator { lexeme: String },
}
