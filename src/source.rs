//! Character-level cursor over the source text with line/column tracking.
//!
//! The cursor is deliberately dumb: peek or consume one character at a time
//! and report end of input as a hard error when a consumer overruns. The
//! lexer always checks `eof` first, so the error path only guards misuse.

use crate::error::{CompileError, CompileResult};

/// 1-based position of the next unconsumed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
  pub line: usize,
  pub col: usize,
}

pub struct SourceCursor {
  chars: Vec<char>,
  index: usize,
  line: usize,
  col: usize,
}

impl SourceCursor {
  pub fn new(input: &str) -> Self {
    Self {
      chars: input.chars().collect(),
      index: 0,
      line: 1,
      col: 1,
    }
  }

  pub fn eof(&self) -> bool {
    self.index == self.chars.len()
  }

  pub fn position(&self) -> Position {
    Position {
      line: self.line,
      col: self.col,
    }
  }

  /// Look at the next character without consuming it.
  pub fn peek(&self) -> CompileResult<char> {
    match self.chars.get(self.index) {
      Some(&c) => Ok(c),
      None => Err(CompileError::EndOfInput { requested: 1 }),
    }
  }

  /// Consume and return the next character, advancing the line/column
  /// trackers. Carriage returns occupy no column; newlines reset it.
  pub fn next(&mut self) -> CompileResult<char> {
    let c = self.peek()?;
    self.index += 1;
    match c {
      '\r' => {}
      '\n' => {
        self.line += 1;
        self.col = 1;
      }
      _ => self.col += 1,
    }
    Ok(c)
  }

  /// Consume characters while `condition` holds, returning them as a string.
  pub fn take_while(&mut self, condition: impl Fn(char) -> bool) -> CompileResult<String> {
    let mut taken = String::new();
    while !self.eof() {
      if condition(self.peek()?) {
        taken.push(self.next()?);
      } else {
        break;
      }
    }
    Ok(taken)
  }
}
