//! Token model: a bit-set kind plus the lexeme and source position.
//!
//! Grammar rules test kind membership with a bitwise AND rather than
//! equality, so one `expect` can accept several concrete kinds. Composite
//! kinds are plain unions of primitive bits and add no meaning of their own.

use std::fmt;
use std::ops::BitOr;

/// A set of token kinds packed into a `u32`. Each concrete kind occupies
/// exactly one bit; `EOF` is the empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenKind(u32);

impl TokenKind {
  pub const EOF: Self = Self(0);
  pub const UNKNOWN: Self = Self(1 << 0);
  pub const LEFT_BRACE: Self = Self(1 << 1);
  pub const RIGHT_BRACE: Self = Self(1 << 2);
  pub const LEFT_PAREN: Self = Self(1 << 3);
  pub const RIGHT_PAREN: Self = Self(1 << 4);
  pub const SEMI_COLON: Self = Self(1 << 5);
  pub const NEGATION: Self = Self(1 << 6);
  pub const ADDITION: Self = Self(1 << 7);
  pub const MULTIPLICATION: Self = Self(1 << 8);
  pub const DIVISION: Self = Self(1 << 9);
  pub const BITWISE_NOT: Self = Self(1 << 10);
  pub const BITWISE_OR: Self = Self(1 << 11);
  pub const BITWISE_AND: Self = Self(1 << 12);
  pub const BITWISE_XOR: Self = Self(1 << 13);
  pub const LOGICAL_NOT: Self = Self(1 << 14);
  pub const LOGICAL_AND: Self = Self(1 << 15);
  pub const LOGICAL_OR: Self = Self(1 << 16);
  pub const ASSIGN: Self = Self(1 << 17);
  pub const EQUALS: Self = Self(1 << 18);
  pub const NOT_EQUALS: Self = Self(1 << 19);
  pub const LESS_THAN: Self = Self(1 << 20);
  pub const LESS_OR_EQUALS: Self = Self(1 << 21);
  pub const GREATER_THAN: Self = Self(1 << 22);
  pub const GREATER_OR_EQUALS: Self = Self(1 << 23);
  pub const KEYWORD: Self = Self(1 << 24);
  pub const IDENTIFIER: Self = Self(1 << 25);
  pub const INTEGER_LITERAL: Self = Self(1 << 26);
  pub const FLOAT_LITERAL: Self = Self(1 << 27);

  // Helper kinds: unions over the primitives above, used as expect masks.
  pub const UNARY_OP: Self =
    Self(Self::BITWISE_NOT.0 | Self::NEGATION.0 | Self::LOGICAL_NOT.0);
  pub const ADDITIVE: Self = Self(Self::NEGATION.0 | Self::ADDITION.0);
  pub const TERM: Self = Self(Self::MULTIPLICATION.0 | Self::DIVISION.0);
  pub const RELATIONAL: Self = Self(
    Self::LESS_THAN.0 | Self::LESS_OR_EQUALS.0 | Self::GREATER_THAN.0 | Self::GREATER_OR_EQUALS.0,
  );
  pub const EQUALITY: Self = Self(Self::EQUALS.0 | Self::NOT_EQUALS.0);
  pub const BINARY_OP: Self =
    Self(Self::TERM.0 | Self::ADDITIVE.0 | Self::RELATIONAL.0 | Self::EQUALITY.0);

  /// Upper bound on primitive kinds; the backing `u32` holds exactly this
  /// many bits.
  pub const MAX_PRIMITIVE_KINDS: u32 = u32::BITS;

  pub const fn bits(self) -> u32 {
    self.0
  }

  /// True when this kind shares at least one bit with `mask`.
  pub const fn intersects(self, mask: TokenKind) -> bool {
    self.0 & mask.0 != 0
  }

  fn primitive_name(bit: u32) -> &'static str {
    match TokenKind(bit) {
      Self::UNKNOWN => "UNKNOWN",
      Self::LEFT_BRACE => "LEFT_BRACE",
      Self::RIGHT_BRACE => "RIGHT_BRACE",
      Self::LEFT_PAREN => "LEFT_PAREN",
      Self::RIGHT_PAREN => "RIGHT_PAREN",
      Self::SEMI_COLON => "SEMI_COLON",
      Self::NEGATION => "NEGATION",
      Self::ADDITION => "ADDITION",
      Self::MULTIPLICATION => "MULTIPLICATION",
      Self::DIVISION => "DIVISION",
      Self::BITWISE_NOT => "BITWISE_NOT",
      Self::BITWISE_OR => "BITWISE_OR",
      Self::BITWISE_AND => "BITWISE_AND",
      Self::BITWISE_XOR => "BITWISE_XOR",
      Self::LOGICAL_NOT => "LOGICAL_NOT",
      Self::LOGICAL_AND => "LOGICAL_AND",
      Self::LOGICAL_OR => "LOGICAL_OR",
      Self::ASSIGN => "ASSIGN",
      Self::EQUALS => "EQUALS",
      Self::NOT_EQUALS => "NOT_EQUALS",
      Self::LESS_THAN => "LESS_THAN",
      Self::LESS_OR_EQUALS => "LESS_OR_EQUALS",
      Self::GREATER_THAN => "GREATER_THAN",
      Self::GREATER_OR_EQUALS => "GREATER_OR_EQUALS",
      Self::KEYWORD => "KEYWORD",
      Self::IDENTIFIER => "IDENTIFIER",
      Self::INTEGER_LITERAL => "INTEGER_LITERAL",
      Self::FLOAT_LITERAL => "FLOAT_LITERAL",
      _ => "UNNAMED",
    }
  }
}

// The vocabulary must stay within the exactly-representable bit width.
const _: () = assert!(TokenKind::FLOAT_LITERAL.0 < 1u32 << (TokenKind::MAX_PRIMITIVE_KINDS - 1));

impl BitOr for TokenKind {
  type Output = TokenKind;

  fn bitor(self, rhs: TokenKind) -> TokenKind {
    TokenKind(self.0 | rhs.0)
  }
}

impl fmt::Display for TokenKind {
  /// Renders every member bit joined with `|`, e.g. `KEYWORD|IDENTIFIER`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0 == 0 {
      return write!(f, "EOF");
    }
    let mut first = true;
    for shift in 0..Self::MAX_PRIMITIVE_KINDS {
      let bit = 1u32 << shift;
      if self.0 & bit != 0 {
        if !first {
          write!(f, "|")?;
        }
        write!(f, "{}", Self::primitive_name(bit))?;
        first = false;
      }
    }
    Ok(())
  }
}

/// Immutable token value produced only by the lexer. `line` and `col` are
/// 1-based and point at the start of the lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub lexeme: String,
  pub file: String,
  pub line: usize,
  pub col: usize,
}

impl Token {
  pub fn new(
    kind: TokenKind,
    lexeme: impl Into<String>,
    file: impl Into<String>,
    line: usize,
    col: usize,
  ) -> Self {
    Self {
      kind,
      lexeme: lexeme.into(),
      file: file.into(),
      line,
      col,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn primitives_occupy_exactly_one_bit() {
    let primitives = [
      TokenKind::UNKNOWN,
      TokenKind::LEFT_BRACE,
      TokenKind::RIGHT_BRACE,
      TokenKind::LEFT_PAREN,
      TokenKind::RIGHT_PAREN,
      TokenKind::SEMI_COLON,
      TokenKind::NEGATION,
      TokenKind::ADDITION,
      TokenKind::MULTIPLICATION,
      TokenKind::DIVISION,
      TokenKind::BITWISE_NOT,
      TokenKind::BITWISE_OR,
      TokenKind::BITWISE_AND,
      TokenKind::BITWISE_XOR,
      TokenKind::LOGICAL_NOT,
      TokenKind::LOGICAL_AND,
      TokenKind::LOGICAL_OR,
      TokenKind::ASSIGN,
      TokenKind::EQUALS,
      TokenKind::NOT_EQUALS,
      TokenKind::LESS_THAN,
      TokenKind::LESS_OR_EQUALS,
      TokenKind::GREATER_THAN,
      TokenKind::GREATER_OR_EQUALS,
      TokenKind::KEYWORD,
      TokenKind::IDENTIFIER,
      TokenKind::INTEGER_LITERAL,
      TokenKind::FLOAT_LITERAL,
    ];
    for (index, kind) in primitives.iter().enumerate() {
      assert_eq!(kind.bits().count_ones(), 1, "kind #{index}");
      assert_eq!(kind.bits(), 1 << index);
    }
  }

  #[test]
  fn composites_are_exact_unions() {
    assert_eq!(
      TokenKind::UNARY_OP,
      TokenKind::BITWISE_NOT | TokenKind::NEGATION | TokenKind::LOGICAL_NOT
    );
    assert_eq!(TokenKind::ADDITIVE, TokenKind::NEGATION | TokenKind::ADDITION);
    assert_eq!(TokenKind::TERM, TokenKind::MULTIPLICATION | TokenKind::DIVISION);
    assert_eq!(
      TokenKind::RELATIONAL,
      TokenKind::LESS_THAN
        | TokenKind::LESS_OR_EQUALS
        | TokenKind::GREATER_THAN
        | TokenKind::GREATER_OR_EQUALS
    );
    assert_eq!(TokenKind::EQUALITY, TokenKind::EQUALS | TokenKind::NOT_EQUALS);
    assert_eq!(
      TokenKind::BINARY_OP,
      TokenKind::TERM | TokenKind::ADDITIVE | TokenKind::RELATIONAL | TokenKind::EQUALITY
    );
  }

  #[test]
  fn membership_uses_bitwise_and() {
    assert!(TokenKind::NEGATION.intersects(TokenKind::ADDITIVE));
    assert!(TokenKind::NEGATION.intersects(TokenKind::UNARY_OP));
    assert!(!TokenKind::ADDITION.intersects(TokenKind::TERM));
    assert!(!TokenKind::EOF.intersects(TokenKind::BINARY_OP));
  }

  #[test]
  fn display_joins_member_names() {
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
    assert_eq!(TokenKind::KEYWORD.to_string(), "KEYWORD");
    assert_eq!(
      (TokenKind::KEYWORD | TokenKind::IDENTIFIER).to_string(),
      "KEYWORD|IDENTIFIER"
    );
    assert_eq!(TokenKind::ADDITIVE.to_string(), "NEGATION|ADDITION");
  }
}
