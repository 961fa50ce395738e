//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The lexer is intentionally tiny – it knows nothing about semantics beyond
//! recognising operators, literals and keywords. Malformed input is never a
//! hard failure here: anything unrecognised becomes an UNKNOWN token and the
//! parser rejects it with a proper diagnostic when it gets there.

use crate::error::CompileResult;
use crate::source::SourceCursor;
use crate::token::{Token, TokenKind};

const KEYWORDS: &[&str] = &["int", "return"];

fn is_decimal(c: char) -> bool {
  ('1'..='9').contains(&c)
}

fn is_digit(c: char) -> bool {
  c == '0' || is_decimal(c)
}

fn is_hex(c: char) -> bool {
  c.is_ascii_hexdigit()
}

fn is_octal(c: char) -> bool {
  ('0'..='7').contains(&c)
}

fn is_identifier_start(c: char) -> bool {
  c == '_' || c.is_ascii_alphabetic()
}

fn is_identifier(c: char) -> bool {
  is_identifier_start(c) || is_digit(c)
}

fn is_keyword(lexeme: &str) -> bool {
  KEYWORDS.contains(&lexeme)
}

/// Lex the whole input. `filename` is only carried into tokens for
/// diagnostics; pass something like `[anonymous]` when there is no file.
pub fn lex(input: &str, filename: &str) -> CompileResult<Vec<Token>> {
  let mut cursor = SourceCursor::new(input);
  let mut tokens = Vec::new();

  while !cursor.eof() {
    let start = cursor.position();
    let c = cursor.next()?;
    let mut tokify =
      |kind: TokenKind, lexeme: String| tokens.push(Token::new(kind, lexeme, filename, start.line, start.col));

    match c {
      // Whitespace never produces a token.
      ' ' | '\t' | '\u{000B}' | '\r' | '\n' => continue,

      // One-character punctuation.
      '{' => tokify(TokenKind::LEFT_BRACE, c.to_string()),
      '}' => tokify(TokenKind::RIGHT_BRACE, c.to_string()),
      '(' => tokify(TokenKind::LEFT_PAREN, c.to_string()),
      ')' => tokify(TokenKind::RIGHT_PAREN, c.to_string()),
      ';' => tokify(TokenKind::SEMI_COLON, c.to_string()),
      '~' => tokify(TokenKind::BITWISE_NOT, c.to_string()),
      '^' => tokify(TokenKind::BITWISE_XOR, c.to_string()),

      // Operators that may extend to a two-character form.
      '=' => {
        if !cursor.eof() && cursor.peek()? == '=' {
          cursor.next()?;
          tokify(TokenKind::EQUALS, "==".to_string());
        } else {
          tokify(TokenKind::ASSIGN, c.to_string());
        }
      }
      '!' => {
        if !cursor.eof() && cursor.peek()? == '=' {
          cursor.next()?;
          tokify(TokenKind::NOT_EQUALS, "!=".to_string());
        } else {
          tokify(TokenKind::LOGICAL_NOT, c.to_string());
        }
      }
      '|' => {
        if !cursor.eof() && cursor.peek()? == '|' {
          cursor.next()?;
          tokify(TokenKind::LOGICAL_OR, "||".to_string());
        } else {
          tokify(TokenKind::BITWISE_OR, c.to_string());
        }
      }
      '&' => {
        if !cursor.eof() && cursor.peek()? == '&' {
          cursor.next()?;
          tokify(TokenKind::LOGICAL_AND, "&&".to_string());
        } else {
          tokify(TokenKind::BITWISE_AND, c.to_string());
        }
      }
      '<' => {
        if !cursor.eof() && cursor.peek()? == '=' {
          cursor.next()?;
          tokify(TokenKind::LESS_OR_EQUALS, "<=".to_string());
        } else {
          tokify(TokenKind::LESS_THAN, c.to_string());
        }
      }
      '>' => {
        if !cursor.eof() && cursor.peek()? == '=' {
          cursor.next()?;
          tokify(TokenKind::GREATER_OR_EQUALS, ">=".to_string());
        } else {
          tokify(TokenKind::GREATER_THAN, c.to_string());
        }
      }
      '-' => tokify(TokenKind::NEGATION, c.to_string()),
      '+' => tokify(TokenKind::ADDITION, c.to_string()),
      '*' => tokify(TokenKind::MULTIPLICATION, c.to_string()),
      '/' => tokify(TokenKind::DIVISION, c.to_string()),

      // Base-10 literals. A fractional part turns the token into a float;
      // hexadecimal floats are unsupported.
      c if is_decimal(c) => {
        let mut lexeme = c.to_string();
        lexeme.push_str(&cursor.take_while(is_digit)?);
        if !cursor.eof() && cursor.peek()? == '.' {
          lexeme.push(cursor.next()?);
          lexeme.push_str(&cursor.take_while(is_digit)?);
          tokify(TokenKind::FLOAT_LITERAL, lexeme);
        } else {
          tokify(TokenKind::INTEGER_LITERAL, lexeme);
        }
      }

      // Leading zero: 0x/0X consumes hex digits, anything else octal.
      '0' => {
        let mut lexeme = c.to_string();
        if !cursor.eof() && matches!(cursor.peek()?, 'x' | 'X') {
          lexeme.push(cursor.next()?);
          lexeme.push_str(&cursor.take_while(is_hex)?);
        } else {
          lexeme.push_str(&cursor.take_while(is_octal)?);
        }
        tokify(TokenKind::INTEGER_LITERAL, lexeme);
      }

      // Identifiers and keywords.
      c if is_identifier_start(c) => {
        let mut lexeme = c.to_string();
        lexeme.push_str(&cursor.take_while(is_identifier)?);
        let kind = if is_keyword(&lexeme) {
          TokenKind::KEYWORD
        } else {
          TokenKind::IDENTIFIER
        };
        tokify(kind, lexeme);
      }

      _ => tokify(TokenKind::UNKNOWN, c.to_string()),
    }
  }

  Ok(tokens)
}
