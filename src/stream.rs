//! Cursor over the token sequence with lookahead and kind-checked
//! consumption.
//!
//! `expect` is the parser's only failure path. When it misses, the stream
//! rebuilds a best-effort source snippet purely from token lexemes and
//! columns (the original text is long gone by now) and points a caret at the
//! offending lexeme.

use crate::error::{CompileError, CompileResult};
use crate::token::{Token, TokenKind};

pub struct TokenStream {
  tokens: Vec<Token>,
  index: usize,
  eof_token: Token,
}

impl TokenStream {
  pub fn new(tokens: Vec<Token>) -> Self {
    // Sniff the file name from the first real token so the synthetic EOF
    // token still names the right translation unit.
    let filename = tokens
      .first()
      .map(|token| token.file.clone())
      .unwrap_or_else(|| "[eof]".to_string());
    let eof_token = Token::new(TokenKind::EOF, "[eof]", filename, 0, 0);
    Self {
      tokens,
      index: 0,
      eof_token,
    }
  }

  pub fn eof(&self) -> bool {
    self.index == self.tokens.len()
  }

  pub fn index(&self) -> usize {
    self.index
  }

  /// The token at the current position, or the synthetic EOF token when
  /// positioned at or past the end.
  pub fn peek(&self) -> &Token {
    self.tokens.get(self.index).unwrap_or(&self.eof_token)
  }

  /// Return the current token and advance. The position is clamped so it
  /// never exceeds the sequence length.
  pub fn next(&mut self) -> Token {
    let token = self.peek().clone();
    if self.index < self.tokens.len() {
      self.index += 1;
    }
    token
  }

  /// Consume the current token if its kind intersects `mask`, otherwise
  /// raise a parse failure. `label` overrides the expected-kind description
  /// in the message (e.g. `return` when only that keyword is acceptable).
  pub fn expect(&mut self, mask: TokenKind, label: Option<&str>) -> CompileResult<Token> {
    let token = self.peek().clone();
    if token.kind.intersects(mask) {
      Ok(self.next())
    } else {
      let expected = match label {
        Some(text) => text.to_string(),
        None => mask.to_string(),
      };
      Err(self.panic_at(&token, &expected))
    }
  }

  /// Build the parse failure for `token`, naming its position and what was
  /// expected there.
  pub fn panic_at(&self, token: &Token, expected: &str) -> CompileError {
    let message = format!(
      "parse error in '{}' at {}:{}",
      token.file, token.line, token.col
    );
    let detail = format!("expected '{expected}' instead got '{}'", token.kind);
    let snippet = self.friendly_error(token, &detail);
    CompileError::Parse { message, snippet }
  }

  /// Render up to three source lines (the offending line and the two before
  /// it) rebuilt from token lexemes, with a caret under the offending
  /// lexeme. Tokens that never came from this stream (the synthetic EOF
  /// token included) cannot be rendered, but `message` still is.
  pub fn friendly_error(&self, token: &Token, message: &str) -> String {
    if !self.tokens.contains(token) {
      return format!("given token does not exist in stream\n{message}");
    }

    let first_line = token.line.saturating_sub(2).max(1);
    let mut output: Vec<String> = (first_line..=token.line)
      .map(|line| {
        let mut text = String::new();
        for t in self.tokens.iter().filter(|t| t.line == line) {
          let indent = (t.col - 1).saturating_sub(text.chars().count());
          text.push_str(&" ".repeat(indent));
          text.push_str(&t.lexeme);
        }
        format!("{line}|  {text}")
      })
      .collect();

    let prefix = " ".repeat(token.line.to_string().len() + 3);
    let underline = " ".repeat(token.col - 1) + &"^".repeat(token.lexeme.chars().count());
    output.push(format!("{prefix}{underline}\n{message}"));
    output.join("\n")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexer::lex;

  fn stream(source: &str) -> TokenStream {
    TokenStream::new(lex(source, "test.c").unwrap())
  }

  #[test]
  fn peek_does_not_advance() {
    let mut s = stream("1+2");
    assert_eq!(s.peek().lexeme, "1");
    assert_eq!(s.peek().lexeme, "1");
    assert_eq!(s.next().lexeme, "1");
    assert_eq!(s.peek().lexeme, "+");
  }

  #[test]
  fn past_the_end_yields_the_synthetic_eof_token() {
    let mut s = stream("1");
    s.next();
    assert!(s.eof());
    let eof = s.next();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.lexeme, "[eof]");
    assert_eq!(eof.file, "test.c");
    // position stays clamped no matter how often we pull
    s.next();
    assert_eq!(s.index(), 1);
  }

  #[test]
  fn expect_consumes_on_any_member_kind() {
    let mut s = stream("int main");
    let token = s.expect(TokenKind::KEYWORD | TokenKind::IDENTIFIER, None).unwrap();
    assert_eq!(token.lexeme, "int");
    let token = s.expect(TokenKind::KEYWORD | TokenKind::IDENTIFIER, None).unwrap();
    assert_eq!(token.lexeme, "main");
  }

  #[test]
  fn expect_failure_names_both_kinds_and_never_advances() {
    let mut s = stream("1+2");
    let err = s.expect(TokenKind::SEMI_COLON, None).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("expected 'SEMI_COLON'"), "{rendered}");
    assert!(rendered.contains("got 'INTEGER_LITERAL'"), "{rendered}");
    assert!(rendered.contains("at 1:1"), "{rendered}");
    assert_eq!(s.index(), 0);
    assert_eq!(s.peek().lexeme, "1");
  }

  #[test]
  fn snippet_reconstructs_lines_and_underlines_the_lexeme() {
    let s = stream("int a;\nint bb;\nreturn abc;");
    // fail on 'abc' (line 3, col 8, three characters wide)
    let token = Token::new(TokenKind::IDENTIFIER, "abc", "test.c", 3, 8);
    let snippet = s.friendly_error(&token, "boom");
    let expected = "\
1|  int a;
2|  int bb;
3|  return abc;
           ^^^
boom";
    assert_eq!(snippet, expected);
  }

  #[test]
  fn snippet_refuses_foreign_tokens_but_keeps_the_message() {
    let s = stream("1+2");
    let stranger = Token::new(TokenKind::IDENTIFIER, "ghost", "other.c", 9, 9);
    assert_eq!(
      s.friendly_error(&stranger, "boom"),
      "given token does not exist in stream\nboom"
    );
  }

  #[test]
  fn expect_at_eof_names_both_kinds() {
    let mut s = stream("");
    let err = s.expect(TokenKind::INTEGER_LITERAL, None).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("expected 'INTEGER_LITERAL'"), "{rendered}");
    assert!(rendered.contains("got 'EOF'"), "{rendered}");
  }
}
