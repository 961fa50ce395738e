//! Recursive-descent parser producing a `Program` AST.
//!
//! One function per grammar rule, precedence lowest to highest. Every
//! binary level builds a left-leaning tree: grab an operand from the level
//! above, then fold in operators while the lookahead token intersects the
//! level's kind mask. There is no recovery – the first `expect` miss aborts
//! the translation unit.

use crate::ast::AstNode;
use crate::error::CompileResult;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Parse a full translation unit from a token sequence.
pub fn parse(tokens: Vec<Token>) -> CompileResult<AstNode> {
  let mut stream = TokenStream::new(tokens);
  parse_program(&mut stream)
}

pub fn parse_program(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let declaration = parse_function_declaration(stream)?;
  Ok(AstNode::program(declaration))
}

/// `(KEYWORD|IDENTIFIER) IDENTIFIER '(' ')' '{' statement '}'`
///
/// The return type accepts an identifier too, so unknown type names still
/// parse and can be diagnosed later.
pub fn parse_function_declaration(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let type_token = stream.expect(TokenKind::KEYWORD | TokenKind::IDENTIFIER, None)?;
  let name = stream.expect(TokenKind::IDENTIFIER, None)?;
  stream.expect(TokenKind::LEFT_PAREN, None)?;
  stream.expect(TokenKind::RIGHT_PAREN, None)?;
  stream.expect(TokenKind::LEFT_BRACE, None)?;
  let body = parse_statement(stream)?;
  stream.expect(TokenKind::RIGHT_BRACE, None)?;
  Ok(AstNode::function_declaration(
    type_token.lexeme.clone(),
    name.lexeme,
    body,
    Some(type_token),
  ))
}

/// `'return' expression ';'`
pub fn parse_statement(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let keyword = stream.expect(TokenKind::KEYWORD, None)?;
  if keyword.lexeme != "return" {
    return Err(stream.panic_at(&keyword, "return"));
  }
  let expression = parse_expression(stream)?;
  stream.expect(TokenKind::SEMI_COLON, None)?;
  Ok(AstNode::return_statement(expression))
}

pub fn parse_expression(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_logical_or(stream)
}

/// Shared shape of every left-associative binary level.
fn parse_left_assoc(
  stream: &mut TokenStream,
  operators: TokenKind,
  next: fn(&mut TokenStream) -> CompileResult<AstNode>,
) -> CompileResult<AstNode> {
  let mut expression = next(stream)?;
  while stream.peek().kind.intersects(operators) {
    let operator = stream.next();
    let right = next(stream)?;
    expression = AstNode::binary(operator, expression, right);
  }
  Ok(expression)
}

fn parse_logical_or(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::LOGICAL_OR, parse_logical_and)
}

fn parse_logical_and(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::LOGICAL_AND, parse_equality)
}

fn parse_equality(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::EQUALITY, parse_relational)
}

fn parse_relational(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::RELATIONAL, parse_additive)
}

fn parse_additive(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::ADDITIVE, parse_term)
}

fn parse_term(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_left_assoc(stream, TokenKind::TERM, parse_factor)
}

/// `'(' expression ')' | unaryOp factor | INTEGER_LITERAL`
///
/// Unary operators recurse into `factor` itself, which makes them
/// right-associative by construction.
fn parse_factor(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let kind = stream.peek().kind;
  if kind == TokenKind::LEFT_PAREN {
    stream.next();
    let expression = parse_expression(stream)?;
    stream.expect(TokenKind::RIGHT_PAREN, None)?;
    Ok(expression)
  } else if kind.intersects(TokenKind::UNARY_OP) {
    let operator = stream.next();
    let operand = parse_factor(stream)?;
    Ok(AstNode::unary(operator, operand))
  } else {
    let constant = stream.expect(TokenKind::INTEGER_LITERAL, None)?;
    let value = constant
      .lexeme
      .parse::<i64>()
      .map_err(|_| stream.panic_at(&constant, "base-10 integer literal"))?;
    Ok(AstNode::integer(value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;
  use crate::lexer::lex;

  fn parse_source(source: &str) -> CompileResult<AstNode> {
    parse(lex(source, "test.c").unwrap())
  }

  /// Strip down to the return expression of `int main(){...}`.
  fn return_expression(source: &str) -> AstNode {
    let program = parse_source(source).unwrap();
    let AstNode::Program { declaration } = program else {
      panic!("expected Program");
    };
    let AstNode::FunctionDeclaration { body, .. } = *declaration else {
      panic!("expected FunctionDeclaration");
    };
    let AstNode::ReturnStatement { expression } = *body else {
      panic!("expected ReturnStatement");
    };
    *expression
  }

  fn operator_lexeme(node: &AstNode) -> &str {
    match node {
      AstNode::BinaryOp { operator, .. } => &operator.lexeme,
      AstNode::UnaryOp { operator, .. } => &operator.lexeme,
      _ => panic!("expected an operator node"),
    }
  }

  #[test]
  fn multiplication_binds_tighter_than_addition() {
    let expr = return_expression("int main(){return 1+2*3;}");
    let AstNode::BinaryOp { operator, left, right } = expr else {
      panic!("expected BinaryOp");
    };
    assert_eq!(operator.lexeme, "+");
    assert_eq!(*left, AstNode::integer(1));
    let AstNode::BinaryOp { operator, left, right } = *right else {
      panic!("expected BinaryOp on the right");
    };
    assert_eq!(operator.lexeme, "*");
    assert_eq!(*left, AstNode::integer(2));
    assert_eq!(*right, AstNode::integer(3));
  }

  #[test]
  fn subtraction_chains_left_associatively() {
    // 1-2-3 must parse as (1-2)-3
    let expr = return_expression("int main(){return 1-2-3;}");
    let AstNode::BinaryOp { operator, left, right } = expr else {
      panic!("expected BinaryOp");
    };
    assert_eq!(operator.lexeme, "-");
    assert_eq!(*right, AstNode::integer(3));
    let AstNode::BinaryOp { operator, left, right } = *left else {
      panic!("expected nested BinaryOp on the left");
    };
    assert_eq!(operator.lexeme, "-");
    assert_eq!(*left, AstNode::integer(1));
    assert_eq!(*right, AstNode::integer(2));
  }

  #[test]
  fn parentheses_override_precedence() {
    let expr = return_expression("int main(){return (1+2)*3;}");
    assert_eq!(operator_lexeme(&expr), "*");
  }

  #[test]
  fn precedence_lowest_to_highest() {
    // || binds loosest, so it ends up at the root
    let expr = return_expression("int main(){return 1||2&&3==4<5+6*7;}");
    assert_eq!(operator_lexeme(&expr), "||");
  }

  #[test]
  fn unary_operators_nest_right_associatively() {
    let expr = return_expression("int main(){return !~-1;}");
    let AstNode::UnaryOp { operator, operand } = expr else {
      panic!("expected UnaryOp");
    };
    assert_eq!(operator.lexeme, "!");
    let AstNode::UnaryOp { operator, operand } = *operand else {
      panic!("expected nested UnaryOp");
    };
    assert_eq!(operator.lexeme, "~");
    let AstNode::UnaryOp { operator, operand } = *operand else {
      panic!("expected innermost UnaryOp");
    };
    assert_eq!(operator.lexeme, "-");
    assert_eq!(*operand, AstNode::integer(1));
  }

  #[test]
  fn return_type_may_be_an_identifier() {
    let program = parse_source("myint main(){return 0;}").unwrap();
    let AstNode::Program { declaration } = program else {
      panic!("expected Program");
    };
    let AstNode::FunctionDeclaration { return_type, name, .. } = *declaration else {
      panic!("expected FunctionDeclaration");
    };
    assert_eq!(return_type, "myint");
    assert_eq!(name, "main");
  }

  #[test]
  fn missing_semicolon_is_a_parse_failure() {
    let err = parse_source("int main(){return 1}").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("expected 'SEMI_COLON'"), "{rendered}");
    assert!(rendered.contains("got 'RIGHT_BRACE'"), "{rendered}");
  }

  #[test]
  fn non_return_keyword_is_rejected_with_label() {
    let err = parse_source("int main(){int 1;}").unwrap_err();
    assert!(err.to_string().contains("expected 'return'"));
  }

  #[test]
  fn unknown_tokens_surface_as_parse_failures() {
    let err = parse_source("int main(){return 1 @ 2;}").unwrap_err();
    assert!(err.to_string().contains("got 'UNKNOWN'"));
  }

  #[test]
  fn missing_parameter_list_is_rejected() {
    let err = parse_source("int main{return 1;}").unwrap_err();
    assert!(matches!(err, CompileError::Parse { .. }));
    assert!(err.to_string().contains("expected 'LEFT_PAREN'"));
  }

  #[test]
  fn integer_literals_parse_base_10() {
    let expr = return_expression("int main(){return 017;}");
    assert_eq!(expr, AstNode::integer(17));
  }
}
