//! Abstract syntax tree produced by the parser.
//!
//! A closed set of variants; every node owns its children exclusively.
//! Nodes that later passes may need to complain about carry the token that
//! produced them, purely for error reporting.

use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
  /// One translation unit holding a single top-level declaration.
  Program { declaration: Box<AstNode> },
  FunctionDeclaration {
    return_type: String,
    name: String,
    body: Box<AstNode>,
    token: Option<Token>,
  },
  /// `int x;` or `int x = <expr>;` — the first declaration of a name wins.
  Declaration {
    name: String,
    init: Option<Box<AstNode>>,
    token: Option<Token>,
  },
  Assignment {
    name: String,
    value: Box<AstNode>,
    token: Option<Token>,
  },
  VariableReference {
    name: String,
    token: Option<Token>,
  },
  ReturnStatement { expression: Box<AstNode> },
  BinaryOp {
    operator: Token,
    left: Box<AstNode>,
    right: Box<AstNode>,
  },
  UnaryOp {
    operator: Token,
    operand: Box<AstNode>,
  },
  IntegerConstant { value: i64 },
}

impl AstNode {
  pub fn program(declaration: AstNode) -> Self {
    Self::Program {
      declaration: Box::new(declaration),
    }
  }

  pub fn function_declaration(
    return_type: impl Into<String>,
    name: impl Into<String>,
    body: AstNode,
    token: Option<Token>,
  ) -> Self {
    Self::FunctionDeclaration {
      return_type: return_type.into(),
      name: name.into(),
      body: Box::new(body),
      token,
    }
  }

  pub fn declaration(name: impl Into<String>, init: Option<AstNode>, token: Option<Token>) -> Self {
    Self::Declaration {
      name: name.into(),
      init: init.map(Box::new),
      token,
    }
  }

  pub fn assignment(name: impl Into<String>, value: AstNode, token: Option<Token>) -> Self {
    Self::Assignment {
      name: name.into(),
      value: Box::new(value),
      token,
    }
  }

  pub fn variable(name: impl Into<String>, token: Option<Token>) -> Self {
    Self::VariableReference {
      name: name.into(),
      token,
    }
  }

  pub fn return_statement(expression: AstNode) -> Self {
    Self::ReturnStatement {
      expression: Box::new(expression),
    }
  }

  pub fn binary(operator: Token, left: AstNode, right: AstNode) -> Self {
    Self::BinaryOp {
      operator,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn unary(operator: Token, operand: AstNode) -> Self {
    Self::UnaryOp {
      operator,
      operand: Box::new(operand),
    }
  }

  pub fn integer(value: i64) -> Self {
    Self::IntegerConstant { value }
  }
}
