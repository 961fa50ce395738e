//! Constant folding: the one optimization we do.
//!
//! A pre-order pass that replaces `<constant> + <constant>` with the summed
//! constant. Other operators are deliberately left alone for now. Folding
//! never mutates a node in place; the parent's child slot is swapped for a
//! freshly built constant.

use crate::ast::AstNode;
use crate::token::TokenKind;
use crate::visitor::Visitor;

/// Run the folding pass over `node`, then give the root itself one chance
/// to fold (it has no parent to do it on its behalf).
pub fn optimize(node: &mut AstNode) {
  ConstantFolder.visit(node);
  fold(node);
}

/// Replace `node` with an `IntegerConstant` if it is an addition of two
/// integer constants; otherwise leave it untouched.
pub fn fold(node: &mut AstNode) {
  let folded = match node {
    AstNode::BinaryOp {
      operator,
      left,
      right,
    } if operator.kind == TokenKind::ADDITION => match (left.as_ref(), right.as_ref()) {
      (
        AstNode::IntegerConstant { value: left },
        AstNode::IntegerConstant { value: right },
      ) => Some(left.wrapping_add(*right)),
      _ => None,
    },
    _ => None,
  };
  if let Some(value) = folded {
    *node = AstNode::integer(value);
  }
}

struct ConstantFolder;

impl Visitor for ConstantFolder {
  fn visit_return_statement(&mut self, node: &mut AstNode) {
    if let AstNode::ReturnStatement { expression } = node {
      fold(expression);
    }
    self.walk(node);
  }

  fn visit_binary_op(&mut self, node: &mut AstNode) {
    if let AstNode::BinaryOp { left, right, .. } = node {
      fold(left);
      fold(right);
    }
    self.walk(node);
  }
}
