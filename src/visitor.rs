//! Double-dispatch visitor over the AST.
//!
//! A pass implements the handlers for the variants it cares about; every
//! other variant falls back to `walk`, which recurses into the node's
//! children in declaration order. Nodes are handed out `&mut` so rewriting
//! passes can replace children in place; read-only passes just ignore that.

use crate::ast::AstNode;

pub trait Visitor {
  /// Dispatch on the node's variant. Handlers receive the whole node so
  /// they can destructure exactly the fields they need.
  fn visit(&mut self, node: &mut AstNode) {
    match node {
      AstNode::Program { .. } => self.visit_program(node),
      AstNode::FunctionDeclaration { .. } => self.visit_function_declaration(node),
      AstNode::Declaration { .. } => self.visit_declaration(node),
      AstNode::Assignment { .. } => self.visit_assignment(node),
      AstNode::VariableReference { .. } => self.visit_variable_reference(node),
      AstNode::ReturnStatement { .. } => self.visit_return_statement(node),
      AstNode::BinaryOp { .. } => self.visit_binary_op(node),
      AstNode::UnaryOp { .. } => self.visit_unary_op(node),
      AstNode::IntegerConstant { .. } => self.visit_integer_constant(node),
    }
  }

  fn visit_program(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_function_declaration(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_declaration(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_assignment(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_variable_reference(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_return_statement(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_binary_op(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_unary_op(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  fn visit_integer_constant(&mut self, node: &mut AstNode) {
    self.walk(node);
  }

  /// Visit each child in declaration order. Leaves have no children.
  fn walk(&mut self, node: &mut AstNode) {
    match node {
      AstNode::Program { declaration } => self.visit(declaration),
      AstNode::FunctionDeclaration { body, .. } => self.visit(body),
      AstNode::Declaration { init, .. } => {
        if let Some(init) = init {
          self.visit(init);
        }
      }
      AstNode::Assignment { value, .. } => self.visit(value),
      AstNode::ReturnStatement { expression } => self.visit(expression),
      AstNode::BinaryOp { left, right, .. } => {
        self.visit(left);
        self.visit(right);
      }
      AstNode::UnaryOp { operand, .. } => self.visit(operand),
      AstNode::VariableReference { .. } | AstNode::IntegerConstant { .. } => {}
    }
  }
}
