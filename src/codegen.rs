//! Code generation: lower the AST into stack-machine assembly text.
//!
//! Every expression leaves exactly one value on the operand stack. Binary
//! operators emit the right operand first, then the left, so a `POP A` /
//! `POP B` pair lands the left operand in A and the right in B. Locals live
//! on the frame and are addressed in words below BP. One generator instance
//! serves one compilation unit; the label counter and stack frame are
//! instance state and never shared.

use crate::ast::AstNode;
use crate::error::{CompileError, CompileResult};
use crate::token::{Token, TokenKind};
use crate::visitor::Visitor;
use std::fmt;

/// Insertion-ordered mapping from variable name to frame offset. The first
/// slot sits one word below BP, the second two words, and so on.
#[derive(Debug, Default)]
pub struct StackFrame {
  slots: Vec<String>,
}

impl StackFrame {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record `name` and return its offset. A redeclaration keeps the
  /// original slot (first declaration wins).
  pub fn set(&mut self, name: &str) -> usize {
    if let Some(offset) = self.get(name) {
      return offset;
    }
    self.slots.push(name.to_string());
    self.slots.len()
  }

  pub fn get(&self, name: &str) -> Option<usize> {
    self
      .slots
      .iter()
      .position(|slot| slot == name)
      .map(|index| index + 1)
  }
}

/// A generated branch target. `annotate` derives related sub-labels that
/// cannot collide with any other generated label because the base embeds a
/// per-generator counter value.
pub struct Label {
  base: String,
}

impl Label {
  pub fn annotate(&self, suffix: &str) -> String {
    format!("{}_{}", self.base, suffix)
  }
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.base)
  }
}

/// Emit assembly for one compilation unit.
pub fn generate(ast: &mut AstNode) -> CompileResult<String> {
  let mut generator = CodeGenerator::new();
  generator.visit(ast);
  generator.finish()
}

pub struct CodeGenerator {
  label_id: usize,
  text: String,
  frame: StackFrame,
  error: Option<CompileError>,
}

impl Default for CodeGenerator {
  fn default() -> Self {
    Self::new()
  }
}

impl CodeGenerator {
  pub fn new() -> Self {
    Self {
      label_id: 0,
      text: String::new(),
      frame: StackFrame::new(),
      error: None,
    }
  }

  /// The accumulated assembly, or the first failure encountered.
  pub fn finish(self) -> CompileResult<String> {
    match self.error {
      Some(error) => Err(error),
      None => Ok(self.text),
    }
  }

  /// Mint a fresh label; the counter never resets mid-run.
  pub fn generate_label(&mut self, extra: &str) -> Label {
    let id = self.label_id;
    self.label_id += 1;
    let base = if extra.is_empty() {
      format!("LABEL_{id}")
    } else {
      format!("LABEL_{id}_{extra}")
    };
    Label { base }
  }

  fn emit(&mut self, asm: &str) {
    if self.error.is_none() {
      self.text.push_str(asm);
    }
  }

  /// Record the first failure; later emission is suppressed so no partial
  /// garbage follows a diagnostic.
  fn fail(&mut self, error: CompileError) {
    if self.error.is_none() {
      self.error = Some(error);
    }
  }

  fn undeclared(name: &str, token: Option<&Token>) -> CompileError {
    match token {
      Some(token) => CompileError::UndeclaredVariable {
        name: name.to_string(),
        file: token.file.clone(),
        line: token.line,
        col: token.col,
      },
      None => CompileError::UndeclaredVariable {
        name: name.to_string(),
        file: "[unknown]".to_string(),
        line: 0,
        col: 0,
      },
    }
  }

  /// `CMP A, B` followed by a conditional jump, normalising A to 0 or 1.
  fn compare_block(&mut self, suffix: &str, jump: &str) -> String {
    let label = self.generate_label(suffix);
    let true_label = label.annotate("true");
    let end_label = label.annotate("end");
    format!(
      "  CMP A, B\n  {jump} {true_label}\n  MOV A, 0\n  JMP {end_label}\n{true_label}:\n  MOV A, 1\n{end_label}:\n"
    )
  }
}

impl Visitor for CodeGenerator {
  fn visit_function_declaration(&mut self, node: &mut AstNode) {
    if let AstNode::FunctionDeclaration { name, .. } = node {
      let prologue = format!("{name}:\n  PUSH BP\n  MOV BP, SP\n");
      self.emit(&prologue);
    }
    self.walk(node);
  }

  fn visit_return_statement(&mut self, node: &mut AstNode) {
    self.walk(node);
    self.emit("  POP A\n  MOV SP, BP\n  POP BP\n  ret\n");
  }

  fn visit_declaration(&mut self, node: &mut AstNode) {
    let (name, has_init) = match node {
      AstNode::Declaration { name, init, .. } => (name.clone(), init.is_some()),
      _ => return,
    };
    let offset = self.frame.set(&name);
    self.emit(&format!("  PUSH 0 ; var '{name}'\n"));
    if has_init {
      // Evaluate the initializer, then store it into the reserved slot.
      self.walk(node);
      self.emit(&format!("  POP [BP - {offset}] ; '{name}' = <expr>\n"));
    }
  }

  fn visit_variable_reference(&mut self, node: &mut AstNode) {
    let AstNode::VariableReference { name, token } = node else {
      return;
    };
    match self.frame.get(name) {
      Some(offset) => self.emit(&format!("  PUSH [BP - {offset}] ; '{name}'\n")),
      None => {
        let error = Self::undeclared(name, token.as_ref());
        self.fail(error);
      }
    }
  }

  fn visit_assignment(&mut self, node: &mut AstNode) {
    let (name, token) = match node {
      AstNode::Assignment { name, token, .. } => (name.clone(), token.clone()),
      _ => return,
    };
    let Some(offset) = self.frame.get(&name) else {
      self.fail(Self::undeclared(&name, token.as_ref()));
      return;
    };
    self.walk(node);
    self.emit(&format!("  POP [BP - {offset}] ; '{name}' = <expr>\n"));
  }

  fn visit_binary_op(&mut self, node: &mut AstNode) {
    let operator = match node {
      AstNode::BinaryOp { operator, .. } => operator.clone(),
      _ => return,
    };
    if let AstNode::BinaryOp { left, right, .. } = node {
      self.visit(right);
      self.visit(left);
    }
    self.emit("  POP A\n  POP B\n");

    let sequence = match operator.kind {
      TokenKind::MULTIPLICATION => "  MUL B\n".to_string(),
      // the dialect's DIV leaves the remainder in Y, which must be clear
      TokenKind::DIVISION => "  MOV Y, 0\n  DIV B\n".to_string(),
      TokenKind::ADDITION => "  ADD A, B\n".to_string(),
      TokenKind::NEGATION => "  SUB A, B\n".to_string(),
      TokenKind::BITWISE_AND => "  AND A, B\n".to_string(),
      TokenKind::BITWISE_OR => "  OR A, B\n".to_string(),
      TokenKind::BITWISE_XOR => "  XOR A, B\n".to_string(),
      TokenKind::EQUALS => self.compare_block("equals", "JZ"),
      TokenKind::NOT_EQUALS => self.compare_block("not_equals", "JNZ"),
      TokenKind::LESS_THAN => self.compare_block("less_than", "JL"),
      TokenKind::LESS_OR_EQUALS => self.compare_block("less_or_equals", "JLE"),
      TokenKind::GREATER_THAN => self.compare_block("greater_than", "JG"),
      TokenKind::GREATER_OR_EQUALS => self.compare_block("greater_or_equals", "JGE"),
      TokenKind::LOGICAL_OR => {
        let label = self.generate_label("logical_or");
        let true_label = label.annotate("true");
        let end_label = label.annotate("end");
        format!(
          "  OR A, B\n  JNZ {true_label}\n  MOV A, 0\n  JMP {end_label}\n{true_label}:\n  MOV A, 1\n{end_label}:\n"
        )
      }
      TokenKind::LOGICAL_AND => {
        let label = self.generate_label("logical_and");
        let true_label = label.annotate("true");
        let end_label = label.annotate("end");
        // a zero left operand short-circuits: A is already the result
        format!(
          "  CMP A, 0\n  JZ {end_label}\n  CMP B, 0\n  JNZ {true_label}\n  MOV A, 0\n  JMP {end_label}\n{true_label}:\n  MOV A, 1\n{end_label}:\n"
        )
      }
      _ => {
        self.fail(CompileError::UnsupportedOperator {
          lexeme: operator.lexeme,
        });
        return;
      }
    };
    self.emit(&sequence);
    self.emit("  PUSH A\n");
  }

  fn visit_unary_op(&mut self, node: &mut AstNode) {
    let operator = match node {
      AstNode::UnaryOp { operator, .. } => operator.clone(),
      _ => return,
    };
    self.walk(node);
    self.emit("  POP A\n");

    let sequence = match operator.kind {
      TokenKind::LOGICAL_NOT => {
        let label = self.generate_label("logical_not");
        let true_label = label.annotate("true");
        let end_label = label.annotate("end");
        format!(
          "  CMP A, 0\n  JZ {true_label}\n  MOV A, 0\n  JMP {end_label}\n{true_label}:\n  MOV A, 1\n{end_label}:\n"
        )
      }
      TokenKind::BITWISE_NOT => "  NOT A\n".to_string(),
      TokenKind::NEGATION => "  NEG A\n".to_string(),
      _ => {
        self.fail(CompileError::UnsupportedOperator {
          lexeme: operator.lexeme,
        });
        return;
      }
    };
    self.emit(&sequence);
    self.emit("  PUSH A\n");
  }

  fn visit_integer_constant(&mut self, node: &mut AstNode) {
    if let AstNode::IntegerConstant { value } = node {
      self.emit(&format!("  PUSH {value}\n"));
    }
  }
}
