//! Logical expressions, discriminated by `type`.

use super::IrSerializer;
use crate::ast::{LogicalExpr, Term};
use crate::error::SerializeFault;
use crate::symbols::Category;
use serde_json::{json, Value};

impl IrSerializer<'_> {
    pub fn expression(&self, expr: &LogicalExpr) -> Value {
        self.expression_at(expr, 0)
    }

    /// A precondition slot: `null` only when the precondition is absent.
    pub fn precondition(&self, precondition: Option<&LogicalExpr>) -> Value {
        match precondition {
            Some(expr) => self.expression(expr),
            None => Value::Null,
        }
    }

    pub(crate) fn expression_at(&self, expr: &LogicalExpr, depth: usize) -> Value {
        self.contain("expression", self.try_expression(expr, depth))
    }

    fn try_expression(&self, expr: &LogicalExpr, depth: usize) -> Result<Value, SerializeFault> {
        self.check_depth(depth)?;
        let next = depth + 1;
        let value = match expr {
            LogicalExpr::Atomic(predicate) => {
                self.predicate_at(predicate, Category::Constant, depth)
            }
            LogicalExpr::And(operands) => match operands.len() {
                found @ (0 | 1) => {
                    return Err(SerializeFault::TooFewOperands {
                        kind: "conjunction",
                        found,
                    })
                }
                2 => json!({
                    "left": self.expression_at(&operands[0], next),
                    "right": self.expression_at(&operands[1], next),
                    "type": "and",
                }),
                _ => json!({
                    "conjuncts": self.expressions_at(operands, next),
                    "type": "and",
                }),
            },
            LogicalExpr::Or(operands) => {
                if operands.len() < 2 {
                    return Err(SerializeFault::TooFewOperands {
                        kind: "disjunction",
                        found: operands.len(),
                    });
                }
                json!({
                    "disjuncts": self.expressions_at(operands, next),
                    "type": "or",
                })
            }
            LogicalExpr::Not(inner) => json!({
                "expression": self.expression_at(inner, next),
                "type": "not",
            }),
            LogicalExpr::ForAll {
                premise,
                consequence,
            } => json!({
                "expression": self.expression_at(premise, next),
                "predicates": self.expression_at(consequence, next),
                "type": "forall",
                "variables": self.bound_variables(premise),
            }),
            LogicalExpr::Call(call) => json!({
                "arguments": self.terms_at(call.args(), depth),
                "function": call.function(),
                "type": "call",
            }),
            LogicalExpr::Assign { var, value } => json!({
                "function": self.variable_name(*var),
                "operation": "assign",
                "type": "assignment",
                "value": self.term_at(value, next),
            }),
            LogicalExpr::Nil => json!({"type": "nil"}),
            LogicalExpr::Unknown { kind } => json!({"kind": kind, "type": "unknown"}),
        };
        Ok(value)
    }

    fn expressions_at(&self, operands: &[LogicalExpr], depth: usize) -> Value {
        Value::Array(
            operands
                .iter()
                .map(|e| self.expression_at(e, depth))
                .collect(),
        )
    }

    /// The distinct variables of a quantifier premise, in first-occurrence
    /// order, as Variable terms.
    pub(crate) fn bound_variables(&self, premise: &LogicalExpr) -> Value {
        Value::Array(
            premise_variables(premise)
                .into_iter()
                .map(|index| json!({"name": self.variable_name(index), "type": "Variable"}))
                .collect(),
        )
    }
}

enum Node<'a> {
    Expr(&'a LogicalExpr),
    Term(&'a Term),
}

/// Left-to-right walk with an explicit stack; children are pushed in
/// reverse so they pop in source order.
fn premise_variables(premise: &LogicalExpr) -> Vec<usize> {
    let mut seen = Vec::new();
    let mut stack = vec![Node::Expr(premise)];
    while let Some(node) = stack.pop() {
        match node {
            Node::Expr(expr) => match expr {
                LogicalExpr::Atomic(predicate) => stack.push(Node::Term(predicate.params())),
                LogicalExpr::And(operands) | LogicalExpr::Or(operands) => {
                    stack.extend(operands.iter().rev().map(Node::Expr));
                }
                LogicalExpr::Not(inner) => stack.push(Node::Expr(inner)),
                LogicalExpr::ForAll {
                    premise,
                    consequence,
                } => {
                    stack.push(Node::Expr(consequence));
                    stack.push(Node::Expr(premise));
                }
                LogicalExpr::Call(call) => {
                    stack.extend(call.args().iter().rev().map(Node::Term));
                }
                LogicalExpr::Assign { var, value } => {
                    stack.push(Node::Term(value));
                    note_var(*var, &mut seen);
                }
                LogicalExpr::Nil | LogicalExpr::Unknown { .. } => {}
            },
            Node::Term(term) => match term {
                Term::Variable(index) => note_var(*index, &mut seen),
                Term::List { head, tail } => {
                    stack.push(Node::Term(tail));
                    stack.push(Node::Term(head));
                }
                Term::Call(call) => {
                    stack.extend(call.args().iter().rev().map(Node::Term));
                }
                Term::Constant(_) | Term::Number(_) | Term::Nil => {}
            },
        }
    }
    seen
}

fn note_var(index: usize, seen: &mut Vec<usize>) {
    if !seen.contains(&index) {
        seen.push(index);
    }
}
