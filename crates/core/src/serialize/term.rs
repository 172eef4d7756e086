//! Terms, parameter lists and predicate references.

use super::IrSerializer;
use crate::ast::{CallTerm, Predicate, Term};
use crate::error::SerializeFault;
use crate::symbols::Category;
use serde_json::{json, Value};

impl IrSerializer<'_> {
    /// `{name, type}` for scalars, a flattened array for lists.
    pub fn term(&self, term: &Term) -> Value {
        self.term_at(term, 0)
    }

    /// A parameter term as a JSON array: `Nil` is empty, a list is
    /// flattened with any improper tail appended, and a lone scalar becomes
    /// a one-element array.
    pub fn parameters(&self, params: &Term) -> Value {
        self.parameters_at(params, 0)
    }

    pub(crate) fn term_at(&self, term: &Term, depth: usize) -> Value {
        self.contain("term", self.try_term(term, depth))
    }

    fn try_term(&self, term: &Term, depth: usize) -> Result<Value, SerializeFault> {
        self.check_depth(depth)?;
        let value = match term {
            Term::Variable(index) => named(self.variable_name(*index), "Variable"),
            Term::Constant(index) => named(
                self.symbols.resolve(Category::Constant, *index).into_owned(),
                "Constant",
            ),
            Term::Number(n) => named(number_text(*n)?, "Number"),
            Term::Call(call) => named(self.call_text(call), "Call"),
            Term::List { .. } | Term::Nil => self.parameters_at(term, depth),
        };
        Ok(value)
    }

    pub(crate) fn parameters_at(&self, params: &Term, depth: usize) -> Value {
        let (items, tail) = params.flatten();
        Value::Array(
            items
                .into_iter()
                .chain(tail)
                .map(|t| self.term_at(t, depth + 1))
                .collect(),
        )
    }

    pub(crate) fn terms_at(&self, terms: &[Term], depth: usize) -> Value {
        Value::Array(terms.iter().map(|t| self.term_at(t, depth + 1)).collect())
    }

    /// `{type: "predicate", name, parameters}` with the head resolved in
    /// `category`.
    pub fn predicate(&self, predicate: &Predicate, category: Category) -> Value {
        self.predicate_at(predicate, category, 0)
    }

    pub(crate) fn predicate_at(
        &self,
        predicate: &Predicate,
        category: Category,
        depth: usize,
    ) -> Value {
        let result = self.check_depth(depth).map(|()| {
            json!({
                "name": self.symbol_name(category, predicate.head()),
                "parameters": self.parameters_at(predicate.params(), depth),
                "type": "predicate",
            })
        });
        self.contain("predicate", result)
    }

    /// Source-like rendering of a term, e.g. `?x`, `(a b . ?rest)` or
    /// `(call + ?x 1)`.
    pub fn term_text(&self, term: &Term) -> String {
        match term {
            Term::Variable(index) => self.variable_name(*index),
            Term::Constant(index) => self
                .symbols
                .resolve(Category::Constant, *index)
                .into_owned(),
            Term::Number(n) => n.to_string(),
            Term::Call(call) => self.call_text(call),
            Term::Nil => "nil".to_owned(),
            Term::List { .. } => {
                let (items, tail) = term.flatten();
                let mut parts: Vec<String> = items.iter().map(|t| self.term_text(t)).collect();
                if let Some(tail) = tail {
                    parts.push(".".to_owned());
                    parts.push(self.term_text(tail));
                }
                format!("({})", parts.join(" "))
            }
        }
    }

    pub(crate) fn call_text(&self, call: &CallTerm) -> String {
        let mut text = format!("(call {}", call.function());
        for arg in call.args() {
            text.push(' ');
            text.push_str(&self.term_text(arg));
        }
        text.push(')');
        text
    }
}

fn named(name: String, kind: &str) -> Value {
    json!({"name": name, "type": kind})
}

fn number_text(n: f64) -> Result<String, SerializeFault> {
    if !n.is_finite() {
        return Err(SerializeFault::NonFiniteNumber(n));
    }
    Ok(n.to_string())
}
