//! JSON IR serialization -- a total, deterministic, bottom-up mapping of
//! every model node to canonical JSON.
//!
//! Object keys come out sorted (serde_json's default `Map`), so serializing
//! the same model twice yields byte-identical text. Names are resolved
//! through the symbol table with a synthetic `<category>_<index>` fallback.
//!
//! Faults never escape: each JSON-producing node runs its fallible body
//! through [`IrSerializer::contain`], which replaces a failed subtree with
//! `{"type": "error", "message": ...}` and lets siblings serialize normally.

mod construct;
mod effect;
mod expr;
mod problem;
mod term;

pub use effect::EffectMode;

use crate::domain::{Domain, Problem};
use crate::error::SerializeFault;
use crate::options::IrOptions;
use crate::symbols::{Category, SymbolTable};
use serde_json::{json, Value};

/// Serializer bound to one symbol table.
#[derive(Debug, Clone, Copy)]
pub struct IrSerializer<'a> {
    symbols: &'a SymbolTable,
    options: &'a IrOptions,
}

impl<'a> IrSerializer<'a> {
    pub fn new(symbols: &'a SymbolTable, options: &'a IrOptions) -> Self {
        IrSerializer { symbols, options }
    }

    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Unwrap a node result, turning a fault into an error node.
    pub(crate) fn contain(&self, node: &'static str, result: Result<Value, SerializeFault>) -> Value {
        match result {
            Ok(value) => value,
            Err(fault) => {
                tracing::warn!(node, %fault, "serialization fault contained");
                json!({"message": fault.to_string(), "type": "error"})
            }
        }
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), SerializeFault> {
        if depth > self.options.max_depth {
            return Err(SerializeFault::DepthExceeded {
                max: self.options.max_depth,
            });
        }
        Ok(())
    }

    /// Resolved symbol name, with the `!` prefix of task names dropped when
    /// configured.
    pub(crate) fn symbol_name(&self, category: Category, index: usize) -> String {
        let name = self.symbols.resolve(category, index);
        let is_task = matches!(category, Category::PrimitiveTask | Category::CompoundTask);
        match name.strip_prefix('!') {
            Some(stripped) if is_task && self.options.strip_task_bang => stripped.to_owned(),
            _ => name.into_owned(),
        }
    }

    /// Variable display name, always carrying a leading `?`.
    pub(crate) fn variable_name(&self, index: usize) -> String {
        let name = self.symbols.resolve(Category::Variable, index);
        if name.starts_with('?') {
            name.into_owned()
        } else {
            format!("?{}", name)
        }
    }
}

/// Serialize the `domain` section of the IR.
pub fn serialize_domain(domain: &Domain, options: &IrOptions) -> Value {
    let _span = tracing::debug_span!("serialize_domain", domain = domain.name()).entered();
    IrSerializer::new(domain.symbols(), options).domain(domain)
}

/// Serialize the `problem` section of the IR against the problem's own
/// (extended) symbol table.
pub fn serialize_problem(problem: &Problem, options: &IrOptions) -> Value {
    let _span = tracing::debug_span!("serialize_problem", problem = problem.name()).entered();
    IrSerializer::new(problem.symbols(), options).problem(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_names_lose_their_bang() {
        let mut symbols = SymbolTable::new();
        symbols.intern(Category::PrimitiveTask, "!move");
        symbols.intern(Category::Constant, "!odd");
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        assert_eq!(s.symbol_name(Category::PrimitiveTask, 0), "move");
        assert_eq!(s.symbol_name(Category::Constant, 0), "!odd");

        let keep = IrOptions {
            strip_task_bang: false,
            ..IrOptions::default()
        };
        let s = IrSerializer::new(&symbols, &keep);
        assert_eq!(s.symbol_name(Category::PrimitiveTask, 0), "!move");
    }

    #[test]
    fn variables_always_carry_question_mark() {
        let mut symbols = SymbolTable::new();
        symbols.intern(Category::Variable, "?x");
        symbols.intern(Category::Variable, "y");
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        assert_eq!(s.variable_name(0), "?x");
        assert_eq!(s.variable_name(1), "?y");
        assert_eq!(s.variable_name(5), "?variable_5");
    }

    #[test]
    fn contained_fault_becomes_error_node() {
        let symbols = SymbolTable::new();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let value = s.contain("test", Err(SerializeFault::NonFiniteNumber(f64::NAN)));
        assert_eq!(value["type"], "error");
        assert_eq!(value["message"], "number NaN has no JSON representation");
    }
}
