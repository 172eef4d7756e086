//! Operator effects.
//!
//! Every call carries an [`EffectMode`]: the same `Atomic` node renders as
//! a plain predicate in the add list and wrapped in a `not` in the delete
//! list, and a forall effect passes its mode on to each template.

use super::IrSerializer;
use crate::ast::{Effect, EffectLists, Predicate};
use crate::error::SerializeFault;
use crate::symbols::Category;
use serde_json::{json, Value};

/// Which list of an operator an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectMode {
    Delete,
    Add,
}

impl EffectMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectMode::Delete => "delete",
            EffectMode::Add => "add",
        }
    }

    fn is_add(self) -> bool {
        self == EffectMode::Add
    }
}

impl IrSerializer<'_> {
    /// The flat `effect` array: deletes in declaration order, then adds.
    pub fn effects(&self, effects: &EffectLists) -> Value {
        let deletes = effects.delete.iter().map(|e| (e, EffectMode::Delete));
        let adds = effects.add.iter().map(|e| (e, EffectMode::Add));
        Value::Array(
            deletes
                .chain(adds)
                .map(|(effect, mode)| self.effect_at(effect, mode, 1))
                .collect(),
        )
    }

    pub fn effect(&self, effect: &Effect, mode: EffectMode) -> Value {
        self.effect_at(effect, mode, 0)
    }

    fn effect_at(&self, effect: &Effect, mode: EffectMode, depth: usize) -> Value {
        self.contain("effect", self.try_effect(effect, mode, depth))
    }

    fn try_effect(
        &self,
        effect: &Effect,
        mode: EffectMode,
        depth: usize,
    ) -> Result<Value, SerializeFault> {
        self.check_depth(depth)?;
        let next = depth + 1;
        let value = match effect {
            Effect::Atomic(predicate) => self.effect_atom(predicate, mode, depth),
            Effect::ForAll { premise, templates } => json!({
                "add_list": mode.is_add(),
                "expression": self.expression_at(premise, next),
                "predicates": templates
                    .iter()
                    .map(|t| self.effect_atom(t, mode, next))
                    .collect::<Vec<_>>(),
                "type": "forall",
                "variables": self.bound_variables(premise),
            }),
            Effect::Protection(target) => json!({
                "effect_type": mode.as_str(),
                "predicate": self.predicate_at(target, Category::Constant, next),
                "type": "protection",
            }),
            Effect::Unknown { kind } => json!({
                "effect_type": mode.as_str(),
                "kind": kind,
                "type": "unknown",
            }),
        };
        Ok(value)
    }

    /// A single atom under `mode`.
    fn effect_atom(&self, predicate: &Predicate, mode: EffectMode, depth: usize) -> Value {
        match mode {
            EffectMode::Add => self.predicate_at(predicate, Category::Constant, depth),
            EffectMode::Delete => json!({
                "expression": [self.predicate_at(predicate, Category::Constant, depth + 1)],
                "type": "not",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LogicalExpr, Term};
    use crate::options::IrOptions;
    use crate::symbols::SymbolTable;

    fn table() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.intern(Category::Constant, "on");
        symbols.intern(Category::Constant, "a");
        symbols.intern(Category::Constant, "b");
        symbols.intern(Category::Variable, "?x");
        symbols
    }

    fn on(x: Term, y: Term) -> Predicate {
        Predicate::new(0, vec![x, y])
    }

    #[test]
    fn delete_atoms_are_wrapped_in_not() {
        let symbols = table();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let atom = Effect::Atomic(on(Term::Variable(0), Term::Constant(1)));
        let plain = s.effect(&atom, EffectMode::Add);
        assert_eq!(plain["type"], "predicate");
        let wrapped = s.effect(&atom, EffectMode::Delete);
        assert_eq!(wrapped["type"], "not");
        assert_eq!(wrapped["expression"], json!([plain]));
    }

    #[test]
    fn deletes_precede_adds() {
        let symbols = table();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let lists = EffectLists::new(
            vec![Effect::Atomic(on(Term::Variable(0), Term::Constant(1)))],
            vec![
                Effect::Atomic(on(Term::Variable(0), Term::Constant(2))),
                Effect::Atomic(on(Term::Constant(2), Term::Constant(1))),
            ],
        );
        let value = s.effects(&lists);
        let array = value.as_array().cloned().unwrap_or_default();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0]["type"], "not");
        assert_eq!(array[1]["parameters"][1]["name"], "b");
        assert_eq!(array[2]["parameters"][0]["name"], "b");
    }

    #[test]
    fn forall_threads_mode_into_templates() {
        let symbols = table();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let effect = Effect::ForAll {
            premise: LogicalExpr::atom(0, vec![Term::Variable(0), Term::Constant(1)]),
            templates: vec![on(Term::Variable(0), Term::Constant(2))],
        };

        let deleted = s.effect(&effect, EffectMode::Delete);
        assert_eq!(deleted["type"], "forall");
        assert_eq!(deleted["add_list"], false);
        assert_eq!(deleted["predicates"][0]["type"], "not");
        assert_eq!(deleted["variables"], json!([{"name": "?x", "type": "Variable"}]));

        let added = s.effect(&effect, EffectMode::Add);
        assert_eq!(added["add_list"], true);
        assert_eq!(added["predicates"][0]["type"], "predicate");
    }

    #[test]
    fn protection_records_its_list() {
        let symbols = table();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let value = s.effect(
            &Effect::Protection(on(Term::Constant(1), Term::Constant(2))),
            EffectMode::Add,
        );
        assert_eq!(value["type"], "protection");
        assert_eq!(value["effect_type"], "add");
        assert_eq!(value["predicate"]["name"], "on");
    }

    #[test]
    fn unknown_effect_is_a_marker() {
        let symbols = table();
        let options = IrOptions::default();
        let s = IrSerializer::new(&symbols, &options);
        let value = s.effect(
            &Effect::Unknown {
                kind: "timed".to_owned(),
            },
            EffectMode::Delete,
        );
        assert_eq!(
            value,
            json!({"effect_type": "delete", "kind": "timed", "type": "unknown"})
        );
    }
}
