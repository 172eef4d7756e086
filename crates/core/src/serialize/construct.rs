//! Operators, methods, axioms, task lists and the `domain` object.

use super::IrSerializer;
use crate::ast::{Axiom, Method, Operator, TaskAtom, TaskList};
use crate::domain::Domain;
use crate::symbols::Category;
use serde_json::{json, Map, Value};

impl IrSerializer<'_> {
    pub fn operator(&self, op: &Operator) -> Value {
        let mut obj = Map::new();
        if let Some(cost) = &op.cost {
            obj.insert("cost".to_owned(), self.term_at(cost, 1));
        }
        obj.insert("effect".to_owned(), self.effects(&op.effects));
        obj.insert(
            "name".to_owned(),
            json!(self.symbol_name(Category::PrimitiveTask, op.head.head())),
        );
        obj.insert(
            "parameters".to_owned(),
            self.parameters_at(op.head.params(), 0),
        );
        obj.insert(
            "preconditions".to_owned(),
            self.precondition(op.precondition.as_ref()),
        );
        Value::Object(obj)
    }

    pub fn method(&self, method: &Method) -> Value {
        let branches: Vec<Value> = method
            .branches
            .iter()
            .map(|branch| {
                json!({
                    "name": branch.label,
                    "preconditions": self.precondition(branch.precondition.as_ref()),
                    "tasks": self.tasks(&branch.tasks),
                })
            })
            .collect();
        json!({
            "methods": branches,
            "name": self.symbol_name(Category::CompoundTask, method.head.head()),
            "parameters": self.parameters_at(method.head.params(), 0),
        })
    }

    pub fn axiom(&self, axiom: &Axiom) -> Value {
        let branches: Vec<Value> = axiom
            .branches
            .iter()
            .map(|branch| {
                json!({
                    "name": branch.label,
                    "preconditions": self.precondition(branch.precondition.as_ref()),
                })
            })
            .collect();
        json!({
            "branches": branches,
            "name": self.symbol_name(Category::Constant, axiom.head.head()),
            "parameters": self.parameters_at(axiom.head.params(), 0),
        })
    }

    /// A task list flattened to an array of task references.
    pub fn tasks(&self, list: &TaskList) -> Value {
        let mut out = Vec::new();
        self.push_tasks(list, 0, &mut out);
        Value::Array(out)
    }

    fn push_tasks(&self, list: &TaskList, depth: usize, out: &mut Vec<Value>) {
        if let Err(fault) = self.check_depth(depth) {
            out.push(self.contain("tasks", Err(fault)));
            return;
        }
        match list {
            TaskList::Empty => {}
            TaskList::Atom(atom) => out.push(self.task_at(atom, depth)),
            TaskList::Sequence(children) => {
                for child in children {
                    self.push_tasks(child, depth + 1, out);
                }
            }
        }
    }

    /// `{name, type, parameters}`; `type` is `"predicate"` for primitive
    /// tasks and `"task"` for compound ones.
    pub fn task(&self, atom: &TaskAtom) -> Value {
        self.task_at(atom, 0)
    }

    fn task_at(&self, atom: &TaskAtom, depth: usize) -> Value {
        let (category, kind) = if atom.primitive {
            (Category::PrimitiveTask, "predicate")
        } else {
            (Category::CompoundTask, "task")
        };
        json!({
            "name": self.symbol_name(category, atom.head.head()),
            "parameters": self.parameters_at(atom.head.params(), depth),
            "type": kind,
        })
    }

    /// The whole `domain` object.
    pub fn domain(&self, domain: &Domain) -> Value {
        let operators: Vec<Value> = domain.operators().iter().map(|o| self.operator(o)).collect();
        let methods: Vec<Value> = domain.methods().iter().map(|m| self.method(m)).collect();
        let axioms: Vec<Value> = domain.axioms().iter().map(|a| self.axiom(a)).collect();
        tracing::trace!(
            operators = operators.len(),
            methods = methods.len(),
            axioms = axioms.len(),
            "domain constructs serialized"
        );
        json!({
            "axioms": axioms,
            "compound_tasks": methods,
            "name": domain.name(),
            "primitive_tasks": operators,
            "procedures": domain.procedures(),
        })
    }
}
