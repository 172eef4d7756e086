//! Typed views of an HTN IR document.
//!
//! Only the structure consumers need is parsed: names, arities, branch
//! labels and task references. Expression trees are kept as
//! `serde_json::Value` so that readers need not model every node kind.

use serde::{Deserialize, Serialize};

/// A parsed IR document. At least one of `domain` and `problem` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrBundle {
    /// Requirement tags as written (e.g. `":NP"`). Empty for problem-only
    /// documents.
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<ProblemSummary>,
}

impl IrBundle {
    pub fn has_requirement(&self, tag: &str) -> bool {
        self.requirements.iter().any(|r| r == tag)
    }
}

// ── Domain ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainSummary {
    pub name: String,
    pub operators: Vec<OperatorSummary>,
    pub methods: Vec<MethodSummary>,
    pub axioms: Vec<AxiomSummary>,
    pub procedures: Vec<String>,
}

impl DomainSummary {
    pub fn operator(&self, name: &str) -> Option<&OperatorSummary> {
        self.operators.iter().find(|o| o.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodSummary> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Number of serialization error nodes anywhere in the domain.
    pub fn error_nodes(&self) -> usize {
        let ops: usize = self.operators.iter().map(|o| o.error_nodes).sum();
        let methods: usize = self.methods.iter().map(|m| m.error_nodes).sum();
        let axioms: usize = self.axioms.iter().map(|a| a.error_nodes).sum();
        ops + methods + axioms
    }
}

/// An entry of `primitive_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorSummary {
    pub name: String,
    pub arity: usize,
    /// `null` when the operator has no precondition.
    pub preconditions: serde_json::Value,
    /// Number of entries in the flat `effect` array.
    pub effects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<serde_json::Value>,
    pub error_nodes: usize,
}

/// An entry of `compound_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodSummary {
    pub name: String,
    pub arity: usize,
    pub branches: Vec<BranchSummary>,
    pub error_nodes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchSummary {
    /// The branch label.
    pub name: String,
    pub preconditions: serde_json::Value,
    pub tasks: Vec<TaskRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxiomSummary {
    pub name: String,
    pub arity: usize,
    /// Branch labels in evaluation order.
    pub branches: Vec<String>,
    pub error_nodes: usize,
}

// ── Tasks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Written as `"predicate"` in the IR.
    Primitive,
    /// Written as `"task"` in the IR.
    Compound,
}

impl TaskKind {
    pub fn from_wire(tag: &str) -> Option<TaskKind> {
        match tag {
            "predicate" => Some(TaskKind::Primitive),
            "task" => Some(TaskKind::Compound),
            _ => None,
        }
    }
}

/// A task occurrence in a method branch or a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRef {
    pub name: String,
    pub kind: TaskKind,
    pub parameters: serde_json::Value,
}

// ── Problem ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemSummary {
    pub name: String,
    pub goal: Vec<TaskRef>,
    pub init: Vec<Fact>,
    pub additional_constants: Vec<String>,
}

/// An initial-state fact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fact {
    pub predicate: String,
    pub parameters: Vec<String>,
}
