//! The domain aggregate and the problem layered on top of it.
//!
//! A [`DomainBuilder`] is the mutable surface the parser drives: it interns
//! symbols and collects operators, methods and axioms in declaration order.
//! [`DomainBuilder::finish`] seals the constant category and freezes the
//! result into a read-only [`Domain`]. A [`ProblemBuilder`] copies the
//! domain's symbol table and may extend the constant category with
//! problem-local constants.

use crate::ast::*;
use crate::error::BuildError;
use crate::symbols::{Category, SymbolTable};
use std::collections::HashSet;

/// A compiled HTN domain. Read-only once built.
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    symbols: SymbolTable,
    operators: Vec<Operator>,
    methods: Vec<Method>,
    axioms: Vec<Axiom>,
    procedures: Vec<String>,
}

impl Domain {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Names of the external procedures the domain calls, first use first.
    pub fn procedures(&self) -> &[String] {
        &self.procedures
    }
}

/// Mutable domain under construction.
#[derive(Debug, Default)]
pub struct DomainBuilder {
    name: String,
    symbols: SymbolTable,
    operators: Vec<Operator>,
    methods: Vec<Method>,
    axioms: Vec<Axiom>,
    procedures: Vec<String>,
}

impl DomainBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        DomainBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn intern(&mut self, category: Category, name: &str) -> usize {
        self.symbols.intern(category, name)
    }

    pub fn constant(&mut self, name: &str) -> usize {
        self.symbols.intern(Category::Constant, name)
    }

    pub fn primitive_task(&mut self, name: &str) -> usize {
        self.symbols.intern(Category::PrimitiveTask, name)
    }

    pub fn compound_task(&mut self, name: &str) -> usize {
        self.symbols.intern(Category::CompoundTask, name)
    }

    pub fn variable(&mut self, name: &str) -> usize {
        self.symbols.intern(Category::Variable, name)
    }

    /// Record an external procedure the domain depends on. Repeats are ignored.
    pub fn add_procedure(&mut self, name: &str) {
        if !self.procedures.iter().any(|p| p == name) {
            self.procedures.push(name.to_owned());
        }
    }

    /// Append an operator and return its creation-order id.
    pub fn add_operator(
        &mut self,
        head: Predicate,
        precondition: Option<LogicalExpr>,
        effects: EffectLists,
        cost: Option<Term>,
    ) -> usize {
        let id = self.operators.len();
        self.operators.push(Operator {
            id,
            head,
            precondition,
            effects,
            cost,
        });
        id
    }

    /// Append a method and return its creation-order id.
    pub fn add_method(
        &mut self,
        head: Predicate,
        branches: Vec<MethodBranch>,
    ) -> Result<usize, BuildError> {
        let task = self
            .symbols
            .resolve(Category::CompoundTask, head.head())
            .into_owned();
        if branches.is_empty() {
            return Err(BuildError::EmptyMethod { task });
        }
        check_unique_labels("method", &task, branches.iter().map(|b| b.label.as_str()))?;

        let id = self.methods.len();
        self.methods.push(Method { id, head, branches });
        Ok(id)
    }

    /// Append an axiom and return its creation-order id.
    pub fn add_axiom(
        &mut self,
        head: Predicate,
        branches: Vec<AxiomBranch>,
    ) -> Result<usize, BuildError> {
        let predicate = self
            .symbols
            .resolve(Category::Constant, head.head())
            .into_owned();
        if branches.is_empty() {
            return Err(BuildError::EmptyAxiom { predicate });
        }
        check_unique_labels(
            "axiom",
            &predicate,
            branches.iter().map(|b| b.label.as_str()),
        )?;

        let id = self.axioms.len();
        self.axioms.push(Axiom { id, head, branches });
        Ok(id)
    }

    /// Seal the constant category and freeze the domain.
    pub fn finish(mut self) -> Domain {
        self.symbols.seal_constants();
        tracing::debug!(
            domain = %self.name,
            constants = self.symbols.constants_size(),
            operators = self.operators.len(),
            methods = self.methods.len(),
            axioms = self.axioms.len(),
            "domain sealed"
        );
        Domain {
            name: self.name,
            symbols: self.symbols,
            operators: self.operators,
            methods: self.methods,
            axioms: self.axioms,
            procedures: self.procedures,
        }
    }
}

fn check_unique_labels<'a>(
    construct: &'static str,
    name: &str,
    labels: impl Iterator<Item = &'a str>,
) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(BuildError::DuplicateBranchLabel {
                construct,
                name: name.to_owned(),
                label: label.to_owned(),
            });
        }
    }
    Ok(())
}

/// A planning problem: initial state plus the task list to accomplish.
#[derive(Debug, Clone)]
pub struct Problem {
    name: String,
    symbols: SymbolTable,
    init: Vec<Predicate>,
    goal: TaskList,
}

impl Problem {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain's symbol table extended with problem-local symbols.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn init(&self) -> &[Predicate] {
        &self.init
    }

    pub fn goal(&self) -> &TaskList {
        &self.goal
    }

    /// Constants that appear in the problem but not in the domain.
    pub fn additional_constants(&self) -> Vec<&str> {
        self.symbols
            .problem_constants()
            .map(|(_, name)| name)
            .collect()
    }
}

/// Mutable problem under construction.
#[derive(Debug)]
pub struct ProblemBuilder {
    name: String,
    symbols: SymbolTable,
    init: Vec<Predicate>,
    goal: TaskList,
}

impl ProblemBuilder {
    /// Start a problem over `domain`. The domain itself is not modified.
    pub fn new(domain: &Domain, name: impl Into<String>) -> Self {
        let mut symbols = domain.symbols().clone();
        symbols.seal_constants();
        ProblemBuilder {
            name: name.into(),
            symbols,
            init: Vec::new(),
            goal: TaskList::Empty,
        }
    }

    pub fn intern(&mut self, category: Category, name: &str) -> usize {
        self.symbols.intern(category, name)
    }

    pub fn constant(&mut self, name: &str) -> usize {
        self.symbols.intern(Category::Constant, name)
    }

    pub fn add_fact(&mut self, fact: Predicate) {
        self.init.push(fact);
    }

    pub fn set_goal(&mut self, goal: TaskList) {
        self.goal = goal;
    }

    pub fn finish(self) -> Problem {
        tracing::debug!(
            problem = %self.name,
            facts = self.init.len(),
            additional_constants = self.symbols.problem_constants().count(),
            "problem built"
        );
        Problem {
            name: self.name,
            symbols: self.symbols,
            init: self.init,
            goal: self.goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(label: &str) -> MethodBranch {
        MethodBranch {
            label: label.to_owned(),
            precondition: None,
            tasks: TaskList::Empty,
        }
    }

    #[test]
    fn creation_ids_follow_declaration_order() {
        let mut b = DomainBuilder::new("d");
        let t = b.primitive_task("!noop");
        assert_eq!(b.add_operator(Predicate::new(t, vec![]), None, EffectLists::default(), None), 0);
        assert_eq!(b.add_operator(Predicate::new(t, vec![]), None, EffectLists::default(), None), 1);
        let domain = b.finish();
        let ids: Vec<_> = domain.operators().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn method_without_branches_is_rejected() {
        let mut b = DomainBuilder::new("d");
        let t = b.compound_task("deliver");
        let err = b.add_method(Predicate::new(t, vec![]), vec![]).unwrap_err();
        assert_eq!(
            err,
            BuildError::EmptyMethod {
                task: "deliver".to_owned()
            }
        );
    }

    #[test]
    fn duplicate_branch_labels_are_rejected() {
        let mut b = DomainBuilder::new("d");
        let t = b.compound_task("deliver");
        let err = b
            .add_method(Predicate::new(t, vec![]), vec![branch("b0"), branch("b0")])
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateBranchLabel { ref label, .. } if label == "b0"));
    }

    #[test]
    fn axiom_without_branches_is_rejected() {
        let mut b = DomainBuilder::new("d");
        let p = b.constant("clear");
        assert!(b.add_axiom(Predicate::new(p, vec![]), vec![]).is_err());
    }

    #[test]
    fn procedures_are_deduplicated() {
        let mut b = DomainBuilder::new("d");
        b.add_procedure("Distance");
        b.add_procedure("Cost");
        b.add_procedure("Distance");
        assert_eq!(b.finish().procedures(), &["Distance", "Cost"]);
    }

    #[test]
    fn problem_extends_constants_without_touching_domain() {
        let mut b = DomainBuilder::new("blocks");
        b.constant("on");
        b.constant("a");
        let domain = b.finish();

        let mut pb = ProblemBuilder::new(&domain, "p1");
        let a = pb.constant("a");
        let c = pb.constant("c");
        let problem = pb.finish();

        assert_eq!(a, 1);
        assert_eq!(c, 2);
        assert_eq!(problem.additional_constants(), vec!["c"]);
        assert_eq!(domain.symbols().len(Category::Constant), 2);
        assert_eq!(problem.symbols().constants_size(), 2);
    }
}
