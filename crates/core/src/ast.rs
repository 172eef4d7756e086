//! Shared AST types for the HTN domain compiler.
//!
//! These types are produced by the (external) parser through
//! [`DomainBuilder`](crate::domain::DomainBuilder) and consumed read-only by
//! the requirements analyzer, the dispatch table builder and the serializer.
//! Symbols are referenced by index into the owning
//! [`SymbolTable`](crate::symbols::SymbolTable); no node is shared between
//! two owners.

// ──────────────────────────────────────────────
// Terms
// ──────────────────────────────────────────────

/// A term argument of a predicate, call or assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Variable by index into the variable category (display only).
    Variable(usize),
    /// Constant symbol by index into the constant category.
    Constant(usize),
    Number(f64),
    /// A cons cell. The tail is `Nil` for a proper list, another `List` to
    /// continue it, or any other term for an improper list.
    List { head: Box<Term>, tail: Box<Term> },
    /// External procedure call used as a value.
    Call(CallTerm),
    /// The empty list.
    Nil,
}

impl Term {
    /// Build a proper list from `items`; an empty vector yields `Nil`.
    pub fn list(items: Vec<Term>) -> Term {
        Term::improper_list(items, Term::Nil)
    }

    /// Build a list whose final tail is `tail`.
    pub fn improper_list(items: Vec<Term>, tail: Term) -> Term {
        items.into_iter().rev().fold(tail, |acc, item| Term::List {
            head: Box::new(item),
            tail: Box::new(acc),
        })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Nil)
    }

    /// Walk the list cells of this term.
    ///
    /// Returns the heads in order together with the trailing non-`Nil`
    /// tail, if any. A non-list, non-`Nil` term is reported as a bare tail
    /// so that callers can treat it as a single-element sequence.
    pub fn flatten(&self) -> (Vec<&Term>, Option<&Term>) {
        let mut items = Vec::new();
        let mut cursor = self;
        loop {
            match cursor {
                Term::List { head, tail } => {
                    items.push(head.as_ref());
                    cursor = tail.as_ref();
                }
                Term::Nil => return (items, None),
                other => return (items, Some(other)),
            }
        }
    }
}

// Deep cons chains would otherwise be freed by one nested call per cell.
impl Drop for Term {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_term_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach_term_children(&mut node, &mut stack);
        }
    }
}

fn detach_term_children(term: &mut Term, out: &mut Vec<Term>) {
    match term {
        Term::List { head, tail } => {
            out.push(std::mem::replace(head.as_mut(), Term::Nil));
            out.push(std::mem::replace(tail.as_mut(), Term::Nil));
        }
        Term::Call(call) => out.append(&mut call.args),
        Term::Variable(_) | Term::Constant(_) | Term::Number(_) | Term::Nil => {}
    }
}

/// A call to a user-supplied external procedure, e.g. `(call + ?x 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTerm {
    function: String,
    args: Vec<Term>,
}

impl CallTerm {
    pub fn new(function: impl Into<String>, args: Vec<Term>) -> Self {
        CallTerm {
            function: function.into(),
            args,
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }
}

// ──────────────────────────────────────────────
// Predicates
// ──────────────────────────────────────────────

/// A head symbol applied to a parameter term. Immutable once built.
///
/// What category `head` indexes depends on the position: constants for
/// logical atoms and axiom heads, primitive or compound tasks for task heads.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    head: usize,
    params: Term,
}

impl Predicate {
    /// Predicate whose parameters form a proper list of `args`.
    pub fn new(head: usize, args: Vec<Term>) -> Self {
        Predicate {
            head,
            params: Term::list(args),
        }
    }

    /// Predicate with an arbitrary parameter term (possibly improper).
    pub fn with_params(head: usize, params: Term) -> Self {
        Predicate { head, params }
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn params(&self) -> &Term {
        &self.params
    }
}

// ──────────────────────────────────────────────
// Logical expressions
// ──────────────────────────────────────────────

/// A precondition expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalExpr {
    Atomic(Predicate),
    /// At least two conjuncts, in order.
    And(Vec<LogicalExpr>),
    /// At least two disjuncts, in order.
    Or(Vec<LogicalExpr>),
    Not(Box<LogicalExpr>),
    ForAll {
        premise: Box<LogicalExpr>,
        consequence: Box<LogicalExpr>,
    },
    Call(CallTerm),
    /// Bind variable `var` to the value of `value`.
    Assign { var: usize, value: Term },
    /// Trivially true.
    Nil,
    /// A node kind this compiler does not model. Serialized as an
    /// `"unknown"` marker and ignored by the analyzer.
    Unknown { kind: String },
}

impl LogicalExpr {
    /// Conjunction with the usual collapsing: no operands is `Nil`, a single
    /// operand is returned as is.
    pub fn and(mut operands: Vec<LogicalExpr>) -> LogicalExpr {
        match operands.len() {
            0 => LogicalExpr::Nil,
            1 => operands.remove(0),
            _ => LogicalExpr::And(operands),
        }
    }

    /// Disjunction; a single operand is returned as is.
    pub fn or(mut operands: Vec<LogicalExpr>) -> LogicalExpr {
        match operands.len() {
            0 => LogicalExpr::Nil,
            1 => operands.remove(0),
            _ => LogicalExpr::Or(operands),
        }
    }

    pub fn not(expr: LogicalExpr) -> LogicalExpr {
        LogicalExpr::Not(Box::new(expr))
    }

    pub fn forall(premise: LogicalExpr, consequence: LogicalExpr) -> LogicalExpr {
        LogicalExpr::ForAll {
            premise: Box::new(premise),
            consequence: Box::new(consequence),
        }
    }

    pub fn atom(head: usize, args: Vec<Term>) -> LogicalExpr {
        LogicalExpr::Atomic(Predicate::new(head, args))
    }
}

impl Drop for LogicalExpr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_expr_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach_expr_children(&mut node, &mut stack);
        }
    }
}

fn detach_expr_children(expr: &mut LogicalExpr, out: &mut Vec<LogicalExpr>) {
    match expr {
        LogicalExpr::And(children) | LogicalExpr::Or(children) => out.append(children),
        LogicalExpr::Not(inner) => out.push(std::mem::replace(inner.as_mut(), LogicalExpr::Nil)),
        LogicalExpr::ForAll {
            premise,
            consequence,
        } => {
            out.push(std::mem::replace(premise.as_mut(), LogicalExpr::Nil));
            out.push(std::mem::replace(consequence.as_mut(), LogicalExpr::Nil));
        }
        LogicalExpr::Atomic(_)
        | LogicalExpr::Call(_)
        | LogicalExpr::Assign { .. }
        | LogicalExpr::Nil
        | LogicalExpr::Unknown { .. } => {}
    }
}

// ──────────────────────────────────────────────
// Effects
// ──────────────────────────────────────────────

/// One entry of an operator's add or delete list.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Atomic(Predicate),
    /// For every binding satisfying `premise`, apply each template.
    ForAll {
        premise: LogicalExpr,
        templates: Vec<Predicate>,
    },
    /// Protect `target` from deletion by later operators.
    Protection(Predicate),
    Unknown { kind: String },
}

/// An operator's delete and add lists. Deletes apply before adds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectLists {
    pub delete: Vec<Effect>,
    pub add: Vec<Effect>,
}

impl EffectLists {
    pub fn new(delete: Vec<Effect>, add: Vec<Effect>) -> Self {
        EffectLists { delete, add }
    }

    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.add.is_empty()
    }
}

// ──────────────────────────────────────────────
// Task lists
// ──────────────────────────────────────────────

/// A task occurrence inside a task list. `primitive` selects the category
/// the head indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAtom {
    pub head: Predicate,
    pub primitive: bool,
}

impl TaskAtom {
    pub fn primitive(head: usize, args: Vec<Term>) -> Self {
        TaskAtom {
            head: Predicate::new(head, args),
            primitive: true,
        }
    }

    pub fn compound(head: usize, args: Vec<Term>) -> Self {
        TaskAtom {
            head: Predicate::new(head, args),
            primitive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TaskList {
    #[default]
    Empty,
    Atom(TaskAtom),
    Sequence(Vec<TaskList>),
}

impl TaskList {
    /// Sequence of atoms, the common shape produced by the parser.
    pub fn of(atoms: Vec<TaskAtom>) -> TaskList {
        if atoms.is_empty() {
            return TaskList::Empty;
        }
        TaskList::Sequence(atoms.into_iter().map(TaskList::Atom).collect())
    }

    /// Atoms in left-to-right order.
    pub fn atoms(&self) -> Vec<&TaskAtom> {
        let mut out = Vec::new();
        collect_atoms(self, &mut out);
        out
    }
}

fn collect_atoms<'a>(list: &'a TaskList, out: &mut Vec<&'a TaskAtom>) {
    match list {
        TaskList::Empty => {}
        TaskList::Atom(atom) => out.push(atom),
        TaskList::Sequence(children) => {
            for child in children {
                collect_atoms(child, out);
            }
        }
    }
}

// ──────────────────────────────────────────────
// Domain constructs
// ──────────────────────────────────────────────

/// Implementation of a primitive task.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Creation-order id, unique among operators of a domain.
    pub id: usize,
    /// Head indexes the primitive-task category.
    pub head: Predicate,
    /// `None` means the operator is always applicable.
    pub precondition: Option<LogicalExpr>,
    pub effects: EffectLists,
    pub cost: Option<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodBranch {
    pub label: String,
    pub precondition: Option<LogicalExpr>,
    pub tasks: TaskList,
}

/// Decomposition rule for a compound task.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub id: usize,
    /// Head indexes the compound-task category.
    pub head: Predicate,
    pub branches: Vec<MethodBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxiomBranch {
    pub label: String,
    pub precondition: Option<LogicalExpr>,
}

/// Derivation rule for a predicate; the first branch that holds wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Axiom {
    pub id: usize,
    /// Head indexes the constant category.
    pub head: Predicate,
    pub branches: Vec<AxiomBranch>,
}
