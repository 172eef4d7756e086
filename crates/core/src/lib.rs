//! htn-core: HTN planning domain model and JSON IR compiler.
//!
//! A parser populates a [`DomainBuilder`]; the sealed [`Domain`] is then
//! consumed read-only by three passes:
//!
//! - [`analyze_requirements()`] -- the planning-language features in use
//! - [`build_dispatch()`] -- operators, methods and axioms bucketed by head
//! - [`serialize_domain()`] / [`serialize_problem()`] -- canonical JSON IR
//!
//! [`compile()`] runs all three and assembles an [`IrDocument`].

pub mod ast;
pub mod compile;
pub mod dispatch;
pub mod document;
pub mod domain;
pub mod error;
pub mod options;
pub mod requirements;
pub mod serialize;
pub mod symbols;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    Axiom, AxiomBranch, CallTerm, Effect, EffectLists, LogicalExpr, Method, MethodBranch,
    Operator, Predicate, TaskAtom, TaskList, Term,
};
pub use dispatch::DispatchTable;
pub use document::IrDocument;
pub use domain::{Domain, DomainBuilder, Problem, ProblemBuilder};
pub use error::{BuildError, SerializeFault};
pub use options::IrOptions;
pub use requirements::{Requirement, RequirementSet};
pub use serialize::{EffectMode, IrSerializer};
pub use symbols::{Category, SymbolTable};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use compile::{compile, Compilation};
pub use dispatch::build_dispatch;
pub use requirements::analyze_requirements;
pub use serialize::{serialize_domain, serialize_problem};
