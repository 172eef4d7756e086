//! Error types for domain construction and serialization.
//!
//! Neither error escapes a domain-level serialize call: [`SerializeFault`]
//! is contained at the smallest JSON-producing node and rendered as an
//! `{"type": "error", "message": ...}` object. [`BuildError`] is returned
//! to the parser driving [`DomainBuilder`](crate::domain::DomainBuilder).

/// A construction defect reported while the parser populates a domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A method must offer at least one decomposition branch.
    #[error("method for compound task '{task}' has no branches")]
    EmptyMethod { task: String },

    /// An axiom must offer at least one derivation.
    #[error("axiom for '{predicate}' has no branches")]
    EmptyAxiom { predicate: String },

    /// Branch labels identify branches in the IR and must be unique per construct.
    #[error("duplicate branch label '{label}' in {construct} '{name}'")]
    DuplicateBranchLabel {
        construct: &'static str,
        name: String,
        label: String,
    },
}

/// A fault raised while serializing one subtree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializeFault {
    /// `And`/`Or` nodes built by hand with fewer than two operands.
    #[error("{kind} requires at least two operands, found {found}")]
    TooFewOperands { kind: &'static str, found: usize },

    #[error("number {0} has no JSON representation")]
    NonFiniteNumber(f64),

    #[error("nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },
}
