//! htn-interchange: typed reading and structural merging of HTN IR JSON.
//!
//! [`from_ir()`] turns a `serde_json::Value` document into an [`IrBundle`]
//! of summaries (names, arities, branch labels, task references) without
//! modelling every expression node. [`attach_problem()`] merges a
//! problem-only document into a domain document as structured JSON.

pub mod deserialize;
pub mod merge;
pub mod types;

pub use deserialize::{count_error_nodes, from_ir, InterchangeError};
pub use merge::attach_problem;
pub use types::*;
