//! The top-level IR document: `requirements`, `domain` and an optional
//! `problem`.
//!
//! Sections are held as structured values and rendered exactly once, so a
//! problem can be attached after the fact without touching serialized text.

use crate::domain::{Domain, Problem};
use crate::options::IrOptions;
use crate::requirements::{analyze_requirements, RequirementSet};
use crate::serialize::{serialize_domain, serialize_problem};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrDocument {
    requirements: Option<RequirementSet>,
    domain: Option<Value>,
    problem: Option<Value>,
}

impl IrDocument {
    /// Serialize `domain` (and `problem`, if given). Requirements are
    /// always recomputed from the domain model.
    pub fn build(domain: &Domain, problem: Option<&Problem>, options: &IrOptions) -> Self {
        let requirements = analyze_requirements(domain);
        Self::with_requirements(domain, requirements, problem, options)
    }

    /// Like [`IrDocument::build`] with a requirement set computed elsewhere.
    pub fn with_requirements(
        domain: &Domain,
        requirements: RequirementSet,
        problem: Option<&Problem>,
        options: &IrOptions,
    ) -> Self {
        IrDocument {
            requirements: Some(requirements),
            domain: Some(serialize_domain(domain, options)),
            problem: problem.map(|p| serialize_problem(p, options)),
        }
    }

    /// A document holding only a `problem` section.
    pub fn problem_only(problem: &Problem, options: &IrOptions) -> Self {
        IrDocument {
            requirements: None,
            domain: None,
            problem: Some(serialize_problem(problem, options)),
        }
    }

    /// Add (or replace) the problem section. Returns the section it
    /// replaced, if any.
    pub fn attach_problem(&mut self, problem: &Problem, options: &IrOptions) -> Option<Value> {
        tracing::debug!(problem = problem.name(), "attaching problem section");
        self.problem.replace(serialize_problem(problem, options))
    }

    pub fn requirements(&self) -> Option<&RequirementSet> {
        self.requirements.as_ref()
    }

    pub fn domain(&self) -> Option<&Value> {
        self.domain.as_ref()
    }

    pub fn problem(&self) -> Option<&Value> {
        self.problem.as_ref()
    }

    /// The document as one JSON object with sorted keys.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(domain) = &self.domain {
            obj.insert("domain".to_owned(), domain.clone());
        }
        if let Some(problem) = &self.problem {
            obj.insert("problem".to_owned(), problem.clone());
        }
        if let Some(requirements) = &self.requirements {
            obj.insert("requirements".to_owned(), requirements.to_json());
        }
        Value::Object(obj)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, serde_json::Error> {
        let value = self.to_value();
        if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    }
}
