//! Deserialization of IR JSON into the typed summaries in [`crate::types`].

use crate::types::*;
use serde_json::Value;
use std::fmt;

/// Error type for IR deserialization and merging.
#[derive(Debug, Clone, PartialEq)]
pub enum InterchangeError {
    /// A required field is absent or has the wrong JSON type.
    MissingField { field: String },
    /// The document's overall shape is wrong.
    InvalidDocument(String),
    /// Two documents both carry a section that may only appear once.
    ConflictingSection { section: String },
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::MissingField { field } => {
                write!(f, "document missing required field: '{}'", field)
            }
            InterchangeError::InvalidDocument(msg) => {
                write!(f, "invalid document: {}", msg)
            }
            InterchangeError::ConflictingSection { section } => {
                write!(f, "document already has a '{}' section", section)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

/// Deserialize an IR document into typed summaries.
///
/// A document carrying a `domain` must also carry `requirements`; a
/// problem-only document may omit both.
pub fn from_ir(doc: &Value) -> Result<IrBundle, InterchangeError> {
    let obj = doc
        .as_object()
        .ok_or_else(|| InterchangeError::InvalidDocument("top level is not an object".to_string()))?;

    let domain = obj.get("domain").map(parse_domain).transpose()?;
    let problem = obj.get("problem").map(parse_problem).transpose()?;
    if domain.is_none() && problem.is_none() {
        return Err(InterchangeError::InvalidDocument(
            "neither 'domain' nor 'problem' is present".to_string(),
        ));
    }

    let requirements = match obj.get("requirements") {
        Some(v) => string_array(v, "requirements")?,
        None if domain.is_some() => {
            return Err(InterchangeError::MissingField {
                field: "requirements".to_string(),
            })
        }
        None => Vec::new(),
    };

    tracing::debug!(
        domain = domain.as_ref().map(|d| d.name.as_str()),
        problem = problem.as_ref().map(|p| p.name.as_str()),
        "IR document read"
    );

    Ok(IrBundle {
        requirements,
        domain,
        problem,
    })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn required<'a>(obj: &'a Value, field: &str) -> Result<&'a Value, InterchangeError> {
    obj.get(field).ok_or_else(|| InterchangeError::MissingField {
        field: field.to_string(),
    })
}

fn required_str(obj: &Value, field: &str) -> Result<String, InterchangeError> {
    required(obj, field)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| InterchangeError::InvalidDocument(format!("'{}' is not a string", field)))
}

fn required_array<'a>(obj: &'a Value, field: &str) -> Result<&'a Vec<Value>, InterchangeError> {
    required(obj, field)?
        .as_array()
        .ok_or_else(|| InterchangeError::InvalidDocument(format!("'{}' is not an array", field)))
}

fn string_array(value: &Value, field: &str) -> Result<Vec<String>, InterchangeError> {
    let arr = value
        .as_array()
        .ok_or_else(|| InterchangeError::InvalidDocument(format!("'{}' is not an array", field)))?;
    arr.iter()
        .map(|v| {
            v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                InterchangeError::InvalidDocument(format!("'{}' holds a non-string entry", field))
            })
        })
        .collect()
}

fn arity(obj: &Value) -> Result<usize, InterchangeError> {
    Ok(required_array(obj, "parameters")?.len())
}

fn is_error_node(value: &Value) -> bool {
    value.get("type").and_then(|t| t.as_str()) == Some("error")
}

/// Count `{"type": "error"}` nodes anywhere under `value`.
pub fn count_error_nodes(value: &Value) -> usize {
    match value {
        Value::Object(map) => {
            let own = usize::from(is_error_node(value));
            own + map.values().map(count_error_nodes).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(count_error_nodes).sum(),
        _ => 0,
    }
}

fn parse_domain(obj: &Value) -> Result<DomainSummary, InterchangeError> {
    let name = required_str(obj, "name")?;
    let operators = required_array(obj, "primitive_tasks")?
        .iter()
        .map(parse_operator)
        .collect::<Result<Vec<_>, _>>()?;
    let methods = required_array(obj, "compound_tasks")?
        .iter()
        .map(parse_method)
        .collect::<Result<Vec<_>, _>>()?;
    let axioms = required_array(obj, "axioms")?
        .iter()
        .map(parse_axiom)
        .collect::<Result<Vec<_>, _>>()?;
    let procedures = string_array(required(obj, "procedures")?, "procedures")?;

    Ok(DomainSummary {
        name,
        operators,
        methods,
        axioms,
        procedures,
    })
}

fn parse_operator(obj: &Value) -> Result<OperatorSummary, InterchangeError> {
    Ok(OperatorSummary {
        name: required_str(obj, "name")?,
        arity: arity(obj)?,
        preconditions: required(obj, "preconditions")?.clone(),
        effects: required_array(obj, "effect")?.len(),
        cost: obj.get("cost").cloned(),
        error_nodes: count_error_nodes(obj),
    })
}

fn parse_method(obj: &Value) -> Result<MethodSummary, InterchangeError> {
    let branches = required_array(obj, "methods")?
        .iter()
        .map(|b| {
            Ok(BranchSummary {
                name: required_str(b, "name")?,
                preconditions: required(b, "preconditions")?.clone(),
                tasks: parse_tasks(required(b, "tasks")?)?,
            })
        })
        .collect::<Result<Vec<_>, InterchangeError>>()?;

    Ok(MethodSummary {
        name: required_str(obj, "name")?,
        arity: arity(obj)?,
        branches,
        error_nodes: count_error_nodes(obj),
    })
}

fn parse_axiom(obj: &Value) -> Result<AxiomSummary, InterchangeError> {
    let branches = required_array(obj, "branches")?
        .iter()
        .map(|b| required_str(b, "name"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AxiomSummary {
        name: required_str(obj, "name")?,
        arity: arity(obj)?,
        branches,
        error_nodes: count_error_nodes(obj),
    })
}

/// Task references in order. Error nodes left by the serializer are
/// skipped; they are still counted by [`count_error_nodes`].
fn parse_tasks(value: &Value) -> Result<Vec<TaskRef>, InterchangeError> {
    let arr = value
        .as_array()
        .ok_or_else(|| InterchangeError::InvalidDocument("'tasks' is not an array".to_string()))?;
    let mut tasks = Vec::with_capacity(arr.len());
    for task in arr.iter().filter(|t| !is_error_node(t)) {
        let tag = required_str(task, "type")?;
        let kind = TaskKind::from_wire(&tag).ok_or_else(|| {
            InterchangeError::InvalidDocument(format!("unknown task type '{}'", tag))
        })?;
        tasks.push(TaskRef {
            name: required_str(task, "name")?,
            kind,
            parameters: required(task, "parameters")?.clone(),
        });
    }
    Ok(tasks)
}

pub(crate) fn parse_problem(obj: &Value) -> Result<ProblemSummary, InterchangeError> {
    let name = required_str(obj, "name")?;
    let goal = parse_tasks(required(required(obj, "goal")?, "tasks")?)?;
    let init = required_array(obj, "init")?
        .iter()
        .map(|f| {
            Ok(Fact {
                predicate: required_str(f, "predicate")?,
                parameters: string_array(required(f, "parameters")?, "parameters")?,
            })
        })
        .collect::<Result<Vec<_>, InterchangeError>>()?;
    let additional_constants = string_array(
        required(obj, "additional_constants")?,
        "additional_constants",
    )?;

    Ok(ProblemSummary {
        name,
        goal,
        init,
        additional_constants,
    })
}
