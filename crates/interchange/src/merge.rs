//! Structural merging of a problem-only document into a domain document.
//!
//! The domain document's `requirements` are kept as they are: they were
//! inferred from the domain model, and a problem never changes the
//! features a domain uses.

use crate::deserialize::{parse_problem, InterchangeError};
use serde_json::Value;

/// Return `domain_doc` with the `problem` section of `problem_doc` added.
///
/// Fails if `domain_doc` is not a domain document, if `problem_doc` does
/// not hold a well-formed problem (or also holds a domain), or if
/// `domain_doc` already has a problem and `replace` is false.
pub fn attach_problem(
    domain_doc: &Value,
    problem_doc: &Value,
    replace: bool,
) -> Result<Value, InterchangeError> {
    let mut merged = domain_doc
        .as_object()
        .cloned()
        .ok_or_else(|| InterchangeError::InvalidDocument("domain document is not an object".to_string()))?;
    for field in ["domain", "requirements"] {
        if !merged.contains_key(field) {
            return Err(InterchangeError::MissingField {
                field: field.to_string(),
            });
        }
    }

    if problem_doc.get("domain").is_some() {
        return Err(InterchangeError::InvalidDocument(
            "problem document also carries a domain section".to_string(),
        ));
    }
    let problem = problem_doc
        .get("problem")
        .ok_or_else(|| InterchangeError::MissingField {
            field: "problem".to_string(),
        })?;
    let summary = parse_problem(problem)?;

    if merged.contains_key("problem") && !replace {
        return Err(InterchangeError::ConflictingSection {
            section: "problem".to_string(),
        });
    }

    tracing::debug!(problem = %summary.name, replace, "problem section attached");
    merged.insert("problem".to_string(), problem.clone());
    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn domain_doc() -> Value {
        json!({
            "requirements": [":S"],
            "domain": {
                "name": "d",
                "primitive_tasks": [],
                "compound_tasks": [],
                "axioms": [],
                "procedures": []
            }
        })
    }

    fn problem_doc(name: &str) -> Value {
        json!({"problem": {
            "name": name,
            "goal": {"tasks": []},
            "init": [],
            "additional_constants": []
        }})
    }

    #[test]
    fn test_attach_keeps_domain_and_requirements() {
        let merged = attach_problem(&domain_doc(), &problem_doc("p1"), false).unwrap();
        assert_eq!(merged["requirements"], json!([":S"]));
        assert_eq!(merged["domain"], domain_doc()["domain"]);
        assert_eq!(merged["problem"]["name"], "p1");
    }

    #[test]
    fn test_attach_twice_conflicts_unless_replacing() {
        let merged = attach_problem(&domain_doc(), &problem_doc("p1"), false).unwrap();
        let err = attach_problem(&merged, &problem_doc("p2"), false).unwrap_err();
        assert_eq!(
            err,
            InterchangeError::ConflictingSection {
                section: "problem".to_string()
            }
        );
        let replaced = attach_problem(&merged, &problem_doc("p2"), true).unwrap();
        assert_eq!(replaced["problem"]["name"], "p2");
    }

    #[test]
    fn test_attach_requires_domain_document() {
        let err = attach_problem(&problem_doc("p"), &problem_doc("p"), false).unwrap_err();
        assert!(matches!(err, InterchangeError::MissingField { ref field } if field == "domain"));
    }

    #[test]
    fn test_attach_rejects_malformed_problem() {
        let bad = json!({"problem": {"name": "p", "init": [], "additional_constants": []}});
        let err = attach_problem(&domain_doc(), &bad, false).unwrap_err();
        assert!(matches!(err, InterchangeError::MissingField { ref field } if field == "goal"));

        let err = attach_problem(&domain_doc(), &domain_doc(), false).unwrap_err();
        assert!(matches!(err, InterchangeError::InvalidDocument(_)));
    }
}
