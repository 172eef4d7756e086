use std::borrow::Cow;
use std::path::Path;
use std::process;

use super::read_json;
use crate::config::HtnConfig;
use crate::{report_error, OutputFormat};

static IR_SCHEMA_STR: &str = include_str!("../../../../docs/htn-ir-schema.json");

/// Which sections a valid document carries, for the success message.
fn document_kind(doc: &serde_json::Value) -> &'static str {
    match (doc.get("domain").is_some(), doc.get("problem").is_some()) {
        (true, true) => "domain+problem",
        (true, false) => "domain",
        _ => "problem",
    }
}

pub(crate) fn cmd_validate(path: &Path, config: &HtnConfig, output: OutputFormat, quiet: bool) {
    let schema_src: Cow<'static, str> = match &config.schema {
        Some(schema_path) => match std::fs::read_to_string(schema_path) {
            Ok(s) => Cow::Owned(s),
            Err(e) => {
                let msg = format!("error reading schema '{}': {}", schema_path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        None => Cow::Borrowed(IR_SCHEMA_STR),
    };

    let schema: serde_json::Value = match serde_json::from_str(&schema_src) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("failed to parse IR schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("failed to compile IR schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc = read_json(path, output, quiet);
    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();
    tracing::debug!(file = %path.display(), errors = errors.len(), "schema validation finished");

    if errors.is_empty() {
        if !quiet {
            let kind = document_kind(&doc);
            match output {
                OutputFormat::Text => println!("valid {} document", kind),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({"valid": true, "type": kind}));
                }
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid document");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}
