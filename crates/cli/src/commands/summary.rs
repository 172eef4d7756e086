use std::path::Path;
use std::process;

use htn_interchange::{from_ir, IrBundle};

use super::{read_json, render};
use crate::config::HtnConfig;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_summary(path: &Path, config: &HtnConfig, output: OutputFormat, quiet: bool) {
    let doc = read_json(path, output, quiet);
    let bundle = match from_ir(&doc) {
        Ok(b) => b,
        Err(e) => {
            let msg = format!("error reading IR in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => print!("{}", summary_text(&bundle)),
        OutputFormat::Json => {
            let value = serde_json::to_value(&bundle).unwrap_or_default();
            println!("{}", render(&value, config.output.pretty));
        }
    }
}

fn summary_text(bundle: &IrBundle) -> String {
    let mut out = String::new();
    if let Some(domain) = &bundle.domain {
        out.push_str(&format!("domain: {}\n", domain.name));
        out.push_str(&format!("  requirements: {}\n", bundle.requirements.join(" ")));
        out.push_str(&format!("  operators: {}\n", domain.operators.len()));
        out.push_str(&format!("  methods: {}\n", domain.methods.len()));
        out.push_str(&format!("  axioms: {}\n", domain.axioms.len()));
        out.push_str(&format!("  procedures: {}\n", domain.procedures.len()));
        let errors = domain.error_nodes();
        if errors > 0 {
            out.push_str(&format!("  error nodes: {}\n", errors));
        }
    }
    if let Some(problem) = &bundle.problem {
        out.push_str(&format!("problem: {}\n", problem.name));
        out.push_str(&format!("  facts: {}\n", problem.init.len()));
        out.push_str(&format!("  goal tasks: {}\n", problem.goal.len()));
        out.push_str(&format!(
            "  additional constants: {}\n",
            problem.additional_constants.len()
        ));
    }
    out
}
