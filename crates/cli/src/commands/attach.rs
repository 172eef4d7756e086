use std::path::Path;
use std::process;

use htn_interchange::attach_problem;

use super::{read_json, render};
use crate::config::HtnConfig;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_attach(
    domain_path: &Path,
    problem_path: &Path,
    out: Option<&Path>,
    replace: bool,
    config: &HtnConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let domain_doc = read_json(domain_path, output, quiet);
    let problem_doc = read_json(problem_path, output, quiet);

    let merged = match attach_problem(&domain_doc, &problem_doc, replace) {
        Ok(m) => m,
        Err(e) => {
            let msg = format!(
                "cannot attach '{}' to '{}': {}",
                problem_path.display(),
                domain_path.display(),
                e
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let text = render(&merged, config.output.pretty);

    let Some(out_path) = out else {
        println!("{}", text);
        return;
    };
    if let Err(e) = std::fs::write(out_path, format!("{}\n", text)) {
        let msg = format!("error writing '{}': {}", out_path.display(), e);
        report_error(&msg, output, quiet);
        process::exit(1);
    }
    tracing::info!(out = %out_path.display(), "merged document written");
    if !quiet {
        match output {
            OutputFormat::Text => println!("wrote {}", out_path.display()),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"written": out_path.display().to_string()})
                );
            }
        }
    }
}
