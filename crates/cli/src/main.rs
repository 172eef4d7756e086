mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::attach::cmd_attach;
use commands::summary::cmd_summary;
use commands::validate::cmd_validate;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// HTN planning IR toolchain.
#[derive(Parser)]
#[command(name = "htn", version, about = "HTN planning IR toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an IR document against the formal JSON Schema
    Validate {
        /// Path to the IR JSON document
        file: PathBuf,
    },

    /// Print requirements and construct counts of an IR document
    Summary {
        /// Path to the IR JSON document
        file: PathBuf,
    },

    /// Attach a problem-only document to a domain document
    Attach {
        /// Path to the domain IR document
        domain: PathBuf,
        /// Path to the problem-only IR document
        problem: PathBuf,
        /// Write the merged document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Replace an existing problem section
        #[arg(long)]
        replace: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { file } => {
            cmd_validate(&file, &config, cli.output, cli.quiet);
        }
        Commands::Summary { file } => {
            cmd_summary(&file, &config, cli.output, cli.quiet);
        }
        Commands::Attach {
            domain,
            problem,
            out,
            replace,
        } => {
            cmd_attach(
                &domain,
                &problem,
                out.as_deref(),
                replace,
                &config,
                cli.output,
                cli.quiet,
            );
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
