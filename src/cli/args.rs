use crate::config::{DatabaseKind, DeploymentKind};
use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for scaffold.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project name; also the default output directory.
    #[arg(short, long)]
    pub name: String,

    /// Module path handed to `go mod init`, e.g. github.com/user/project.
    #[arg(short, long)]
    pub module: String,

    /// Comma-separated optional features: auth, metrics, tracing.
    #[arg(short, long, default_value = "")]
    pub features: String,

    /// Database the project connects to.
    #[arg(long, value_enum, default_value_t = DatabaseKind::Postgres)]
    pub db: DatabaseKind,

    /// Deployment target.
    #[arg(long, value_enum, default_value_t = DeploymentKind::Docker)]
    pub deployment: DeploymentKind,

    /// Destination directory [default: ./<name>].
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file (JSON or YAML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to read templates from instead of the built-in set.
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Do not run the module initialisation command.
    #[arg(long = "skip-mod-init")]
    pub skip_mod_init: bool,

    /// Render everything but do not touch the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Record written files and their digests in .scaffold.json.
    #[arg(long)]
    pub manifest: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
///
/// Help and version requests exit successfully; every other parse error
/// exits with [`exit_codes::FAILURE`].
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        ErrorKind::MissingRequiredArgument => {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            eprintln!("{e}");
            std::process::exit(exit_codes::FAILURE);
        }
        _ => {
            if let Err(print_err) = e.print() {
                eprintln!("Failed to display error: {print_err}");
            }
            std::process::exit(exit_codes::FAILURE);
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
