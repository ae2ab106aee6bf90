use crate::args::{Cli, Command};
use crate::exit_codes;
use chatgate_core::{CatalogError, PolicyEngine};
use std::path::Path;

pub mod explain;
pub mod matrix;
pub mod validate;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Validate(args) => validate::run(args),
        Command::Matrix(args) => matrix::run(args),
        Command::Explain(args) => explain::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Engine for an optional policy path; built-in tables when `None`.
pub(crate) fn load_engine(policy: Option<&Path>) -> Result<PolicyEngine, CatalogError> {
    match policy {
        Some(path) => PolicyEngine::from_file(path),
        None => Ok(PolicyEngine::builtin()),
    }
}

/// Prints a catalog error the same way for every command.
pub(crate) fn report_catalog_error(path: Option<&Path>, err: &CatalogError) -> i32 {
    let source = path.map_or_else(|| "<builtin>".to_string(), |p| p.display().to_string());
    eprintln!("✖ policy {source} rejected [{}]: {err}", err.kind());
    exit_codes::CONFIG_ERROR
}
