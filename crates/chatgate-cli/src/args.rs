use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chatgate",
    version,
    about = "Role, office and time-window authorization for multi-tenant messaging"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that a policy file loads into a complete catalog
    Validate(ValidateArgs),
    /// Print the role tables in effect
    Matrix(MatrixArgs),
    /// Evaluate one decision request and show why
    Explain(ExplainArgs),
    Version,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, short)]
    pub policy: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Policy file; built-in tables when omitted
    #[arg(long, short, env = "CHATGATE_POLICY")]
    pub policy: Option<PathBuf>,

    /// `yaml` prints a complete policy file that reproduces the tables
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExplainArgs {
    /// JSON request: an `actor` plus exactly one question field
    #[arg(long, short)]
    pub request: PathBuf,

    #[arg(long, short, env = "CHATGATE_POLICY")]
    pub policy: Option<PathBuf>,

    /// Evaluation time (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
