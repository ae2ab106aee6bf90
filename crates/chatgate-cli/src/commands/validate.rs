//! CLI command: chatgate validate
//!
//! Usage:
//!   chatgate validate --policy policy.yaml [--format text|json|yaml]

use super::report_catalog_error;
use crate::args::{OutputFormat, ValidateArgs};
use crate::exit_codes;
use chatgate_core::{CatalogError, PolicyCatalog, PolicyConfig};
use serde_json::json;

pub fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    let config = match PolicyConfig::from_file(&args.policy) {
        Ok(config) => config,
        Err(e) => return report(&args, Err(&e)),
    };
    let overridden = overridden_sections(&config);
    match PolicyCatalog::from_config(config) {
        Ok(_) => report(&args, Ok(overridden.as_slice())),
        Err(e) => report(&args, Err(&e)),
    }
}

fn overridden_sections(config: &PolicyConfig) -> Vec<&'static str> {
    [
        ("message_edit_window_ms", config.message_edit_window_ms.is_some()),
        ("clock_skew_ms", config.clock_skew_ms.is_some()),
        ("roles", config.roles.is_some()),
        ("chat_matrix", config.chat_matrix.is_some()),
        ("upload_limits_bytes", config.upload_limits_bytes.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect()
}

fn report(
    args: &ValidateArgs,
    outcome: Result<&[&'static str], &CatalogError>,
) -> anyhow::Result<i32> {
    let code = match outcome {
        Ok(_) => exit_codes::SUCCESS,
        Err(_) => exit_codes::CONFIG_ERROR,
    };
    match args.format {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => {
            let doc = match outcome {
                Ok(sections) => json!({
                    "policy": args.policy,
                    "valid": true,
                    "overridden": sections,
                    "exit_code": code,
                }),
                Err(e) => json!({
                    "policy": args.policy,
                    "valid": false,
                    "error_kind": e.kind(),
                    "error": e.to_string(),
                    "exit_code": code,
                }),
            };
            if format == OutputFormat::Yaml {
                print!("{}", serde_yaml::to_string(&doc)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
        }
        OutputFormat::Text => match outcome {
            Ok(sections) if sections.is_empty() => {
                eprintln!("✔ Policy OK (built-in tables, nothing overridden)");
            }
            Ok(sections) => {
                eprintln!("✔ Policy OK (overrides: {})", sections.join(", "));
            }
            Err(e) => {
                report_catalog_error(Some(args.policy.as_path()), e);
            }
        },
    }
    Ok(code)
}
