//! CLI command: chatgate matrix
//!
//! Usage:
//!   chatgate matrix [--policy policy.yaml] [--format text|json|yaml]

use super::{load_engine, report_catalog_error};
use crate::args::{MatrixArgs, OutputFormat};
use crate::exit_codes;
use chatgate_core::{PolicyCatalog, Role};
use std::fmt::Write as _;

pub fn run(args: MatrixArgs) -> anyhow::Result<i32> {
    let engine = match load_engine(args.policy.as_deref()) {
        Ok(engine) => engine,
        Err(e) => return Ok(report_catalog_error(args.policy.as_deref(), &e)),
    };
    let catalog = engine.catalog();

    let output = match args.format {
        OutputFormat::Text => render_text(catalog),
        OutputFormat::Json => serde_json::to_string_pretty(catalog)?,
        OutputFormat::Yaml => serde_yaml::to_string(&catalog.to_config())?,
    };
    println!("{}", output.trim_end());
    Ok(exit_codes::SUCCESS)
}

fn render_text(catalog: &PolicyCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>4} {:>12}  chats with",
        "role", "rank", "upload max"
    );
    for role in Role::ALL {
        let targets = if role.is_top() {
            "* (any role)".to_string()
        } else {
            join(catalog.chat_targets(role).iter().map(|r| r.as_str()))
        };
        let _ = writeln!(
            out,
            "{:<14} {:>4} {:>12}  {}",
            role.as_str(),
            role.rank(),
            format_mib(catalog.upload_limit_bytes(role)),
            targets
        );
    }

    let _ = writeln!(out, "\npermissions:");
    for role in Role::ALL {
        let perms = catalog.permissions_for(role);
        let _ = writeln!(
            out,
            "  {} ({}): {}",
            role,
            perms.len(),
            join(perms.iter().map(|p| p.as_str()))
        );
    }

    let _ = writeln!(
        out,
        "\nmessage edit window: {}s, clock skew: {}s",
        catalog.message_edit_window().num_seconds(),
        catalog.clock_skew().num_seconds()
    );
    out
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn format_mib(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{bytes} B")
    }
}
