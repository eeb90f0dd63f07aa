//! Permission matrix CLI
//!
//! Prints the permissions a role is granted by the catalog, grouped by
//! category, as a table or as JSON.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use merchant_rbac::auth::rbac::{
    CurrentUserIdentity, Permission, Role, UiVisibility, permissions_for_role,
};
use merchant_rbac::utils::init_logging;
use serde_json::json;
use std::process::ExitCode;
use tracing::{Level, debug};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "rbac-matrix", version, about = "Show the permission matrix of a role")]
struct Cli {
    /// Role to inspect (owner, admin, manager, staff)
    #[arg(long, env = "RBAC_MATRIX_ROLE")]
    role: Role,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Only list financial, destructive and security-relevant permissions
    #[arg(long)]
    sensitive_only: bool,

    /// Include the derived UI visibility flags
    #[arg(long)]
    visibility: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    if let Err(e) = init_logging(level, false) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let granted = permissions_for_role(cli.role);
    debug!("{} grants {} permissions", cli.role, granted.len());

    let mut categories = granted.by_category();
    if cli.sensitive_only {
        for permissions in categories.values_mut() {
            permissions.retain(Permission::is_sensitive);
        }
        categories.retain(|_, permissions| !permissions.is_empty());
    }

    let visibility = cli
        .visibility
        .then(|| UiVisibility::compute(&CurrentUserIdentity::resolved(cli.role, granted.clone())));

    match cli.format {
        OutputFormat::Json => {
            let permissions: serde_json::Map<String, serde_json::Value> = categories
                .iter()
                .map(|(resource, permissions)| {
                    let tokens: Vec<String> = permissions.iter().map(Permission::token).collect();
                    (resource.as_str().to_string(), json!(tokens))
                })
                .collect();
            let mut output = json!({
                "role": cli.role,
                "level": cli.role.hierarchy_level(),
                "permissions": permissions,
            });
            if let Some(flags) = &visibility {
                output["visibility"] = json!(flags.to_map());
            }
            let rendered =
                serde_json::to_string_pretty(&output).context("failed to render matrix")?;
            println!("{}", rendered);
        }
        OutputFormat::Table => {
            println!(
                "{} (level {})",
                cli.role.display_name(),
                cli.role.hierarchy_level()
            );
            for (resource, permissions) in &categories {
                println!();
                println!("{}", resource.label());
                for permission in permissions {
                    let marker = if permission.is_sensitive() { " [sensitive]" } else { "" };
                    println!("  {:<28} {}{}", permission.token(), permission.describe(), marker);
                }
            }
            if let Some(flags) = &visibility {
                println!();
                println!("UI visibility ({} enabled)", flags.count_enabled());
                for (flag, enabled) in flags.to_map() {
                    println!("  {:<28} {}", flag, enabled);
                }
            }
        }
    }

    if categories.is_empty() {
        debug!("No permissions matched the filter for {}", cli.role);
    }
    Ok(())
}

