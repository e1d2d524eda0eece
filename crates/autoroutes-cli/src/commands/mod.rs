pub mod generate;
pub mod routes;
pub mod watch;

use crate::ProjectArgs;
use anyhow::{Context, Result};
use autoroutes::{Config, GenerateReport, RouteGenerator, WriteOutcome};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

/// Loads the config and builds a generator for the project root
pub fn load_generator(args: &ProjectArgs) -> Result<RouteGenerator> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Project root {:?} does not exist", root))?;

    let config_path: PathBuf = root.join(&args.config);
    let config = Config::load(&config_path).with_context(|| format!("Failed to load {:?}", config_path))?;

    let generator = RouteGenerator::from_config(&config, Some(&root)).context("Invalid configuration")?;
    tracing::debug!("Project root {:?}, {} scan dirs", root, generator.config().dirs.len());

    Ok(generator)
}

/// One status line per written file
pub fn print_report(report: &GenerateReport) {
    match report.routes_outcome {
        WriteOutcome::Written => println!(
            "  {} {} ({} routes)",
            "✓".green(),
            report.routes_module.display(),
            report.route_count
        ),
        WriteOutcome::Unchanged => println!(
            "  {} {} unchanged",
            "ℹ".cyan(),
            report.routes_module.display()
        ),
    }

    if report.router_outcome == Some(WriteOutcome::Written) {
        println!("  {} Router component created", "✓".green());
    }
}
