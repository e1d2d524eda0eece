mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autoroutes")]
#[command(version, about = "autoroutes - file-based route generation for React Router", long_about = None)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Config file, relative to the project root
    #[arg(short, long, global = true, default_value = autoroutes::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the routes module once
    Generate,

    /// Generate, then regenerate whenever pages or metadata change
    Watch,

    /// Print the route table
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Where the project lives and how it is configured
pub struct ProjectArgs {
    pub root: Option<PathBuf>,
    pub config: PathBuf,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "autoroutes=info",
        1 => "autoroutes=debug",
        _ => "autoroutes=trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project = ProjectArgs {
        root: cli.root,
        config: cli.config,
    };

    // Execute command
    match cli.command {
        Commands::Generate => commands::generate::execute(&project)?,
        Commands::Watch => commands::watch::execute(&project)?,
        Commands::Routes { json } => commands::routes::execute(&project, json)?,
    }

    Ok(())
}
