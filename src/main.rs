//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_insight` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use site_insight::config::{AnalyzeArgs, Cli, Command};
use site_insight::initialization::{init_browsing_client, init_logger_with};
use site_insight::{run_server, shutdown_signal, Analyzer, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load API credentials from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = run_server(Config::from(args), shutdown_signal()).await {
                eprintln!("site_insight error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
        Command::Analyze(args) => analyze(args).await,
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let client = init_browsing_client(&args.user_agent).context("Failed to initialize HTTP client")?;
    let analyzer = Analyzer::new(client, args.proxy_url);

    match analyzer.analyze(&args.website).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    }
}
