//! zkv-relay CLI - submit zero-knowledge proofs to a hosted relayer
//!
//! Provides commands for registering verification keys, submitting
//! proofs and waiting for finality, checking job status, and formatting
//! UltraPlonk VKs into their canonical on-chain form.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{format_vk, register_vk, status, submit};
use console::style;

/// CLI for the hosted proof-verification relayer
#[derive(Parser)]
#[command(name = "zkv-relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common options shared across commands
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Relayer API base URL
    #[arg(short, long, env = "RELAYER_API_URL")]
    pub base_url: Option<String>,

    /// Relayer API key
    #[arg(short, long, env = "RELAYER_API_KEY")]
    pub api_key: Option<String>,

    /// Output format (human, json)
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a verification key with the relayer
    RegisterVk(register_vk::RegisterVkArgs),

    /// Submit a proof and wait for the requested finality
    Submit(submit::SubmitArgs),

    /// Check the status of a submitted job
    Status(status::StatusArgs),

    /// Decode a binary UltraPlonk VK into its canonical hex form
    FormatVk(format_vk::FormatVkArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    // Run command
    let result = match cli.command {
        Commands::RegisterVk(args) => {
            let config = config::Config::load(&args.common)?;
            register_vk::run(&config, args).await
        }
        Commands::Submit(args) => {
            let config = config::Config::load(&args.common)?;
            submit::run(&config, args).await
        }
        Commands::Status(args) => {
            let config = config::Config::load(&args.common)?;
            status::run(&config, args).await
        }
        Commands::FormatVk(args) => format_vk::run(args),
    };

    // Handle errors nicely
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
