//! CLI command definitions and dispatch.

pub mod config;
pub mod keygen;
pub mod migrate;

use clap::{Parser, Subcommand};

use secretlink_core::config::AppConfig;
use secretlink_core::error::AppError;

/// SecretLink: one-time secret links
#[derive(Debug, Parser)]
#[command(name = "secretlink-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/{env}.toml`)
    #[arg(short, long, env = "SECRETLINK_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Generate a master key
    Keygen(keygen::KeygenArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Keygen(args) => keygen::execute(args),
            Commands::Config(args) => config::execute(args, &self.env),
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}
