//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use secretlink_core::error::AppError;
use secretlink_crypto::Keyring;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load the configuration and validate it, including the keyring
    Check,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            let config = super::load_config(env)?;
            let keyring = Keyring::from_config(&config.crypto)?;

            let versions: Vec<String> = keyring.versions().iter().map(u32::to_string).collect();
            output::print_kv(
                "Environment",
                if config.environment.is_production() {
                    "production"
                } else {
                    "development"
                },
            );
            output::print_kv("Listen address", &config.server.bind_address());
            output::print_kv("Public base URL", &config.server.public_base_url);
            output::print_kv("Active key version", &keyring.active_version().to_string());
            output::print_kv("Key versions", &versions.join(", "));
            output::print_success("Configuration is valid.");
        }
    }
    Ok(())
}
