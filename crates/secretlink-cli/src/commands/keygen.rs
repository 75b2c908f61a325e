//! Master key generation.

use clap::Args;

use secretlink_core::error::AppError;
use secretlink_crypto::MasterKey;

/// Arguments for the keygen command
#[derive(Debug, Args)]
pub struct KeygenArgs {
    /// Key version to print in the config snippet
    #[arg(short, long, default_value_t = 1)]
    pub version: u32,
}

/// Print a fresh 256-bit master key as hex, ready for `crypto.keys`.
pub fn execute(args: &KeygenArgs) -> Result<(), AppError> {
    let key = MasterKey::generate()?;
    println!("[crypto.keys]");
    println!("\"{}\" = \"{}\"", args.version, key.to_hex());
    Ok(())
}
