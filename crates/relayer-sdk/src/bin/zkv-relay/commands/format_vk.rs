//! format-vk command - canonical hex encoding of an UltraPlonk VK

use crate::{CommonArgs, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use ultraplonk_vk::{canonical_hex, VerificationKey};

#[derive(Args)]
pub struct FormatVkArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the binary or base64 VK
    #[arg(long)]
    vk: PathBuf,
}

pub fn run(args: FormatVkArgs) -> Result<()> {
    let bytes =
        fs::read(&args.vk).with_context(|| format!("Failed to read VK file: {:?}", args.vk))?;
    let key = match std::str::from_utf8(&bytes) {
        Ok(text) => VerificationKey::from_base64(text)
            .or_else(|_| VerificationKey::from_bytes(&bytes))
            .with_context(|| format!("Invalid UltraPlonk VK: {:?}", args.vk))?,
        Err(_) => VerificationKey::from_bytes(&bytes)
            .with_context(|| format!("Invalid UltraPlonk VK: {:?}", args.vk))?,
    };

    let hex = canonical_hex(&key);
    if args.common.output == OutputFormat::Json {
        println!(
            r#"{{"circuitSize": {}, "numPublicInputs": {}, "vk": "{}"}}"#,
            key.circuit_size, key.num_public_inputs, hex
        );
    } else {
        if !args.common.quiet {
            eprintln!("  Circuit size: {}", key.circuit_size);
            eprintln!("  Public inputs: {}", key.num_public_inputs);
        }
        println!("{hex}");
    }

    Ok(())
}
