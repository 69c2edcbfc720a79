//! register-vk command - register a verification key with the relayer

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;
use zkverify_relayer_sdk::{JsonFileVkCache, ProofType, RelayerApi, VkCache};

#[derive(Args)]
pub struct RegisterVkArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Proof system of the key
    #[arg(long, value_enum)]
    proof_type: ProofType,

    /// Path to the VK artifact (binary/base64 blob, snarkjs vkey JSON,
    /// or risc0 image id)
    #[arg(long)]
    vk: PathBuf,

    /// Number of public inputs (ultraplonk)
    #[arg(long, default_value_t = 1)]
    public_inputs: u32,

    /// RISC0 version tag (risc0)
    #[arg(long, default_value = "V2_1")]
    risc0_version: String,
}

pub async fn run(config: &Config, args: RegisterVkArgs) -> Result<()> {
    let vk = super::load_vk_material(args.proof_type, &args.vk)?;
    let options = super::proof_options(args.proof_type, args.public_inputs, &args.risc0_version);

    if !config.quiet && !config.json_output {
        println!(
            "{} Registering {} verification key...",
            style("→").cyan().bold(),
            args.proof_type.as_str()
        );
    }

    let client = config.relayer_client()?;
    let registration = client.register_vk(args.proof_type, &options, &vk).await?;

    // Persist for later submissions, success or failure payload alike
    let cache = JsonFileVkCache::new(config.vk_cache_dir());
    cache.put(&vk.fingerprint(), &registration)?;

    if config.json_output {
        println!("{}", serde_json::to_string(&registration)?);
    } else if !config.quiet {
        match registration.vk_hash() {
            Some(hash) => {
                println!("{} VK registered: {}", style("✓").green().bold(), hash);
            }
            None => {
                println!(
                    "{} Registration did not return a VK hash:",
                    style("✗").red().bold()
                );
                println!("{}", serde_json::to_string_pretty(&registration)?);
            }
        }
    }

    Ok(())
}
