//! submit command - end-to-end proof submission

use crate::config::Config;
use crate::CommonArgs;
use anyhow::{Context, Result};
use base64ct::{Base64, Encoding};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zkverify_relayer_sdk::{
    FinalityLevel, JobStatus, JsonFileVkCache, ProofArtifacts, ProofType, SubmissionOutcome,
    SubmissionRequest, SubmissionWorkflow, VkMaterial,
};

#[derive(Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Proof system
    #[arg(long, value_enum)]
    proof_type: ProofType,

    /// Path to the proof artifact (binary/base64 blob or snarkjs proof JSON)
    #[arg(long)]
    proof: PathBuf,

    /// Path to the public signals JSON (groth16, risc0)
    #[arg(long)]
    public_signals: Option<PathBuf>,

    /// Path to the VK artifact
    #[arg(long)]
    vk: PathBuf,

    /// Finality level to wait for
    #[arg(long, value_enum, default_value = "aggregated")]
    finality: FinalityLevel,

    /// Target chain id forwarded to the relayer
    #[arg(long)]
    chain_id: Option<u64>,

    /// Submit the VK inline instead of registering it first
    #[arg(long)]
    no_register: bool,

    /// Number of public inputs (ultraplonk)
    #[arg(long, default_value_t = 1)]
    public_inputs: u32,

    /// RISC0 version tag (risc0)
    #[arg(long, default_value = "V2_1")]
    risc0_version: String,

    /// Write the aggregation receipt to this file
    #[arg(long)]
    aggregation_out: Option<PathBuf>,
}

pub async fn run(config: &Config, args: SubmitArgs) -> Result<()> {
    let vk = super::load_vk_material(args.proof_type, &args.vk)?;
    let artifacts = load_artifacts(&args, vk)?;
    let options = super::proof_options(args.proof_type, args.public_inputs, &args.risc0_version);

    if !config.quiet && !config.json_output {
        println!(
            "{} Submitting {} proof to {}...",
            style("→").cyan().bold(),
            args.proof_type.as_str(),
            config.base_url
        );
    }

    let client = config.relayer_client()?;
    let cache = JsonFileVkCache::new(config.vk_cache_dir());
    let workflow = SubmissionWorkflow::new(client, cache);

    // Spinner while the workflow waits on the relayer
    let spinner = if !config.quiet && !config.json_output {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Waiting for {}...", args.finality.target_status()));
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    } else {
        None
    };

    let request = SubmissionRequest {
        proof_type: args.proof_type,
        options,
        artifacts,
        finality: args.finality,
        chain_id: args.chain_id,
        register_vk: !args.no_register,
    };
    let outcome = workflow.run(request).await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    match outcome? {
        SubmissionOutcome::Verified(status) => {
            if let Some(path) = &args.aggregation_out {
                write_aggregation_receipt(path, &status)?;
            }
            if config.json_output {
                println!("{}", serde_json::to_string(&status)?);
            } else if !config.quiet {
                println!(
                    "{} Job {} reached {}",
                    style("✓").green().bold(),
                    status.job_id.as_deref().unwrap_or("?"),
                    status.status
                );
                if let Some(path) = &args.aggregation_out {
                    println!("  {} Aggregation receipt written to {:?}", style("→").dim(), path);
                }
            }
            Ok(())
        }
        SubmissionOutcome::Rejected(response) => {
            if config.json_output {
                println!("{}", serde_json::to_string(&response)?);
            } else if !config.quiet {
                println!(
                    "{} Optimistic verification failed: {}",
                    style("✗").red().bold(),
                    response.optimistic_verify
                );
                println!("  Check the proof artifacts and options.");
            }
            anyhow::bail!("proof rejected by optimistic verification")
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON: {path:?}"))
}

fn load_artifacts(args: &SubmitArgs, vk: VkMaterial) -> Result<ProofArtifacts> {
    match args.proof_type {
        ProofType::Groth16 => {
            let proof = read_json(&args.proof)?;
            let signals_path = args
                .public_signals
                .as_ref()
                .context("groth16 requires --public-signals")?;
            Ok(ProofArtifacts::groth16(proof, read_json(signals_path)?, vk))
        }
        ProofType::Ultraplonk => {
            let bytes = fs::read(&args.proof)
                .with_context(|| format!("Failed to read proof file: {:?}", args.proof))?;
            // Raw binary proofs are base64-encoded; textual blobs pass through
            let proof_base64 = match std::str::from_utf8(&bytes) {
                Ok(text) => text.trim().to_owned(),
                Err(_) => Base64::encode_string(&bytes),
            };
            let mut artifacts = ProofArtifacts::ultraplonk(proof_base64, vk);
            if let Some(signals_path) = &args.public_signals {
                artifacts = artifacts.with_public_signals(read_json(signals_path)?);
            }
            Ok(artifacts)
        }
        ProofType::Risc0 => {
            let proof = read_json(&args.proof)?;
            let signals_path = args
                .public_signals
                .as_ref()
                .context("risc0 requires --public-signals")?;
            Ok(ProofArtifacts::risc0(proof, read_json(signals_path)?, vk))
        }
    }
}

/// Legacy aggregation receipt shape: the aggregation details flattened
/// together with the aggregation id.
fn write_aggregation_receipt(path: &Path, status: &JobStatus) -> Result<()> {
    let mut receipt = serde_json::Map::new();
    if let Some(Value::Object(details)) = status.aggregation_details.clone() {
        receipt.extend(details);
    }
    if let Some(id) = status.aggregation_id.clone() {
        receipt.insert("aggregationId".to_string(), id);
    }
    if let Some(domain) = status.domain_id.clone() {
        receipt.insert("domainId".to_string(), domain);
    }
    fs::write(path, serde_json::to_string_pretty(&Value::Object(receipt))?)
        .with_context(|| format!("Failed to write aggregation receipt: {path:?}"))?;
    Ok(())
}
