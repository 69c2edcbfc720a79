//! Rust SDK for a hosted zero-knowledge proof-verification relayer
//!
//! This crate submits Groth16, UltraPlonk and RISC0 proofs to the
//! relayer's REST API, registers verification keys (with a pluggable
//! cache so unchanged VKs are registered once), and polls job status
//! until block inclusion, finalization or aggregation.
//!
//! # Example
//!
//! ```ignore
//! use zkverify_relayer_sdk::{
//!     FinalityLevel, JsonFileVkCache, ProofArtifacts, ProofOptions, ProofType,
//!     RelayerClient, RelayerConfig, SubmissionRequest, SubmissionWorkflow,
//!     VkMaterial,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RelayerClient::new(RelayerConfig::new(api_key))?;
//!     let cache = JsonFileVkCache::new("vk-cache");
//!     let workflow = SubmissionWorkflow::new(client, cache);
//!
//!     let outcome = workflow
//!         .run(SubmissionRequest {
//!             proof_type: ProofType::Ultraplonk,
//!             options: ProofOptions::ultraplonk(1),
//!             artifacts: ProofArtifacts::ultraplonk(proof_b64, VkMaterial::Text(vk_b64)),
//!             finality: FinalityLevel::Aggregated,
//!             chain_id: None,
//!             register_vk: true,
//!         })
//!         .await?;
//!
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod error;
mod types;
mod workflow;

pub use cache::{JsonFileVkCache, MemoryVkCache, VkCache};
pub use client::{RelayerApi, RelayerClient};
pub use error::{RelayerError, Result};
pub use types::*;
pub use workflow::{PollPolicy, SubmissionOutcome, SubmissionRequest, SubmissionWorkflow};
