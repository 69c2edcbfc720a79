//! Command implementations for zkv-relay

use anyhow::{Context, Result};
use base64ct::{Base64, Encoding};
use std::fs;
use std::path::Path;
use zkverify_relayer_sdk::{ProofOptions, ProofType, VkMaterial};

pub mod format_vk;
pub mod register_vk;
pub mod status;
pub mod submit;

/// Load VK material from disk in the shape the relayer expects:
/// a snarkjs vkey JSON object for groth16, a base64 blob for ultraplonk
/// (raw binary keys are validated and base64-encoded), an image id
/// string for risc0.
pub(crate) fn load_vk_material(proof_type: ProofType, path: &Path) -> Result<VkMaterial> {
    match proof_type {
        ProofType::Groth16 => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read vkey file: {path:?}"))?;
            let value = serde_json::from_str(&text)
                .with_context(|| format!("Invalid vkey JSON: {path:?}"))?;
            Ok(VkMaterial::Json(value))
        }
        ProofType::Ultraplonk => {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read VK file: {path:?}"))?;
            match std::str::from_utf8(&bytes) {
                Ok(text) if ultraplonk_vk::VerificationKey::from_base64(text).is_ok() => {
                    Ok(VkMaterial::Text(text.trim().to_owned()))
                }
                _ => {
                    ultraplonk_vk::VerificationKey::from_bytes(&bytes)
                        .with_context(|| format!("Invalid UltraPlonk VK: {path:?}"))?;
                    Ok(VkMaterial::Text(Base64::encode_string(&bytes)))
                }
            }
        }
        ProofType::Risc0 => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read image id file: {path:?}"))?;
            Ok(VkMaterial::Text(text.trim().to_owned()))
        }
    }
}

/// Proof options for a proof system from the shared CLI flags.
pub(crate) fn proof_options(
    proof_type: ProofType,
    public_inputs: u32,
    risc0_version: &str,
) -> ProofOptions {
    match proof_type {
        ProofType::Groth16 => ProofOptions::groth16_snarkjs_bn128(),
        ProofType::Ultraplonk => ProofOptions::ultraplonk(public_inputs),
        ProofType::Risc0 => ProofOptions::risc0(risc0_version),
    }
}
