//! Types and constants for the relayer SDK

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha3::{Digest, Keccak256};
use std::time::Duration;

/// Production relayer API base URL
pub const DEFAULT_API_URL: &str = "https://relayer-api.horizenlabs.io/api/v1";

/// Poll interval while waiting for block inclusion or finalization
pub const BLOCK_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll interval while waiting for aggregation (slower cadence)
pub const AGGREGATION_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Default cap on job-status polls before the workflow gives up
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// Configuration for the relayer client
#[derive(Clone, Debug)]
pub struct RelayerConfig {
    /// API base URL (default: the hosted relayer)
    pub base_url: String,
    /// Opaque API key, sent as a URL path segment
    pub api_key: String,
    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl RelayerConfig {
    /// Create a config for the hosted relayer with default values.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at a different relayer deployment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Supported proof systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ProofType {
    Groth16,
    Ultraplonk,
    Risc0,
}

impl ProofType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProofType::Groth16 => "groth16",
            ProofType::Ultraplonk => "ultraplonk",
            ProofType::Risc0 => "risc0",
        }
    }
}

/// Proof-system specific options sent with registration and submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProofOptions {
    /// groth16: proving library and curve
    Groth16 { library: String, curve: String },
    /// ultraplonk: public input count
    #[serde(rename_all = "camelCase")]
    Ultraplonk { number_of_public_inputs: u32 },
    /// risc0: prover version tag
    Risc0 { version: String },
}

impl ProofOptions {
    /// snarkjs + bn128, the stack the hosted relayer verifies groth16 against
    pub fn groth16_snarkjs_bn128() -> Self {
        ProofOptions::Groth16 {
            library: "snarkjs".to_string(),
            curve: "bn128".to_string(),
        }
    }

    pub fn ultraplonk(number_of_public_inputs: u32) -> Self {
        ProofOptions::Ultraplonk {
            number_of_public_inputs,
        }
    }

    pub fn risc0(version: impl Into<String>) -> Self {
        ProofOptions::Risc0 {
            version: version.into(),
        }
    }
}

/// Verification key material in the shape the relayer accepts:
/// a snarkjs vkey object for groth16, a base64 blob or canonical hex
/// string for ultraplonk, an image id for risc0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VkMaterial {
    Text(String),
    Json(Value),
}

impl VkMaterial {
    /// Keccak256 fingerprint used as the registration cache key.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Keccak256::new();
        match self {
            VkMaterial::Text(text) => hasher.update(text.as_bytes()),
            VkMaterial::Json(value) => hasher.update(value.to_string().as_bytes()),
        }
        hex::encode(hasher.finalize())
    }

    /// The JSON value submitted in request bodies.
    pub fn as_value(&self) -> Value {
        match self {
            VkMaterial::Text(text) => Value::String(text.clone()),
            VkMaterial::Json(value) => value.clone(),
        }
    }
}

/// Proof material for one submission, shaped per proof system.
///
/// Together with [`ProofOptions`] this is the per-system half of the
/// submission payload: each constructor produces the `proofData` shape
/// the relayer expects for that system.
#[derive(Debug, Clone)]
pub struct ProofArtifacts {
    /// base64 blob for ultraplonk/risc0, snarkjs proof object for groth16
    pub proof: Value,
    pub public_signals: Option<Value>,
    pub vk: VkMaterial,
}

impl ProofArtifacts {
    /// groth16: snarkjs proof object + public signal array.
    pub fn groth16(proof: Value, public_signals: Value, vk: VkMaterial) -> Self {
        Self {
            proof,
            public_signals: Some(public_signals),
            vk,
        }
    }

    /// ultraplonk: base64 proof blob; public inputs travel inside it.
    pub fn ultraplonk(proof_base64: impl Into<String>, vk: VkMaterial) -> Self {
        Self {
            proof: Value::String(proof_base64.into()),
            public_signals: None,
            vk,
        }
    }

    /// risc0: receipt proof + journal outputs + image id.
    pub fn risc0(proof: Value, public_signals: Value, vk: VkMaterial) -> Self {
        Self {
            proof,
            public_signals: Some(public_signals),
            vk,
        }
    }

    pub fn with_public_signals(mut self, public_signals: Value) -> Self {
        self.public_signals = Some(public_signals);
        self
    }
}

/// Fully-shaped submit-proof parameters, built by the workflow.
#[derive(Debug, Clone)]
pub struct ProofSubmission {
    pub proof_type: ProofType,
    pub options: ProofOptions,
    pub artifacts: ProofArtifacts,
    /// Registered VK hash; when set, it replaces the inline VK and the
    /// request is flagged `vkRegistered: true`.
    pub vk_hash: Option<String>,
    /// Target chain id forwarded to the relayer, omitted when unset
    pub chain_id: Option<u64>,
}

/// Verbatim remote payload from a VK registration attempt.
///
/// Registration failures are captured rather than raised: the payload is
/// cached either way and inspected for a hash at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VkRegistration(pub Value);

impl VkRegistration {
    /// The registered VK hash, under `vkHash` or `meta.vkHash`.
    pub fn vk_hash(&self) -> Option<&str> {
        self.0
            .get("vkHash")
            .and_then(Value::as_str)
            .or_else(|| {
                self.0
                    .get("meta")
                    .and_then(|meta| meta.get("vkHash"))
                    .and_then(Value::as_str)
            })
    }
}

/// Response from submit-proof
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub job_id: String,
    /// `"success"` means the proof passed the relayer's provisional check;
    /// anything else is a terminal rejection and polling must not start
    pub optimistic_verify: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SubmissionResponse {
    pub fn optimistic_verify_succeeded(&self) -> bool {
        self.optimistic_verify == "success"
    }
}

/// Job status payload from the relayer.
///
/// The status vocabulary is owned by the remote service; it is compared
/// only against the known terminal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Value>,
    /// Aggregation proof path details needed for later on-chain
    /// aggregation verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_details: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// How far a submission must progress before the workflow returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FinalityLevel {
    IncludedInBlock,
    Finalized,
    Aggregated,
}

impl FinalityLevel {
    /// Remote status string that terminates polling at this level.
    pub fn target_status(self) -> &'static str {
        match self {
            FinalityLevel::IncludedInBlock => "IncludedInBlock",
            FinalityLevel::Finalized => "Finalized",
            FinalityLevel::Aggregated => "Aggregated",
        }
    }

    /// Statuses that satisfy this finality level. A job that has already
    /// finalized or aggregated has necessarily been included in a block.
    pub fn is_satisfied_by(self, status: &str) -> bool {
        match self {
            FinalityLevel::IncludedInBlock => {
                matches!(status, "IncludedInBlock" | "Finalized" | "Aggregated")
            }
            FinalityLevel::Finalized => matches!(status, "Finalized" | "Aggregated"),
            FinalityLevel::Aggregated => status == "Aggregated",
        }
    }

    /// Default inter-poll delay; aggregation runs on a slower cadence.
    pub fn poll_interval(self) -> Duration {
        match self {
            FinalityLevel::Aggregated => AGGREGATION_POLL_INTERVAL,
            _ => BLOCK_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proof_options_wire_shapes() {
        assert_eq!(
            serde_json::to_value(ProofOptions::groth16_snarkjs_bn128()).unwrap(),
            json!({"library": "snarkjs", "curve": "bn128"})
        );
        assert_eq!(
            serde_json::to_value(ProofOptions::ultraplonk(1)).unwrap(),
            json!({"numberOfPublicInputs": 1})
        );
        assert_eq!(
            serde_json::to_value(ProofOptions::risc0("V2_1")).unwrap(),
            json!({"version": "V2_1"})
        );
    }

    #[test]
    fn test_vk_registration_hash_lookup() {
        let top = VkRegistration(json!({"vkHash": "0xabc"}));
        assert_eq!(top.vk_hash(), Some("0xabc"));

        let nested = VkRegistration(json!({"meta": {"vkHash": "0xdef"}}));
        assert_eq!(nested.vk_hash(), Some("0xdef"));

        let failure = VkRegistration(json!({"code": "REGISTER_VK_FAILED", "message": "already registered"}));
        assert_eq!(failure.vk_hash(), None);
    }

    #[test]
    fn test_vk_material_fingerprint_is_stable() {
        let a = VkMaterial::Text("dGVzdA==".to_string());
        let b = VkMaterial::Text("dGVzdA==".to_string());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let other = VkMaterial::Text("b3RoZXI=".to_string());
        assert_ne!(a.fingerprint(), other.fingerprint());

        let json_vk = VkMaterial::Json(json!({"curve": "bn128"}));
        assert_ne!(a.fingerprint(), json_vk.fingerprint());
    }

    #[test]
    fn test_job_status_deserializes_remote_payload() {
        let status: JobStatus = serde_json::from_value(json!({
            "jobId": "job-1",
            "status": "Aggregated",
            "aggregationId": 42,
            "domainId": 0,
            "aggregationDetails": {"merklePath": ["0x01"], "leafIndex": 3},
            "txHash": "0xfeed"
        }))
        .unwrap();
        assert_eq!(status.status, "Aggregated");
        assert_eq!(status.aggregation_id, Some(json!(42)));
        assert!(status.aggregation_details.is_some());
        assert_eq!(status.extra.get("txHash"), Some(&json!("0xfeed")));
    }

    #[test]
    fn test_finality_satisfaction() {
        assert!(FinalityLevel::IncludedInBlock.is_satisfied_by("IncludedInBlock"));
        assert!(FinalityLevel::IncludedInBlock.is_satisfied_by("Aggregated"));
        assert!(!FinalityLevel::IncludedInBlock.is_satisfied_by("Pending"));
        assert!(!FinalityLevel::Aggregated.is_satisfied_by("IncludedInBlock"));
        assert!(FinalityLevel::Aggregated.is_satisfied_by("Aggregated"));
        assert!(!FinalityLevel::Finalized.is_satisfied_by("Proving"));
    }

    #[test]
    fn test_poll_intervals() {
        assert_eq!(
            FinalityLevel::IncludedInBlock.poll_interval(),
            Duration::from_secs(5)
        );
        assert_eq!(
            FinalityLevel::Aggregated.poll_interval(),
            Duration::from_secs(20)
        );
    }
}
