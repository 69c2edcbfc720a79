//! HTTP client for the hosted proof-verification relayer

use crate::error::{RelayerError, Result};
use crate::types::{
    JobStatus, ProofOptions, ProofSubmission, ProofType, RelayerConfig, SubmissionResponse,
    VkMaterial, VkRegistration,
};
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The remote operations the submission workflow depends on.
///
/// Implemented by [`RelayerClient`]; tests substitute a scripted fake.
#[allow(async_fn_in_trait)]
pub trait RelayerApi {
    /// Register a VK. Remote rejections come back as payloads, not
    /// errors; only transport failures raise.
    async fn register_vk(
        &self,
        proof_type: ProofType,
        options: &ProofOptions,
        vk: &VkMaterial,
    ) -> Result<VkRegistration>;

    /// Submit a proof for verification.
    async fn submit_proof(&self, submission: &ProofSubmission) -> Result<SubmissionResponse>;

    /// Fetch the current status of a job. Does not mutate local state.
    async fn job_status(&self, job_id: &str) -> Result<JobStatus>;
}

/// Typed client for the relayer's three remote operations.
///
/// # Example
///
/// ```ignore
/// use zkverify_relayer_sdk::{RelayerApi, RelayerClient, RelayerConfig};
///
/// let client = RelayerClient::new(RelayerConfig::new(api_key))?;
/// let status = client.job_status(&job_id).await?;
/// ```
pub struct RelayerClient {
    http: reqwest::Client,
    config: RelayerConfig,
}

impl RelayerClient {
    /// Create a new client from config.
    pub fn new(config: RelayerConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Endpoint URL with the API key as the trailing path segment.
    fn url(&self, operation: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            operation,
            self.config.api_key
        )
    }

    /// Map a response to a typed payload, classifying failures: 503 is
    /// transient, other non-2xx are API errors with the body attached.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(RelayerError::Transient {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayerError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

impl RelayerApi for RelayerClient {
    async fn register_vk(
        &self,
        proof_type: ProofType,
        options: &ProofOptions,
        vk: &VkMaterial,
    ) -> Result<VkRegistration> {
        let body = RegisterVkRequest {
            proof_type,
            proof_options: options,
            vk: vk.as_value(),
        };
        let response = self
            .http
            .post(self.url("register-vk"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let payload: Value = response.json().await?;
        if !status.is_success() {
            debug!("register-vk returned HTTP {status}: {payload}");
        }
        Ok(VkRegistration(payload))
    }

    async fn submit_proof(&self, submission: &ProofSubmission) -> Result<SubmissionResponse> {
        let body = SubmitProofRequest::from_submission(submission);
        let response = self
            .http
            .post(self.url("submit-proof"))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let url = format!("{}/{}", self.url("job-status"), job_id);
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }
}

/// register-vk request body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterVkRequest<'a> {
    proof_type: ProofType,
    proof_options: &'a ProofOptions,
    vk: Value,
}

/// submit-proof request body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitProofRequest<'a> {
    proof_type: ProofType,
    vk_registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain_id: Option<u64>,
    proof_options: &'a ProofOptions,
    proof_data: ProofData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProofData<'a> {
    proof: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_signals: Option<&'a Value>,
    vk: Value,
}

impl<'a> SubmitProofRequest<'a> {
    fn from_submission(submission: &'a ProofSubmission) -> Self {
        let (vk_registered, vk) = match &submission.vk_hash {
            Some(hash) => (true, Value::String(hash.clone())),
            None => (false, submission.artifacts.vk.as_value()),
        };
        SubmitProofRequest {
            proof_type: submission.proof_type,
            vk_registered,
            chain_id: submission.chain_id,
            proof_options: &submission.options,
            proof_data: ProofData {
                proof: &submission.artifacts.proof,
                public_signals: submission.artifacts.public_signals.as_ref(),
                vk,
            },
        }
    }
}
