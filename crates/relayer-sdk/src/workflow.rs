//! End-to-end proof submission workflow
//!
//! Registers the VK when the cache has no entry for it, submits the
//! proof, then polls job status until the requested finality level or an
//! unrecoverable error.

use crate::cache::VkCache;
use crate::client::RelayerApi;
use crate::error::{RelayerError, Result};
use crate::types::{
    FinalityLevel, JobStatus, ProofArtifacts, ProofOptions, ProofSubmission, ProofType,
    SubmissionResponse, DEFAULT_MAX_POLL_ATTEMPTS,
};
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Bounded job-status polling policy.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    /// Defaults for a finality level: 5 s for block inclusion and
    /// finalization, 20 s for aggregation.
    pub fn for_finality(finality: FinalityLevel) -> Self {
        Self {
            interval: finality.poll_interval(),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// Input to one workflow run.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub proof_type: ProofType,
    pub options: ProofOptions,
    pub artifacts: ProofArtifacts,
    pub finality: FinalityLevel,
    /// Target chain id forwarded to the relayer
    pub chain_id: Option<u64>,
    /// When false, skip the registration sub-flow and submit the VK inline
    pub register_vk: bool,
}

/// Terminal outcome of a submission run.
///
/// Rejection is an outcome rather than an error: the caller gets the
/// relayer's response to inspect, and no polling has happened.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// The job reached the requested finality; full status payload
    /// attached, including aggregation details when applicable
    Verified(JobStatus),
    /// Optimistic verification failed at submission time
    Rejected(SubmissionResponse),
}

/// Orchestrates register-vk, submit-proof and job-status polling as one
/// sequential flow. Suspends only at remote calls and inter-poll delays.
pub struct SubmissionWorkflow<A, C> {
    api: A,
    cache: C,
    poll_policy: Option<PollPolicy>,
    cancel: CancellationToken,
}

impl<A: RelayerApi, C: VkCache> SubmissionWorkflow<A, C> {
    pub fn new(api: A, cache: C) -> Self {
        Self {
            api,
            cache,
            poll_policy: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Override the per-finality default polling policy.
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = Some(policy);
        self
    }

    /// Token checked between poll iterations; cancel it to stop the run.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the full submission flow for one proof.
    pub async fn run(&self, request: SubmissionRequest) -> Result<SubmissionOutcome> {
        let vk_hash = self.ensure_registered(&request).await?;

        let submission = ProofSubmission {
            proof_type: request.proof_type,
            options: request.options.clone(),
            artifacts: request.artifacts.clone(),
            vk_hash,
            chain_id: request.chain_id,
        };
        let response = self.api.submit_proof(&submission).await?;
        if !response.optimistic_verify_succeeded() {
            warn!(
                "optimistic verification failed for job {}: {}",
                response.job_id, response.optimistic_verify
            );
            return Ok(SubmissionOutcome::Rejected(response));
        }
        info!("proof submitted, job {}", response.job_id);

        let status = self.poll(&response.job_id, request.finality).await?;
        Ok(SubmissionOutcome::Verified(status))
    }

    /// Returns the registered VK hash to submit with, if one is
    /// available. The registration outcome is cached whether or not the
    /// remote accepted the key; a cached failure payload yields no hash
    /// and the submission falls back to the inline VK.
    async fn ensure_registered(&self, request: &SubmissionRequest) -> Result<Option<String>> {
        if !request.register_vk {
            return Ok(None);
        }
        let fingerprint = request.artifacts.vk.fingerprint();
        let registration = match self.cache.get(&fingerprint)? {
            Some(cached) => {
                debug!("using cached VK registration for {fingerprint}");
                cached
            }
            None => {
                let outcome = self
                    .api
                    .register_vk(request.proof_type, &request.options, &request.artifacts.vk)
                    .await?;
                self.cache.put(&fingerprint, &outcome)?;
                outcome
            }
        };
        if registration.vk_hash().is_none() {
            warn!("VK registration payload carries no hash; submitting the VK inline");
        }
        Ok(registration.vk_hash().map(str::to_owned))
    }

    async fn poll(&self, job_id: &str, finality: FinalityLevel) -> Result<JobStatus> {
        let policy = self
            .poll_policy
            .unwrap_or_else(|| PollPolicy::for_finality(finality));
        let mut attempts = 0u32;
        loop {
            if self.cancel.is_cancelled() {
                return Err(RelayerError::Cancelled);
            }
            match self.api.job_status(job_id).await {
                Ok(status) if finality.is_satisfied_by(&status.status) => {
                    info!("job {job_id} reached {}", status.status);
                    return Ok(status);
                }
                Ok(status) => {
                    debug!("job {job_id} status {}, waiting", status.status);
                }
                Err(err) if err.is_transient() => {
                    warn!("job-status poll failed transiently ({err}), retrying");
                }
                Err(err) => {
                    error!("job-status poll failed: {err}");
                    return Err(err);
                }
            }
            attempts += 1;
            if attempts >= policy.max_attempts {
                return Err(RelayerError::DeadlineExceeded {
                    target: finality.target_status().to_owned(),
                    attempts,
                });
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return Err(RelayerError::Cancelled),
                _ = tokio::time::sleep(policy.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryVkCache;
    use crate::types::{VkMaterial, VkRegistration};
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Scripted relayer that pops pre-arranged responses and counts calls.
    #[derive(Default)]
    struct ScriptedApi {
        registrations: Mutex<Vec<Result<VkRegistration>>>,
        submissions: Mutex<Vec<Result<SubmissionResponse>>>,
        statuses: Mutex<Vec<Result<JobStatus>>>,
        register_calls: AtomicU32,
        submit_calls: AtomicU32,
        status_calls: AtomicU32,
    }

    impl ScriptedApi {
        fn pop<T>(queue: &Mutex<Vec<Result<T>>>, what: &str) -> Result<T> {
            let mut queue = queue.lock().unwrap();
            assert!(!queue.is_empty(), "unexpected {what} call");
            queue.remove(0)
        }
    }

    impl RelayerApi for ScriptedApi {
        async fn register_vk(
            &self,
            _proof_type: ProofType,
            _options: &ProofOptions,
            _vk: &VkMaterial,
        ) -> Result<VkRegistration> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.registrations, "register_vk")
        }

        async fn submit_proof(
            &self,
            _submission: &ProofSubmission,
        ) -> Result<SubmissionResponse> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.submissions, "submit_proof")
        }

        async fn job_status(&self, _job_id: &str) -> Result<JobStatus> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Self::pop(&self.statuses, "job_status")
        }
    }

    fn submission_response(optimistic_verify: &str) -> SubmissionResponse {
        serde_json::from_value(json!({
            "jobId": "job-1",
            "optimisticVerify": optimistic_verify
        }))
        .unwrap()
    }

    fn job_status(status: &str) -> JobStatus {
        serde_json::from_value(json!({"jobId": "job-1", "status": status})).unwrap()
    }

    fn request(finality: FinalityLevel, register_vk: bool) -> SubmissionRequest {
        SubmissionRequest {
            proof_type: ProofType::Ultraplonk,
            options: ProofOptions::ultraplonk(1),
            artifacts: ProofArtifacts::ultraplonk(
                "cHJvb2Y=",
                VkMaterial::Text("dms=".to_string()),
            ),
            finality,
            chain_id: None,
            register_vk,
        }
    }

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_rejected_submission_does_not_poll() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("failed")));

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new());
        let outcome = workflow
            .run(request(FinalityLevel::IncludedInBlock, false))
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Rejected(response) => {
                assert_eq!(response.optimistic_verify, "failed");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(workflow.api.status_calls.load(Ordering::SeqCst), 0);
        assert_eq!(workflow.api.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_polls_until_terminal_status() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        {
            let mut statuses = api.statuses.lock().unwrap();
            statuses.push(Ok(job_status("Pending")));
            statuses.push(Ok(job_status("Pending")));
            statuses.push(Ok(job_status("IncludedInBlock")));
        }

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        let outcome = workflow
            .run(request(FinalityLevel::IncludedInBlock, false))
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::Verified(status) => {
                assert_eq!(status.status, "IncludedInBlock");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(workflow.api.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_poll_error_is_retried() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        {
            let mut statuses = api.statuses.lock().unwrap();
            statuses.push(Err(RelayerError::Transient { status: 503 }));
            statuses.push(Ok(job_status("Aggregated")));
        }

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        let outcome = workflow
            .run(request(FinalityLevel::Aggregated, false))
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Verified(_)));
        assert_eq!(workflow.api.status_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transient_poll_error_aborts() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        api.statuses.lock().unwrap().push(Err(RelayerError::Api {
            status: 500,
            body: "internal".to_string(),
        }));

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        let err = workflow
            .run(request(FinalityLevel::IncludedInBlock, false))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayerError::Api { status: 500, .. }));
        assert_eq!(workflow.api.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poll_deadline_is_enforced() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        {
            let mut statuses = api.statuses.lock().unwrap();
            for _ in 0..3 {
                statuses.push(Ok(job_status("Pending")));
            }
        }

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(3));
        let err = workflow
            .run(request(FinalityLevel::Aggregated, false))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RelayerError::DeadlineExceeded { attempts: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_cancellation_stops_polling() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));

        let cancel = CancellationToken::new();
        cancel.cancel();
        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10))
            .with_cancellation(cancel);
        let err = workflow
            .run(request(FinalityLevel::IncludedInBlock, false))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayerError::Cancelled));
        assert_eq!(workflow.api.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_registers_vk_once_and_submits_hash() {
        let api = ScriptedApi::default();
        api.registrations
            .lock()
            .unwrap()
            .push(Ok(VkRegistration(json!({"vkHash": "0xabc"}))));
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        api.statuses
            .lock()
            .unwrap()
            .push(Ok(job_status("IncludedInBlock")));

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        workflow
            .run(request(FinalityLevel::IncludedInBlock, true))
            .await
            .unwrap();

        assert_eq!(workflow.api.register_calls.load(Ordering::SeqCst), 1);
        let fingerprint = request(FinalityLevel::IncludedInBlock, true)
            .artifacts
            .vk
            .fingerprint();
        let cached = workflow.cache.get(&fingerprint).unwrap().unwrap();
        assert_eq!(cached.vk_hash(), Some("0xabc"));
    }

    #[tokio::test]
    async fn test_cached_registration_skips_register_call() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        api.statuses
            .lock()
            .unwrap()
            .push(Ok(job_status("IncludedInBlock")));

        let cache = MemoryVkCache::new();
        let fingerprint = request(FinalityLevel::IncludedInBlock, true)
            .artifacts
            .vk
            .fingerprint();
        cache
            .put(&fingerprint, &VkRegistration(json!({"vkHash": "0xcached"})))
            .unwrap();

        let workflow =
            SubmissionWorkflow::new(api, cache).with_poll_policy(fast_policy(10));
        workflow
            .run(request(FinalityLevel::IncludedInBlock, true))
            .await
            .unwrap();

        assert_eq!(workflow.api.register_calls.load(Ordering::SeqCst), 0);
        assert_eq!(workflow.api.submit_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_registration_failure_payload_is_cached_and_submission_proceeds() {
        let api = ScriptedApi::default();
        api.registrations
            .lock()
            .unwrap()
            .push(Ok(VkRegistration(json!({"code": "REGISTER_VK_FAILED"}))));
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        api.statuses
            .lock()
            .unwrap()
            .push(Ok(job_status("IncludedInBlock")));

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        workflow
            .run(request(FinalityLevel::IncludedInBlock, true))
            .await
            .unwrap();

        // The failure payload is cached and the proof was still submitted
        let fingerprint = request(FinalityLevel::IncludedInBlock, true)
            .artifacts
            .vk
            .fingerprint();
        let cached = workflow.cache.get(&fingerprint).unwrap().unwrap();
        assert_eq!(cached.vk_hash(), None);
        assert_eq!(workflow.api.submit_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_later_finality_satisfies_earlier_target() {
        let api = ScriptedApi::default();
        api.submissions
            .lock()
            .unwrap()
            .push(Ok(submission_response("success")));
        api.statuses
            .lock()
            .unwrap()
            .push(Ok(job_status("Finalized")));

        let workflow = SubmissionWorkflow::new(api, MemoryVkCache::new())
            .with_poll_policy(fast_policy(10));
        let outcome = workflow
            .run(request(FinalityLevel::IncludedInBlock, false))
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Verified(_)));
    }
}
