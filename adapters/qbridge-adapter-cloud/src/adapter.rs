//! Remote cloud backend adapter.
//!
//! Submits circuits as QASM 2.0 over HTTPS to a hosted execution service.
//! Credentials come from the environment; without a token the adapter
//! registers as unavailable rather than failing at call time, so discovery
//! surfaces the degraded state up front.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use qbridge_hal::{Adapter, Counts, HalError, HalResult};
use qbridge_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the service endpoint.
pub const ENDPOINT_VAR: &str = "QBRIDGE_CLOUD_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "QBRIDGE_CLOUD_TOKEN";

const DEFAULT_ENDPOINT: &str = "https://api.qbridge.dev/v1/jobs";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest circuit width the service accepts.
pub const MAX_QUBITS: u32 = 32;

/// Job submission payload.
#[derive(Debug, Serialize)]
struct JobRequest<'a> {
    qasm: &'a str,
    shots: u64,
}

/// Job completion payload.
#[derive(Debug, Deserialize)]
struct JobResponse {
    counts: BTreeMap<String, u64>,
}

/// Remote HTTP cloud backend.
pub struct CloudAdapter {
    endpoint: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl CloudAdapter {
    /// Create an adapter from explicit endpoint and credentials.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create an adapter from `QBRIDGE_CLOUD_URL` and `QBRIDGE_CLOUD_TOKEN`.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var(ENDPOINT_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let token = std::env::var(TOKEN_VAR).ok().filter(|t| !t.is_empty());
        Self::new(endpoint, token)
    }

    /// The circuit in the wire format the service accepts.
    pub fn translate(circuit: &Circuit) -> String {
        qbridge_qasm::emit(circuit)
    }
}

#[async_trait]
impl Adapter for CloudAdapter {
    fn name(&self) -> &str {
        "cloud"
    }

    fn description(&self) -> &str {
        "Remote cloud execution service (QASM 2.0 over HTTPS)"
    }

    fn max_qubits(&self) -> u32 {
        MAX_QUBITS
    }

    fn is_available(&self) -> bool {
        self.token.is_some()
    }

    async fn run(&self, circuit: &Circuit, shots: u64) -> HalResult<Counts> {
        let token = self.token.as_deref().ok_or_else(|| HalError::BackendUnavailable {
            backend: self.name().to_string(),
            reason: format!("{TOKEN_VAR} is not set"),
        })?;

        let qasm = Self::translate(circuit);
        debug!(endpoint = %self.endpoint, shots, "submitting job");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&JobRequest { qasm: &qasm, shots })
            .send()
            .await
            .map_err(|e| HalError::Network {
                backend: self.name().to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HalError::Execution(format!(
                "service returned {status}: {body}"
            )));
        }

        let job: JobResponse = response.json().await.map_err(|e| HalError::Network {
            backend: self.name().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Counts::from(job.counts))
    }
}
