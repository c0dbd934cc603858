//! Certificate object records and client seam.
//!
//! Certificates live inside a rulestack; the remote lookup key is the
//! (rulestack, name) pair.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::types::ConfigPhase;

/// The certificate payload as the API accepts and returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Parent rulestack name.
    pub rulestack: String,
    /// Object name, immutable after creation.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// ARN of the certificate signer. Mutually exclusive with `self_signed`;
    /// the upstream validation layer enforces that.
    #[serde(default)]
    pub signer_arn: String,
    #[serde(default)]
    pub self_signed: bool,
    /// Free-text annotation accepted on write.
    #[serde(default)]
    pub audit_comment: String,
    /// Server token echoed for optimistic concurrency; read-only.
    #[serde(default)]
    pub update_token: String,
}

/// Read response carrying both configuration phases.
///
/// Either sub-record may be absent: a certificate that was created but never
/// committed has no `running` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateReadResponse {
    pub rulestack: String,
    pub name: String,
    pub candidate: Option<CertificateInfo>,
    pub running: Option<CertificateInfo>,
}

/// Remote operations on certificate objects.
///
/// All methods signal an absent object with a not-found error, distinct
/// from transport failures (see [`crate::error::ApiError::is_not_found`]).
#[async_trait]
pub trait CertificateClient: Send + Sync {
    /// Create the certificate in the candidate configuration.
    async fn create(&self, certificate: &CertificateInfo) -> ApiResult<()>;

    /// Read the certificate, requesting the given phase.
    async fn read(
        &self,
        rulestack: &str,
        name: &str,
        phase: ConfigPhase,
    ) -> ApiResult<CertificateReadResponse>;

    /// Replace the certificate payload wholesale.
    async fn update(&self, certificate: &CertificateInfo) -> ApiResult<()>;

    /// Delete the certificate.
    async fn delete(&self, rulestack: &str, name: &str) -> ApiResult<()>;
}
