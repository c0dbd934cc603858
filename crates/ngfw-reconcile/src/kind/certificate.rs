//! Certificate reconciliation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ngfw_api::certificate::{CertificateClient, CertificateInfo};
use ngfw_api::error::{ApiError, ApiResult};
use ngfw_api::types::ConfigPhase;

use crate::engine::ObjectKind;
use crate::id::{CertificateId, IdFormatError};
use crate::phase::select_phase;
use crate::state::DeclaredState;

/// Declared state for one certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateState {
    /// Composite id, `<rulestack>:<name>`; empty when untracked.
    #[serde(default)]
    pub id: String,
    /// Requested phase; data-source reads only.
    #[serde(default)]
    pub config_type: ConfigPhase,
    pub rulestack: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub signer_arn: String,
    #[serde(default)]
    pub self_signed: bool,
    #[serde(default)]
    pub audit_comment: String,
    /// Read-only echo of the server's concurrency token.
    #[serde(default)]
    pub update_token: String,
}

impl DeclaredState for CertificateState {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_phase(&mut self, phase: ConfigPhase) {
        self.config_type = phase;
    }
}

/// Build the remote payload from declared fields.
pub fn load(state: &CertificateState) -> CertificateInfo {
    CertificateInfo {
        rulestack: state.rulestack.clone(),
        name: state.name.clone(),
        description: state.description.clone(),
        signer_arn: state.signer_arn.clone(),
        self_signed: state.self_signed,
        audit_comment: state.audit_comment.clone(),
        update_token: state.update_token.clone(),
    }
}

/// Project a remote record into declared fields. Identity components come
/// from the request, not the payload.
pub fn save(state: &mut CertificateState, rulestack: &str, name: &str, info: &CertificateInfo) {
    state.rulestack = rulestack.to_string();
    state.name = name.to_string();
    state.description = info.description.clone();
    state.signer_arn = info.signer_arn.clone();
    state.self_signed = info.self_signed;
    state.audit_comment = info.audit_comment.clone();
    state.update_token = info.update_token.clone();
}

/// Marker type wiring certificates into the generic engine.
pub struct Certificate;

#[async_trait]
impl ObjectKind for Certificate {
    const KIND: &'static str = "certificate";

    type Client = dyn CertificateClient;
    type Declared = CertificateState;
    type Identity = CertificateId;

    fn declared_identity(_client: &Self::Client, declared: &CertificateState) -> CertificateId {
        CertificateId::new(&declared.rulestack, &declared.name)
    }

    fn decode_id(id: &str) -> Result<CertificateId, IdFormatError> {
        id.parse()
    }

    async fn create(
        client: &Self::Client,
        declared: &CertificateState,
    ) -> ApiResult<CertificateId> {
        let info = load(declared);

        tracing::info!(rulestack = %info.rulestack, name = %info.name, "create certificate");

        client.create(&info).await?;
        Ok(CertificateId::new(&info.rulestack, &info.name))
    }

    async fn refresh(
        client: &Self::Client,
        identity: &CertificateId,
        phase: ConfigPhase,
        declared: &mut CertificateState,
    ) -> ApiResult<()> {
        tracing::info!(rulestack = %identity.rulestack, name = %identity.name, "read certificate");

        let res = client
            .read(&identity.rulestack, &identity.name, phase)
            .await?;
        let info = select_phase(phase, res.candidate.as_ref(), res.running.as_ref())
            .ok_or_else(|| ApiError::not_found(identity.to_string()))?;

        save(declared, &identity.rulestack, &identity.name, info);
        Ok(())
    }

    async fn push_changes(
        client: &Self::Client,
        declared: &CertificateState,
        _prior: &CertificateState,
    ) -> ApiResult<()> {
        let info = load(declared);

        tracing::info!(rulestack = %info.rulestack, name = %info.name, "update certificate");

        client.update(&info).await
    }

    async fn remove(client: &Self::Client, identity: &CertificateId) -> ApiResult<()> {
        tracing::info!(rulestack = %identity.rulestack, name = %identity.name, "delete certificate");

        client.delete(&identity.rulestack, &identity.name).await
    }
}
