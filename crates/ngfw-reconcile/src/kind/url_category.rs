//! Custom URL category reconciliation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ngfw_api::error::{ApiError, ApiResult};
use ngfw_api::types::ConfigPhase;
use ngfw_api::url_category::{UrlCategoryClient, UrlCategoryInfo};

use crate::convert::{set_to_vec, vec_to_set};
use crate::engine::ObjectKind;
use crate::id::{IdFormatError, UrlCategoryId};
use crate::phase::select_phase;
use crate::state::DeclaredState;

/// Declared state for one custom URL category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlCategoryState {
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
    /// Declared as a set; order never matters to the API.
    #[serde(default)]
    pub url_list: BTreeSet<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub audit_comment: String,
    /// Read-only echo of the server's concurrency token.
    #[serde(default)]
    pub update_token: String,
}

impl DeclaredState for UrlCategoryState {
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
pub fn load(state: &UrlCategoryState) -> UrlCategoryInfo {
    UrlCategoryInfo {
        rulestack: state.rulestack.clone(),
        name: state.name.clone(),
        description: state.description.clone(),
        url_list: set_to_vec(&state.url_list),
        action: state.action.clone(),
        audit_comment: state.audit_comment.clone(),
        update_token: state.update_token.clone(),
    }
}

/// Project a remote record into declared fields.
pub fn save(state: &mut UrlCategoryState, rulestack: &str, name: &str, info: &UrlCategoryInfo) {
    state.rulestack = rulestack.to_string();
    state.name = name.to_string();
    state.description = info.description.clone();
    state.url_list = vec_to_set(&info.url_list);
    state.action = info.action.clone();
    state.audit_comment = info.audit_comment.clone();
    state.update_token = info.update_token.clone();
}

/// Marker type wiring URL categories into the generic engine.
pub struct UrlCategory;

#[async_trait]
impl ObjectKind for UrlCategory {
    const KIND: &'static str = "url_category";

    type Client = dyn UrlCategoryClient;
    type Declared = UrlCategoryState;
    type Identity = UrlCategoryId;

    fn declared_identity(_client: &Self::Client, declared: &UrlCategoryState) -> UrlCategoryId {
        UrlCategoryId::new(&declared.rulestack, &declared.name)
    }

    fn decode_id(id: &str) -> Result<UrlCategoryId, IdFormatError> {
        id.parse()
    }

    async fn create(
        client: &Self::Client,
        declared: &UrlCategoryState,
    ) -> ApiResult<UrlCategoryId> {
        let info = load(declared);

        tracing::info!(rulestack = %info.rulestack, name = %info.name, "create url category");

        client.create(&info).await?;
        Ok(UrlCategoryId::new(&info.rulestack, &info.name))
    }

    async fn refresh(
        client: &Self::Client,
        identity: &UrlCategoryId,
        phase: ConfigPhase,
        declared: &mut UrlCategoryState,
    ) -> ApiResult<()> {
        tracing::info!(rulestack = %identity.rulestack, name = %identity.name, "read url category");

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
        declared: &UrlCategoryState,
        _prior: &UrlCategoryState,
    ) -> ApiResult<()> {
        let info = load(declared);

        tracing::info!(rulestack = %info.rulestack, name = %info.name, "update url category");

        client.update(&info).await
    }

    async fn remove(client: &Self::Client, identity: &UrlCategoryId) -> ApiResult<()> {
        tracing::info!(rulestack = %identity.rulestack, name = %identity.name, "delete url category");

        client.delete(&identity.rulestack, &identity.name).await
    }
}
