//! Rulestack reconciliation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ngfw_api::error::{ApiError, ApiResult};
use ngfw_api::rulestack::{ProfileConfig, RulestackClient, RulestackDetails, RulestackInfo};
use ngfw_api::types::ConfigPhase;

use crate::convert::{tags_from_map, tags_into_map};
use crate::engine::ObjectKind;
use crate::id::{IdFormatError, RulestackId};
use crate::phase::select_phase;
use crate::state::DeclaredState;

/// Declared state for one rulestack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulestackState {
    /// Composite id; for rulestacks this is the bare name.
    #[serde(default)]
    pub id: String,
    /// Requested phase; data-source reads only.
    #[serde(default)]
    pub config_type: ConfigPhase,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_group: String,
    #[serde(default)]
    pub minimum_app_id_version: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Security profile settings, carried as a single-element block.
    #[serde(default)]
    pub profile_config: Vec<ProfileConfig>,
    /// Commit state reported by the server; read-only.
    #[serde(default)]
    pub state: String,
}

impl DeclaredState for RulestackState {
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

/// Build the remote payload from declared fields, unwrapping the
/// single-element profile block.
pub fn load(state: &RulestackState) -> RulestackInfo {
    RulestackInfo {
        name: state.name.clone(),
        entry: RulestackDetails {
            description: state.description.clone(),
            scope: state.scope.clone(),
            account_id: state.account_id.clone(),
            account_group: state.account_group.clone(),
            minimum_app_id_version: state.minimum_app_id_version.clone(),
            tags: tags_from_map(&state.tags),
            profile: state.profile_config.first().cloned().unwrap_or_default(),
        },
    }
}

/// Project a remote record into declared fields. The profile is always
/// written back as a one-element list and tags as a mapping, empty when
/// the remote omitted them.
pub fn save(state: &mut RulestackState, name: &str, commit_state: &str, details: &RulestackDetails) {
    state.name = name.to_string();
    state.description = details.description.clone();
    state.scope = details.scope.clone();
    state.account_id = details.account_id.clone();
    state.account_group = details.account_group.clone();
    state.minimum_app_id_version = details.minimum_app_id_version.clone();
    state.tags = tags_into_map(&details.tags);
    state.profile_config = vec![details.profile.clone()];
    state.state = commit_state.to_string();
}

/// Marker type wiring rulestacks into the generic engine.
pub struct Rulestack;

#[async_trait]
impl ObjectKind for Rulestack {
    const KIND: &'static str = "rulestack";

    type Client = dyn RulestackClient;
    type Declared = RulestackState;
    type Identity = RulestackId;

    fn declared_identity(_client: &Self::Client, declared: &RulestackState) -> RulestackId {
        RulestackId::new(&declared.name)
    }

    fn decode_id(id: &str) -> Result<RulestackId, IdFormatError> {
        id.parse()
    }

    async fn create(client: &Self::Client, declared: &RulestackState) -> ApiResult<RulestackId> {
        let info = load(declared);

        tracing::info!(name = %info.name, "create rulestack");

        client.create(&info).await?;
        Ok(RulestackId::new(&info.name))
    }

    async fn refresh(
        client: &Self::Client,
        identity: &RulestackId,
        phase: ConfigPhase,
        declared: &mut RulestackState,
    ) -> ApiResult<()> {
        tracing::info!(name = %identity.name, "read rulestack");

        let res = client.read(&identity.name, phase).await?;
        let details = select_phase(phase, res.candidate.as_ref(), res.running.as_ref())
            .ok_or_else(|| ApiError::not_found(identity.to_string()))?;

        save(declared, &res.name, &res.state, details);
        Ok(())
    }

    async fn push_changes(
        client: &Self::Client,
        declared: &RulestackState,
        _prior: &RulestackState,
    ) -> ApiResult<()> {
        let info = load(declared);

        tracing::info!(name = %info.name, "update rulestack");

        client.update(&info).await
    }

    async fn remove(client: &Self::Client, identity: &RulestackId) -> ApiResult<()> {
        tracing::info!(name = %identity.name, "delete rulestack");

        client.delete(&identity.name).await
    }
}
