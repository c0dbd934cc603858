//! Firewall reconciliation.
//!
//! Firewalls differ from the rulestack-scoped kinds in three ways: the
//! identity keys on (account, region, name), reads have no phase split,
//! and updates go out as one remote call per field group with subnet
//! attachments expressed as an associate/disassociate delta.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ngfw_api::error::ApiResult;
use ngfw_api::firewall::{
    FirewallClient, FirewallInfo, FirewallReadResponse, FirewallStatus, SubnetMapping,
};
use ngfw_api::types::ConfigPhase;

use crate::convert::{tags_from_map, tags_into_map};
use crate::diff::diff_by_key;
use crate::engine::ObjectKind;
use crate::id::{FirewallId, IdFormatError};
use crate::state::DeclaredState;

/// Declared state for one firewall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallState {
    /// Composite id, `<account_id>:<region>:<name>`; empty when untracked.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub vpc_id: String,
    /// May be declared empty; the server resolves the owning account and
    /// the resolved value is captured on create and read.
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoint_mode: String,
    /// Server-assigned; read-only.
    #[serde(default)]
    pub endpoint_service_name: String,
    /// Subnet attachments, keyed by subnet id.
    #[serde(default)]
    pub subnet_mapping: Vec<SubnetMapping>,
    #[serde(default)]
    pub app_id_version: String,
    #[serde(default)]
    pub automatic_upgrade_app_id_version: bool,
    #[serde(default)]
    pub rulestack: String,
    #[serde(default)]
    pub global_rulestack: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Read-only echo of the server's concurrency token.
    #[serde(default)]
    pub update_token: String,
    /// Computed status, carried as a single-element block when the server
    /// reports one.
    #[serde(default)]
    pub status: Vec<FirewallStatus>,
}

impl DeclaredState for FirewallState {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Build the remote payload from declared fields.
pub fn load(state: &FirewallState) -> FirewallInfo {
    FirewallInfo {
        name: state.name.clone(),
        vpc_id: state.vpc_id.clone(),
        account_id: state.account_id.clone(),
        description: state.description.clone(),
        endpoint_mode: state.endpoint_mode.clone(),
        endpoint_service_name: state.endpoint_service_name.clone(),
        subnet_mappings: state.subnet_mapping.clone(),
        app_id_version: state.app_id_version.clone(),
        automatic_upgrade_app_id_version: state.automatic_upgrade_app_id_version,
        rulestack: state.rulestack.clone(),
        global_rulestack: state.global_rulestack.clone(),
        tags: tags_from_map(&state.tags),
        update_token: state.update_token.clone(),
    }
}

/// Project a read response into declared fields.
///
/// Collections are always written, empty when the remote omitted them. The
/// status block is only rewritten when the server reported one.
pub fn save(state: &mut FirewallState, name: &str, res: &FirewallReadResponse) {
    let fw = &res.firewall;
    state.name = name.to_string();
    state.vpc_id = fw.vpc_id.clone();
    state.account_id = fw.account_id.clone();
    state.description = fw.description.clone();
    state.endpoint_mode = fw.endpoint_mode.clone();
    state.endpoint_service_name = fw.endpoint_service_name.clone();
    state.subnet_mapping = fw.subnet_mappings.clone();
    state.app_id_version = fw.app_id_version.clone();
    state.automatic_upgrade_app_id_version = fw.automatic_upgrade_app_id_version;
    state.rulestack = fw.rulestack.clone();
    state.global_rulestack = fw.global_rulestack.clone();
    state.tags = tags_into_map(&fw.tags);
    state.update_token = fw.update_token.clone();
    if let Some(status) = &res.status {
        state.status = vec![status.clone()];
    }
}

/// Marker type wiring firewalls into the generic engine.
pub struct Firewall;

#[async_trait]
impl ObjectKind for Firewall {
    const KIND: &'static str = "firewall";

    type Client = dyn FirewallClient;
    type Declared = FirewallState;
    type Identity = FirewallId;

    fn declared_identity(client: &Self::Client, declared: &FirewallState) -> FirewallId {
        FirewallId::new(&declared.account_id, client.region(), &declared.name)
    }

    fn decode_id(id: &str) -> Result<FirewallId, IdFormatError> {
        id.parse()
    }

    async fn create(client: &Self::Client, declared: &FirewallState) -> ApiResult<FirewallId> {
        let info = load(declared);

        tracing::info!(name = %info.name, vpc_id = %info.vpc_id, "create firewall");

        // The server resolves the owning account; the identity must carry
        // the resolved value, not the (possibly empty) declared one.
        let res = client.create(&info).await?;
        Ok(FirewallId::new(
            &res.firewall.account_id,
            client.region(),
            &res.firewall.name,
        ))
    }

    async fn refresh(
        client: &Self::Client,
        identity: &FirewallId,
        _phase: ConfigPhase,
        declared: &mut FirewallState,
    ) -> ApiResult<()> {
        // Firewalls have no candidate/running split; the phase selector
        // does not apply to this kind.
        tracing::info!(name = %identity.name, "read firewall");

        let res = client.read(&identity.name, &identity.account_id).await?;
        save(declared, &identity.name, &res);
        Ok(())
    }

    async fn push_changes(
        client: &Self::Client,
        declared: &FirewallState,
        prior: &FirewallState,
    ) -> ApiResult<()> {
        let info = load(declared);

        tracing::info!(name = %info.name, "update firewall");

        if declared.description != prior.description {
            client.update_description(&info).await?;
        }

        if declared.app_id_version != prior.app_id_version && !declared.app_id_version.is_empty() {
            client.update_content_version(&info).await?;
        }

        if declared.subnet_mapping != prior.subnet_mapping {
            let delta = diff_by_key(&prior.subnet_mapping, &declared.subnet_mapping, |m| {
                m.subnet_id.clone()
            });

            tracing::debug!(
                name = %info.name,
                associate = delta.to_add.len(),
                disassociate = delta.to_remove.len(),
                "subnet mapping delta"
            );

            client
                .update_subnet_mappings(&info, &delta.to_add, &delta.to_remove)
                .await?;
        }

        Ok(())
    }

    async fn remove(client: &Self::Client, identity: &FirewallId) -> ApiResult<()> {
        tracing::info!(name = %identity.name, "delete firewall");

        client.delete(&identity.name, &identity.account_id).await
    }
}
