//! Firewall records and client seam.
//!
//! Firewalls key on (account id, name) within a region, not on name alone.
//! Unlike rulestack-scoped objects they have no candidate/running split,
//! but their update surface is split into one verb per field group.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::types::Tag;

/// One attachment point of a firewall to a VPC subnet.
///
/// `subnet_id` is the natural key; the API never carries two mappings with
/// the same subnet id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubnetMapping {
    pub subnet_id: String,
    #[serde(default)]
    pub availability_zone: String,
}

impl SubnetMapping {
    /// Create a mapping keyed on subnet id alone.
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            availability_zone: String::new(),
        }
    }

    /// Set the availability zone label.
    #[must_use]
    pub fn with_availability_zone(mut self, az: impl Into<String>) -> Self {
        self.availability_zone = az.into();
        self
    }
}

/// The firewall payload for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallInfo {
    /// Object name, immutable after creation.
    pub name: String,
    pub vpc_id: String,
    /// Owning account. May be empty on create; the server resolves and
    /// returns the real value.
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoint_mode: String,
    /// Server-assigned service name for endpoint attachments; read-only.
    #[serde(default)]
    pub endpoint_service_name: String,
    #[serde(default)]
    pub subnet_mappings: Vec<SubnetMapping>,
    /// App-ID content version. Empty means server-chosen.
    #[serde(default)]
    pub app_id_version: String,
    #[serde(default)]
    pub automatic_upgrade_app_id_version: bool,
    /// Local rulestack association.
    #[serde(default)]
    pub rulestack: String,
    /// Global rulestack association.
    #[serde(default)]
    pub global_rulestack: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Server token echoed for optimistic concurrency; read-only.
    #[serde(default)]
    pub update_token: String,
}

/// One endpoint attachment reported in the firewall status block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub endpoint_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rejected_reason: String,
    #[serde(default)]
    pub subnet_id: String,
}

/// Computed status of a firewall, returned on read when available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallStatus {
    #[serde(default)]
    pub firewall_status: String,
    #[serde(default)]
    pub failure_reason: String,
    #[serde(default)]
    pub rulestack_status: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Read (and create) response for a firewall.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirewallReadResponse {
    pub firewall: FirewallInfo,
    pub status: Option<FirewallStatus>,
}

/// Remote operations on firewall objects.
///
/// The API exposes no combined update verb; each field group has its own
/// call, and subnet mappings mutate only through associate/disassociate
/// lists (there is no in-place update for an attachment).
#[async_trait]
pub trait FirewallClient: Send + Sync {
    /// Region this client is bound to. A component of firewall composite
    /// identifiers, since firewall names are only unique per account and
    /// region.
    fn region(&self) -> &str;

    /// Create the firewall. The response carries server-assigned identity
    /// fields, notably the resolved account id.
    async fn create(&self, firewall: &FirewallInfo) -> ApiResult<FirewallReadResponse>;

    /// Read the firewall.
    async fn read(&self, name: &str, account_id: &str) -> ApiResult<FirewallReadResponse>;

    /// Update the description field.
    async fn update_description(&self, firewall: &FirewallInfo) -> ApiResult<()>;

    /// Update the App-ID content version fields.
    async fn update_content_version(&self, firewall: &FirewallInfo) -> ApiResult<()>;

    /// Associate and disassociate subnet attachments.
    async fn update_subnet_mappings(
        &self,
        firewall: &FirewallInfo,
        associate: &[SubnetMapping],
        disassociate: &[SubnetMapping],
    ) -> ApiResult<()>;

    /// Delete the firewall.
    async fn delete(&self, name: &str, account_id: &str) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_mapping_builder() {
        let mapping = SubnetMapping::new("subnet-a").with_availability_zone("us-east-1a");
        assert_eq!(mapping.subnet_id, "subnet-a");
        assert_eq!(mapping.availability_zone, "us-east-1a");
    }

    #[test]
    fn test_firewall_info_empty_collections_serialize() {
        let info = FirewallInfo {
            name: "fw1".into(),
            vpc_id: "vpc-1".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert!(json["subnet_mappings"].as_array().unwrap().is_empty());
        assert!(json["tags"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_read_response_status_optional() {
        let res = FirewallReadResponse::default();
        assert!(res.status.is_none());
    }
}
