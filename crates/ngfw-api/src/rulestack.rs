//! Rulestack records and client seam.
//!
//! Rulestacks are the parent container for certificates, URL categories and
//! rules. They key on name alone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::types::{ConfigPhase, Tag};

/// Security profile settings attached to a rulestack.
///
/// Carried as a single-element block on the declared side and a flat
/// sub-structure on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub anti_spyware: String,
    #[serde(default)]
    pub anti_virus: String,
    #[serde(default)]
    pub vulnerability: String,
    #[serde(default)]
    pub url_filtering: String,
    #[serde(default)]
    pub file_blocking: String,
    #[serde(default)]
    pub outbound_trust_certificate: String,
    #[serde(default)]
    pub outbound_untrust_certificate: String,
}

/// Phase-specific portion of a rulestack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulestackDetails {
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
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// The rulestack payload for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulestackInfo {
    /// Object name, immutable after creation.
    pub name: String,
    pub entry: RulestackDetails,
}

/// Read response carrying both configuration phases plus the commit state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulestackReadResponse {
    pub name: String,
    /// Commit state of the rulestack (e.g. "Uncommitted").
    #[serde(default)]
    pub state: String,
    pub candidate: Option<RulestackDetails>,
    pub running: Option<RulestackDetails>,
}

/// Remote operations on rulestack objects.
#[async_trait]
pub trait RulestackClient: Send + Sync {
    /// Create the rulestack.
    async fn create(&self, rulestack: &RulestackInfo) -> ApiResult<()>;

    /// Read the rulestack, requesting the given phase.
    async fn read(&self, name: &str, phase: ConfigPhase) -> ApiResult<RulestackReadResponse>;

    /// Replace the rulestack payload wholesale.
    async fn update(&self, rulestack: &RulestackInfo) -> ApiResult<()>;

    /// Delete the rulestack.
    async fn delete(&self, name: &str) -> ApiResult<()>;
}
