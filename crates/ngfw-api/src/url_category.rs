//! Custom URL category records and client seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::types::ConfigPhase;

/// The custom URL category payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlCategoryInfo {
    /// Parent rulestack name.
    pub rulestack: String,
    /// Object name, immutable after creation.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// URLs covered by this category. The API treats this as a set; order
    /// is not significant.
    #[serde(default)]
    pub url_list: Vec<String>,
    /// One of: none, alert, allow, block, continue, override. Enforced by
    /// the upstream validation layer.
    #[serde(default)]
    pub action: String,
    /// Free-text annotation accepted on write.
    #[serde(default)]
    pub audit_comment: String,
    /// Server token echoed for optimistic concurrency; read-only.
    #[serde(default)]
    pub update_token: String,
}

/// Read response carrying both configuration phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlCategoryReadResponse {
    pub rulestack: String,
    pub name: String,
    pub candidate: Option<UrlCategoryInfo>,
    pub running: Option<UrlCategoryInfo>,
}

/// Remote operations on custom URL category objects.
#[async_trait]
pub trait UrlCategoryClient: Send + Sync {
    /// Create the category in the candidate configuration.
    async fn create(&self, category: &UrlCategoryInfo) -> ApiResult<()>;

    /// Read the category, requesting the given phase.
    async fn read(
        &self,
        rulestack: &str,
        name: &str,
        phase: ConfigPhase,
    ) -> ApiResult<UrlCategoryReadResponse>;

    /// Replace the category payload wholesale, including the full URL list.
    async fn update(&self, category: &UrlCategoryInfo) -> ApiResult<()>;

    /// Delete the category.
    async fn delete(&self, rulestack: &str, name: &str) -> ApiResult<()>;
}
