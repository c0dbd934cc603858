//! # NGFW management API object model
//!
//! Typed records and client traits for the cloud NGFW management API. The
//! API exposes a two-phase configuration model: every rulestack-scoped
//! object has a mutable *candidate* entry and, once committed, a deployed
//! *running* entry.
//!
//! This crate is the seam between the reconciliation engine and whatever
//! transport implements the calls; it carries no HTTP, auth, or retry logic
//! of its own.
//!
//! ## Crate Organization
//!
//! - [`error`] - Error types with not-found/transport classification
//! - [`types`] - [`ConfigPhase`](types::ConfigPhase) and the tag wire pair
//! - [`config`] - Endpoint and timeout settings
//! - [`certificate`], [`url_category`], [`rulestack`], [`firewall`] -
//!   per-kind records and `#[async_trait]` client traits

pub mod certificate;
pub mod config;
pub mod error;
pub mod firewall;
pub mod rulestack;
pub mod types;
pub mod url_category;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::certificate::{CertificateClient, CertificateInfo, CertificateReadResponse};
    pub use crate::config::ApiConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::firewall::{
        Attachment, FirewallClient, FirewallInfo, FirewallReadResponse, FirewallStatus,
        SubnetMapping,
    };
    pub use crate::rulestack::{
        ProfileConfig, RulestackClient, RulestackDetails, RulestackInfo, RulestackReadResponse,
    };
    pub use crate::types::{ConfigPhase, Tag};
    pub use crate::url_category::{UrlCategoryClient, UrlCategoryInfo, UrlCategoryReadResponse};
}

// Re-export async_trait for client implementors
pub use async_trait::async_trait;
