//! # NGFW declared-state reconciliation engine
//!
//! Reconciles declared desired state for NGFW objects (certificates, URL
//! categories, rulestacks, firewalls) against the management API's
//! two-phase configuration model.
//!
//! The engine is deliberately thin: it resolves which configuration phase
//! to read, maps between flat declared records and the remote object
//! model, computes minimal add/remove deltas for collection-valued fields,
//! and derives the composite identifiers that tie a declared object to its
//! remote counterpart. Everything stateful — change scheduling, transport,
//! retries, validation — belongs to external collaborators.
//!
//! ## Crate Organization
//!
//! - [`id`] - Composite identifier codec (leaf, no dependencies)
//! - [`phase`] - Candidate/running sub-record selection
//! - [`diff`] - Keyed set-difference for collection updates
//! - [`convert`] - Declared-shape ↔ wire-shape container helpers
//! - [`state`] - The declared identifier slot
//! - [`engine`] - Generic lifecycle orchestrator, [`Reconciler`](engine::Reconciler)
//! - [`kind`] - Per-kind records, mappers, and engine wiring
//!
//! ## Example
//!
//! ```ignore
//! use ngfw_reconcile::prelude::*;
//!
//! let mut declared = CertificateState {
//!     rulestack: "stack1".into(),
//!     name: "cert1".into(),
//!     self_signed: true,
//!     ..Default::default()
//! };
//!
//! // client: &dyn CertificateClient from the transport layer
//! Reconciler::<Certificate>::create(client, &mut declared).await?;
//! assert_eq!(declared.id, "stack1:cert1");
//! ```

pub mod convert;
pub mod diff;
pub mod engine;
pub mod id;
pub mod kind;
pub mod phase;
pub mod state;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::diff::{diff_by_key, Delta};
    pub use crate::engine::{ObjectKind, ReconcileError, ReconcileResult, Reconciler};
    pub use crate::id::{
        CertificateId, FirewallId, IdFormatError, RulestackId, UrlCategoryId, ID_SEPARATOR,
    };
    pub use crate::kind::certificate::{Certificate, CertificateState};
    pub use crate::kind::firewall::{Firewall, FirewallState};
    pub use crate::kind::rulestack::{Rulestack, RulestackState};
    pub use crate::kind::url_category::{UrlCategory, UrlCategoryState};
    pub use crate::phase::select_phase;
    pub use crate::state::DeclaredState;

    pub use ngfw_api::types::ConfigPhase;
}
