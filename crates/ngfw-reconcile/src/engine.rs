//! Reconciliation orchestrator.
//!
//! One generic engine drives every object kind; the kinds differ only in
//! their mapper, identity arity, and update verb split, so those live
//! behind the [`ObjectKind`] trait and the lifecycle sequencing is written
//! once.
//!
//! Lifecycle per pass: `Absent → Creating → Present → Updating → Present →
//! Deleting → Absent`. A pass is one synchronous sequence of awaited remote
//! calls; the engine performs no retries, no backoff, and holds no locks —
//! the surrounding framework guarantees at most one in-flight pass per
//! declared object.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use thiserror::Error;

use ngfw_api::error::{ApiError, ApiResult};
use ngfw_api::types::ConfigPhase;

use crate::id::IdFormatError;
use crate::state::DeclaredState;

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors surfaced by a reconciliation pass.
///
/// Not-found conditions on read and delete never appear here; the engine
/// recovers them locally by clearing the tracked identifier.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A persisted composite id failed to decode. Fatal: the id is
    /// corrupted or came from a foreign origin.
    #[error("invalid identifier: {0}")]
    IdFormat(#[from] IdFormatError),

    /// A remote call failed. Surfaced unmodified; when an update sequence
    /// fails mid-way, earlier calls are not rolled back and the next
    /// pass's read reconverges on the true remote state.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Kind-specific pieces the generic engine is parameterized over.
///
/// Implementations are stateless marker types; every method takes the
/// remote client and declared record explicitly.
#[async_trait]
pub trait ObjectKind {
    /// Kind label used in logs.
    const KIND: &'static str;

    /// The remote client trait object for this kind.
    type Client: ?Sized + Sync;
    /// The declared-state record for this kind.
    type Declared: DeclaredState + Send + Sync;
    /// The identity tuple; its `Display` form is the composite id.
    type Identity: fmt::Display + Send + Sync;

    /// Build the identity from declared fields (and client-scoped context
    /// such as the region). Used by data-source reads, which have no id yet.
    fn declared_identity(client: &Self::Client, declared: &Self::Declared) -> Self::Identity;

    /// Decode a persisted composite id.
    fn decode_id(id: &str) -> Result<Self::Identity, IdFormatError>;

    /// Create the remote object from declared state and return the identity
    /// as the server reports it — server-assigned components (for firewalls,
    /// the resolved account id) must come from the response, not from the
    /// declared values.
    async fn create(client: &Self::Client, declared: &Self::Declared) -> ApiResult<Self::Identity>;

    /// Read the remote object and project it into declared state.
    ///
    /// Returns a not-found error both when the object is absent and when
    /// the selected phase has no content.
    async fn refresh(
        client: &Self::Client,
        identity: &Self::Identity,
        phase: ConfigPhase,
        declared: &mut Self::Declared,
    ) -> ApiResult<()>;

    /// Push declared changes to the remote object, one call per
    /// independently-updatable field group. `prior` is the last known
    /// declared snapshot, used to gate collection-mutation calls.
    async fn push_changes(
        client: &Self::Client,
        declared: &Self::Declared,
        prior: &Self::Declared,
    ) -> ApiResult<()>;

    /// Delete the remote object.
    async fn remove(client: &Self::Client, identity: &Self::Identity) -> ApiResult<()>;
}

/// Generic reconciliation engine for one object kind.
pub struct Reconciler<K: ObjectKind> {
    _kind: PhantomData<K>,
}

impl<K: ObjectKind> Reconciler<K> {
    /// Create the remote object, record its composite id, then immediately
    /// read it back so computed fields land in declared state.
    ///
    /// On failure the id slot stays unset, so a retry re-attempts create
    /// rather than update.
    pub async fn create(client: &K::Client, declared: &mut K::Declared) -> ReconcileResult<()> {
        let identity = K::create(client, declared).await?;
        declared.set_id(identity.to_string());

        tracing::info!(kind = K::KIND, id = %identity, "created object");

        Self::read(client, declared).await
    }

    /// Refresh declared state from the remote object.
    ///
    /// Resource reads pin to the candidate phase: mutation always targets
    /// the editable configuration. Absence is not an error here — the id
    /// is cleared and the pass succeeds, dropping the object from
    /// desired-state tracking.
    pub async fn read(client: &K::Client, declared: &mut K::Declared) -> ReconcileResult<()> {
        let identity = K::decode_id(declared.id())?;
        Self::refresh_tolerant(client, &identity, ConfigPhase::Candidate, declared).await
    }

    /// Refresh declared state for a data-source read.
    ///
    /// The identity comes from declared fields instead of a persisted id,
    /// and the requested phase is honored. On success the id is derived
    /// from the refreshed record, so server-assigned identity components
    /// are captured.
    pub async fn read_data_source(
        client: &K::Client,
        declared: &mut K::Declared,
        phase: ConfigPhase,
    ) -> ReconcileResult<()> {
        let identity = K::declared_identity(client, declared);

        tracing::info!(kind = K::KIND, id = %identity, phase = %phase, "data source read");

        match K::refresh(client, &identity, phase, declared).await {
            Ok(()) => {
                let confirmed = K::declared_identity(client, declared);
                declared.set_id(confirmed.to_string());
                declared.set_phase(phase);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                declared.clear_id();
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Push declared changes, then read back to resync.
    ///
    /// The kind issues one remote call per changed field group; if a later
    /// call fails after an earlier one succeeded, the error is surfaced
    /// with no rollback and the next pass's read reconverges.
    pub async fn update(
        client: &K::Client,
        declared: &mut K::Declared,
        prior: &K::Declared,
    ) -> ReconcileResult<()> {
        K::push_changes(client, declared, prior).await?;
        Self::read(client, declared).await
    }

    /// Delete the remote object and clear the tracked id.
    ///
    /// An already-absent object is success.
    pub async fn delete(client: &K::Client, declared: &mut K::Declared) -> ReconcileResult<()> {
        let identity = K::decode_id(declared.id())?;

        tracing::info!(kind = K::KIND, id = %identity, "delete object");

        match K::remove(client, &identity).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }
        declared.clear_id();
        Ok(())
    }

    async fn refresh_tolerant(
        client: &K::Client,
        identity: &K::Identity,
        phase: ConfigPhase,
        declared: &mut K::Declared,
    ) -> ReconcileResult<()> {
        match K::refresh(client, identity, phase, declared).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::info!(kind = K::KIND, id = %identity, "object gone, dropping from tracking");
                declared.clear_id();
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
