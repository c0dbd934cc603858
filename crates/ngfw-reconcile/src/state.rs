//! Declared-state identifier slot.

use ngfw_api::types::ConfigPhase;

/// Write-through access to the artifacts a declared object persists
/// across passes: its composite identifier and, for two-phase kinds, the
/// phase a data-source read projected.
///
/// The surrounding framework owns the record; the engine only reads the
/// slot, fills it after create, and clears it when the remote object is
/// gone. An empty slot means the object is untracked and the next pass
/// will attempt create rather than update.
pub trait DeclaredState {
    /// The tracked composite id, empty when untracked.
    fn id(&self) -> &str;

    /// Set the tracked composite id.
    fn set_id(&mut self, id: String);

    /// Drop the object from desired-state tracking.
    fn clear_id(&mut self) {
        self.set_id(String::new());
    }

    /// Record the phase a data-source read projected. Kinds without a
    /// candidate/running split ignore this.
    fn set_phase(&mut self, _phase: ConfigPhase) {}
}
