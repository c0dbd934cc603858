//! Configuration-phase resolution.
//!
//! A read response carries up to two parallel sub-records, one per phase.
//! Exactly one is projected into declared state. A selected-but-absent
//! sub-record means the object has no content in that phase (created but
//! never committed, for example) and is treated as not-found by the caller,
//! even though the outer read succeeded.

use ngfw_api::types::ConfigPhase;

/// Select the sub-record for the requested phase.
///
/// `Unspecified` selects the candidate entry: mutation always targets the
/// editable phase, and resource flows pin to it outright.
pub fn select_phase<'a, T>(
    phase: ConfigPhase,
    candidate: Option<&'a T>,
    running: Option<&'a T>,
) -> Option<&'a T> {
    match phase {
        ConfigPhase::Running => running,
        ConfigPhase::Candidate | ConfigPhase::Unspecified => candidate,
    }
}
