//! Per-kind declared records, mappers, and engine wiring.
//!
//! Each module carries the declared-state record for one object kind, the
//! pure `load`/`save` mapping pair between that record and the remote
//! payload, and the [`ObjectKind`](crate::engine::ObjectKind) impl the
//! generic engine drives.

pub mod certificate;
pub mod firewall;
pub mod rulestack;
pub mod url_category;
