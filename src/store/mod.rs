//! store — the paginated roster store (single authoritative facade).
//!
//! Split by concern:
//! - core.rs   — RosterStore/Snapshot, open(), state access, subscriptions, page refresh
//! - view.rs   — view mode and pagination operations
//! - mutate.rs — add/remove/remove-many/update (whole-table read-modify-write)
//! - query.rs  — total pages, full-table reads, lookups, selected-employee slot
//!
//! Every public operation ends with exactly one notification to subscribers and
//! never leaves a partially updated snapshot behind: new state is computed and
//! persisted first, then assigned in one step.

pub mod core;
pub mod mutate;
pub mod query;
pub mod view;

pub use self::core::{RosterStore, Snapshot};
