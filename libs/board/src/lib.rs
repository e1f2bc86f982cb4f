//! Slot board reconciliation.
//!
//! This library holds the admin view state for one (date, booth, round)
//! selection and keeps it consistent with the backend. Key concepts:
//!
//! - **Board**: twelve slot entries, index `i` holding slot number `i + 1`.
//! - **Build**: merging a fetched snapshot into an all-empty template.
//! - **Optimistic patch**: a create or delete is reflected on the board
//!   before the backend answers; the pre-patch entry is kept so a failure
//!   rolls back with a plain assignment.
//! - **Generation**: every selection change bumps a counter; results tagged
//!   with an older generation are never applied.
//!
//! # Invariants
//!
//! - A slot that is not confirmed is logically empty, whatever draft text it
//!   holds.
//! - Pending and confirmed slots are not editable.
//! - Build is idempotent and never writes outside the twelve positions.

mod backend;
mod board;
mod capacity;
mod error;
mod session;
mod store;

pub use backend::ReservationBackend;
pub use board::{DraftField, PendingCreate, PendingDelete, SlotBoard, SlotEntry, SlotState};
pub use capacity::{CapacityCell, CapacityGrid, CapacityRow};
pub use error::{BackendError, BoardError, ValidationError};
pub use session::{AdminSession, DeleteOutcome};
pub use store::{BoardStore, FetchTicket, InFlight};
