//! # booth-domain
//!
//! The fixed domain of the booth reservation event and the wire types of the
//! reservation backend.
//!
//! ## Domain
//!
//! The event runs on two days, with five booths, six rounds per booth and
//! twelve seats per round. None of these are configurable: every value is an
//! enum or a range-checked newtype with a canonical string form.
//!
//! - [`ReservationDate`]: `2025-11-22` or `2025-11-23`
//! - [`BoothType`]: `AIR_ROCKET`, `NURIHO_3D`, ... with a Korean display name
//! - [`Round`]: `1..=6`, each with a fixed time window label
//! - [`SlotNo`]: `1..=12`
//! - [`ReservationId`]: server-issued, always positive
//!
//! A [`Selection`] is the (date, booth, round) triple the admin board is
//! keyed on.

mod error;
mod macros;
mod types;
pub mod wire;

pub use error::DomainError;
pub use types::*;

/// Seats per (date, booth, round).
pub const MAX_PARTICIPANTS: usize = 12;
