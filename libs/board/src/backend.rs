//! The reservation backend seen from the board.

use async_trait::async_trait;
use booth_domain::wire::{CreateReservationRequest, SlotRecord};
use booth_domain::{ReservationId, Selection};

use crate::error::BackendError;

/// Remote reservation store.
///
/// Implemented over HTTP by the CLI and by in-memory fakes in tests. Every
/// call resolves to a `Result`; transport failures and timeouts are
/// `BackendError::Network`.
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    /// Occupied slots of one (date, booth, round).
    async fn fetch_slots(&self, selection: &Selection) -> Result<Vec<SlotRecord>, BackendError>;

    /// Creates a reservation and returns the server-assigned id.
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<ReservationId, BackendError>;

    /// Deletes a reservation by id.
    async fn delete_reservation(&self, reservation_id: ReservationId)
        -> Result<(), BackendError>;
}
