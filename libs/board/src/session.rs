//! Admin session: the board store driven against a backend.

use booth_domain::{ReservationId, Selection};
use tracing::{info, warn};

use crate::backend::ReservationBackend;
use crate::board::{DraftField, SlotBoard, SlotEntry};
use crate::error::BoardError;
use crate::store::{BoardStore, FetchTicket};

/// Result of a delete that passed its precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend removed the reservation.
    Deleted(ReservationId),

    /// The confirmation was declined; nothing was sent.
    Declined,
}

/// Admin view state bound to one backend.
pub struct AdminSession<B> {
    backend: B,
    store: BoardStore,
}

impl<B: ReservationBackend> AdminSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: BoardStore::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Board of the active selection, if any.
    pub fn board(&self) -> Option<&SlotBoard> {
        self.store.board()
    }

    /// Switches selection and loads its board.
    ///
    /// On a fetch failure the empty board stays active and the error is
    /// returned so the caller can show it next to the (empty) board.
    pub async fn select(&mut self, selection: Selection) -> Result<&SlotBoard, BoardError> {
        let ticket = self.store.select(selection);
        self.load(ticket).await
    }

    /// Re-fetches the active selection, discarding drafts.
    pub async fn refresh(&mut self) -> Result<&SlotBoard, BoardError> {
        let ticket = self.store.current_ticket().ok_or(BoardError::NoSelection)?;
        self.load(ticket).await
    }

    async fn load(&mut self, ticket: FetchTicket) -> Result<&SlotBoard, BoardError> {
        let selection = ticket.selection();
        match self.backend.fetch_slots(&selection).await {
            Ok(records) => {
                info!(%selection, fetched = records.len(), "board loaded");
                self.store.apply_fetch(ticket, &records)
            }
            Err(err) => {
                warn!(%selection, error = %err, "failed to load board");
                Err(err.into())
            }
        }
    }

    pub fn edit_draft(
        &mut self,
        index: usize,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), BoardError> {
        self.store.board_mut()?.edit_draft(index, field, value)
    }

    /// Creates a reservation from the draft at `index`.
    ///
    /// The slot is pending from validation until the backend answers; a
    /// failure restores the draft.
    pub async fn submit(&mut self, index: usize) -> Result<ReservationId, BoardError> {
        let in_flight = self.store.begin_submit(index)?;
        let request = in_flight.op().request().clone();

        let result = self.backend.create_reservation(&request).await;
        match self.store.finish_submit(in_flight, result) {
            Ok(id) => {
                info!(
                    selection = %request.selection(),
                    slot_no = request.slot_no.get(),
                    reservation_id = id.value(),
                    "reservation created"
                );
                Ok(id)
            }
            Err(err) => {
                warn!(
                    selection = %request.selection(),
                    slot_no = request.slot_no.get(),
                    error = %err,
                    "create failed; slot rolled back"
                );
                Err(err)
            }
        }
    }

    /// Deletes the confirmed reservation at `index` once `confirm` agrees.
    ///
    /// `confirm` sees the entry about to be removed. Unconfirmed slots are
    /// rejected before `confirm` is asked and before any request is sent.
    pub async fn delete<F>(&mut self, index: usize, confirm: F) -> Result<DeleteOutcome, BoardError>
    where
        F: FnOnce(&SlotEntry) -> bool,
    {
        let board = self.store.board().ok_or(BoardError::NoSelection)?;
        let entry = board.entry(index)?;
        if entry.state.reservation_id().is_none() {
            return Err(BoardError::NotConfirmed {
                slot_no: entry.slot_no.get(),
            });
        }
        if !confirm(entry) {
            return Ok(DeleteOutcome::Declined);
        }

        let in_flight = self.store.begin_delete(index)?;
        let reservation_id = in_flight.op().reservation_id();
        let slot_no = in_flight.op().previous().slot_no.get();

        let result = self.backend.delete_reservation(reservation_id).await;
        match self.store.finish_delete(in_flight, result) {
            Ok(()) => {
                info!(
                    slot_no,
                    reservation_id = reservation_id.value(),
                    "reservation deleted"
                );
                Ok(DeleteOutcome::Deleted(reservation_id))
            }
            Err(err) => {
                warn!(
                    slot_no,
                    reservation_id = reservation_id.value(),
                    error = %err,
                    "delete failed; slot restored"
                );
                Err(err)
            }
        }
    }
}
