//! Selection-keyed board store.
//!
//! The store holds the board of the active selection together with a
//! generation counter. Anything asynchronous (a fetch, a create, a delete) is
//! tagged with the generation it started under; when it settles under a
//! different generation its result is not applied.

use booth_domain::wire::SlotRecord;
use booth_domain::{ReservationId, Selection};
use tracing::debug;

use crate::board::{PendingCreate, PendingDelete, SlotBoard};
use crate::error::{BackendError, BoardError};

/// Identifies the selection a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    selection: Selection,
    generation: u64,
}

impl FetchTicket {
    pub fn selection(&self) -> Selection {
        self.selection
    }
}

/// An optimistic mutation tagged with the ticket it was started under.
#[derive(Debug)]
pub struct InFlight<T> {
    ticket: FetchTicket,
    op: T,
}

impl<T> InFlight<T> {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    pub fn op(&self) -> &T {
        &self.op
    }
}

/// Store of the active board.
#[derive(Debug, Default)]
pub struct BoardStore {
    generation: u64,
    active: Option<SlotBoard>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to `selection` with an all-empty board.
    ///
    /// Always starts a new generation, even when re-selecting the same key,
    /// so results of earlier requests are abandoned.
    pub fn select(&mut self, selection: Selection) -> FetchTicket {
        self.generation += 1;
        self.active = Some(SlotBoard::empty(selection));
        debug!(%selection, generation = self.generation, "selection changed");
        FetchTicket {
            selection,
            generation: self.generation,
        }
    }

    /// Ticket of the active selection.
    pub fn current_ticket(&self) -> Option<FetchTicket> {
        self.active.as_ref().map(|board| FetchTicket {
            selection: board.selection(),
            generation: self.generation,
        })
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.current_ticket().as_ref() == Some(ticket)
    }

    pub fn board(&self) -> Option<&SlotBoard> {
        self.active.as_ref()
    }

    /// Mutable access for draft edits.
    pub fn board_mut(&mut self) -> Result<&mut SlotBoard, BoardError> {
        self.active.as_mut().ok_or(BoardError::NoSelection)
    }

    /// Rebuilds the active board from a fetch issued under `ticket`.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        fetched: &[SlotRecord],
    ) -> Result<&SlotBoard, BoardError> {
        if !self.is_current(&ticket) {
            debug!(
                selection = %ticket.selection,
                generation = ticket.generation,
                current = self.generation,
                "discarding fetch for abandoned selection"
            );
            return Err(BoardError::StaleSelection);
        }

        let board = SlotBoard::build(SlotBoard::empty(ticket.selection), fetched);
        Ok(self.active.insert(board))
    }

    pub fn begin_submit(&mut self, index: usize) -> Result<InFlight<PendingCreate>, BoardError> {
        let ticket = self.current_ticket().ok_or(BoardError::NoSelection)?;
        let op = self.board_mut()?.begin_submit(index)?;
        Ok(InFlight { ticket, op })
    }

    /// Settles a create. A result for an abandoned selection leaves the
    /// active board alone but is still reported to the caller.
    pub fn finish_submit(
        &mut self,
        in_flight: InFlight<PendingCreate>,
        result: Result<ReservationId, BackendError>,
    ) -> Result<ReservationId, BoardError> {
        match self.active.as_mut() {
            Some(board) if self.generation == in_flight.ticket.generation => {
                board.finish_submit(in_flight.op, result)
            }
            _ => {
                debug!(
                    selection = %in_flight.ticket.selection,
                    "create settled after selection changed"
                );
                result.map_err(BoardError::from)
            }
        }
    }

    pub fn begin_delete(&mut self, index: usize) -> Result<InFlight<PendingDelete>, BoardError> {
        let ticket = self.current_ticket().ok_or(BoardError::NoSelection)?;
        let op = self.board_mut()?.begin_delete(index)?;
        Ok(InFlight { ticket, op })
    }

    /// Settles a delete, with the same abandoned-selection rule as
    /// [`BoardStore::finish_submit`].
    pub fn finish_delete(
        &mut self,
        in_flight: InFlight<PendingDelete>,
        result: Result<(), BackendError>,
    ) -> Result<(), BoardError> {
        match self.active.as_mut() {
            Some(board) if self.generation == in_flight.ticket.generation => {
                board.finish_delete(in_flight.op, result)
            }
            _ => {
                debug!(
                    selection = %in_flight.ticket.selection,
                    "delete settled after selection changed"
                );
                result.map_err(BoardError::from)
            }
        }
    }
}
