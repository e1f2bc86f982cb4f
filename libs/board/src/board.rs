//! The twelve-slot board for one selection.

use booth_domain::wire::{CreateReservationRequest, SlotRecord};
use booth_domain::{ReservationId, Selection, SlotNo, MAX_PARTICIPANTS};
use serde::Serialize;
use tracing::debug;

use crate::error::{BackendError, BoardError, ValidationError};

/// Reservation state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reservationId", rename_all = "snake_case")]
pub enum SlotState {
    /// No reservation. May hold unsaved draft text.
    Empty,

    /// Create request in flight; the slot is locked.
    Pending,

    /// Server-confirmed reservation.
    Confirmed(ReservationId),
}

impl SlotState {
    /// Returns the confirmed reservation id, if any.
    pub fn reservation_id(&self) -> Option<ReservationId> {
        match self {
            SlotState::Confirmed(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns true if the slot counts against capacity.
    pub fn is_occupied(&self) -> bool {
        !matches!(self, SlotState::Empty)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotState::Empty => "empty",
            SlotState::Pending => "pending",
            SlotState::Confirmed(_) => "confirmed",
        }
    }
}

/// One slot of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub slot_no: SlotNo,
    #[serde(flatten)]
    pub state: SlotState,
    pub name: String,
    pub phone: String,
}

impl SlotEntry {
    pub fn empty(slot_no: SlotNo) -> Self {
        Self {
            slot_no,
            state: SlotState::Empty,
            name: String::new(),
            phone: String::new(),
        }
    }

    /// Only empty slots accept draft edits.
    pub fn is_editable(&self) -> bool {
        matches!(self.state, SlotState::Empty)
    }

    /// Returns true if an empty slot carries unsaved text.
    pub fn has_draft(&self) -> bool {
        self.is_editable() && (!self.name.is_empty() || !self.phone.is_empty())
    }

    fn locked(&self) -> BoardError {
        BoardError::SlotLocked {
            slot_no: self.slot_no.get(),
            state: self.state.label(),
        }
    }
}

/// Editable text field of an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Phone,
}

/// A create that has been applied optimistically and awaits the backend.
///
/// Carries the pre-submit entry so a failure restores it exactly.
#[derive(Debug)]
pub struct PendingCreate {
    index: usize,
    snapshot: SlotEntry,
    request: CreateReservationRequest,
}

impl PendingCreate {
    pub fn request(&self) -> &CreateReservationRequest {
        &self.request
    }
}

/// A delete that has been applied optimistically and awaits the backend.
#[derive(Debug)]
pub struct PendingDelete {
    index: usize,
    reservation_id: ReservationId,
    snapshot: SlotEntry,
}

impl PendingDelete {
    pub fn reservation_id(&self) -> ReservationId {
        self.reservation_id
    }

    /// The entry as it was before the optimistic clear.
    pub fn previous(&self) -> &SlotEntry {
        &self.snapshot
    }
}

/// Board of exactly `MAX_PARTICIPANTS` slot entries for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotBoard {
    selection: Selection,
    entries: Vec<SlotEntry>,
}

impl SlotBoard {
    /// An all-empty board, the template every fetch is merged into.
    pub fn empty(selection: Selection) -> Self {
        let entries = SlotNo::all().map(SlotEntry::empty).collect();
        Self { selection, entries }
    }

    /// Merges fetched slots into `template` by slot number.
    ///
    /// Records without a slot number, or with one outside `1..=12`, are
    /// dropped. A record without a positive reservation id lands as an empty
    /// entry.
    pub fn build(mut template: SlotBoard, fetched: &[SlotRecord]) -> SlotBoard {
        for record in fetched {
            let Some(raw) = record.slot_no else {
                debug!(name = %record.name, "dropping fetched slot without slotNo");
                continue;
            };
            let Ok(slot_no) = SlotNo::new(raw) else {
                debug!(slot_no = raw, "dropping fetched slot outside the board");
                continue;
            };

            let state = ReservationId::from_wire(record.reservation_id)
                .map(SlotState::Confirmed)
                .unwrap_or(SlotState::Empty);

            template.entries[slot_no.index()] = SlotEntry {
                slot_no,
                state,
                name: record.name.clone(),
                phone: record.phone.clone(),
            };
        }
        template
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Result<&SlotEntry, BoardError> {
        self.entries
            .get(index)
            .ok_or(BoardError::IndexOutOfRange(index))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut SlotEntry, BoardError> {
        self.entries
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange(index))
    }

    /// Pending plus confirmed slots.
    pub fn occupied_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state.is_occupied())
            .count()
    }

    pub fn remaining(&self) -> usize {
        MAX_PARTICIPANTS - self.occupied_count()
    }

    /// First empty slot without draft text, falling back to any empty slot.
    pub fn first_free(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.is_editable() && !entry.has_draft())
            .or_else(|| self.entries.iter().position(SlotEntry::is_editable))
    }

    /// Position of a confirmed reservation on this board.
    pub fn position_of(&self, reservation_id: ReservationId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.state.reservation_id() == Some(reservation_id))
    }

    /// Sets draft text on an empty slot.
    pub fn edit_draft(
        &mut self,
        index: usize,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), BoardError> {
        let entry = self.entry_mut(index)?;
        if !entry.is_editable() {
            return Err(entry.locked());
        }
        match field {
            DraftField::Name => entry.name = value.into(),
            DraftField::Phone => entry.phone = value.into(),
        }
        Ok(())
    }

    /// Validates the draft at `index` and marks the slot pending.
    ///
    /// On error nothing changes. On success the returned [`PendingCreate`]
    /// holds the request to send and must be handed back to
    /// [`SlotBoard::finish_submit`].
    pub fn begin_submit(&mut self, index: usize) -> Result<PendingCreate, BoardError> {
        let selection = self.selection;
        let entry = self.entry_mut(index)?;
        if !entry.is_editable() {
            return Err(entry.locked());
        }

        let name = entry.name.trim();
        let phone = entry.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(ValidationError {
                missing_name: name.is_empty(),
                missing_phone: phone.is_empty(),
            }
            .into());
        }

        let request = CreateReservationRequest::new(
            selection,
            entry.slot_no,
            name.to_string(),
            phone.to_string(),
        );
        let snapshot = entry.clone();
        entry.state = SlotState::Pending;

        Ok(PendingCreate {
            index,
            snapshot,
            request,
        })
    }

    /// Settles a create: confirm with the server id, or restore the
    /// pre-submit entry.
    pub fn finish_submit(
        &mut self,
        pending: PendingCreate,
        result: Result<ReservationId, BackendError>,
    ) -> Result<ReservationId, BoardError> {
        let PendingCreate {
            index,
            snapshot,
            request,
        } = pending;
        let entry = &mut self.entries[index];

        if entry.state != SlotState::Pending {
            debug!(
                slot_no = entry.slot_no.get(),
                state = entry.state.label(),
                "slot replaced while create was in flight; leaving it"
            );
            return result.map_err(BoardError::from);
        }

        match result {
            Ok(id) => {
                *entry = SlotEntry {
                    slot_no: entry.slot_no,
                    state: SlotState::Confirmed(id),
                    name: request.name,
                    phone: request.phone,
                };
                Ok(id)
            }
            Err(err) => {
                *entry = snapshot;
                Err(err.into())
            }
        }
    }

    /// Clears a confirmed slot ahead of the delete request.
    pub fn begin_delete(&mut self, index: usize) -> Result<PendingDelete, BoardError> {
        let entry = self.entry_mut(index)?;
        let Some(reservation_id) = entry.state.reservation_id() else {
            return Err(BoardError::NotConfirmed {
                slot_no: entry.slot_no.get(),
            });
        };

        let slot_no = entry.slot_no;
        let snapshot = std::mem::replace(entry, SlotEntry::empty(slot_no));
        Ok(PendingDelete {
            index,
            reservation_id,
            snapshot,
        })
    }

    /// Settles a delete: keep the slot cleared, or restore the prior occupant.
    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), BackendError>,
    ) -> Result<(), BoardError> {
        let entry = &mut self.entries[pending.index];
        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                if entry.is_editable() {
                    *entry = pending.snapshot;
                } else {
                    debug!(
                        slot_no = entry.slot_no.get(),
                        "slot reused while delete was in flight; not restoring"
                    );
                }
                Err(err.into())
            }
        }
    }
}
