//! Create a reservation in one slot.

use anyhow::{Context, Result};
use booth_board::{AdminSession, DraftField, SlotBoard};
use booth_domain::{ReservationId, SlotNo};
use clap::Args;
use serde::Serialize;

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Reserve a slot of the selected date/booth/round.
#[derive(Debug, Args)]
pub struct ReserveCommand {
    /// Slot number (1-12). Defaults to the first free slot.
    #[arg(long)]
    slot: Option<SlotNo>,

    /// Participant name.
    #[arg(long, default_value = "")]
    name: String,

    /// Participant phone number.
    #[arg(long, default_value = "")]
    phone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReserveView {
    reservation_id: ReservationId,
    slot_no: SlotNo,
    name: String,
    phone: String,
}

/// Board index to reserve: the requested slot, or the first free one.
fn target_index(board: &SlotBoard, slot: Option<SlotNo>) -> Result<usize> {
    match slot {
        Some(slot) => Ok(slot.index()),
        None => board
            .first_free()
            .with_context(|| format!("{} is fully booked", board.selection())),
    }
}

impl ReserveCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let selection = ctx.require_selection()?;
        let mut session = AdminSession::new(ctx.client()?);

        // Writes need a loaded board; a failed load aborts.
        let board = session.select(selection).await?;
        let index = target_index(board, self.slot)?;

        session.edit_draft(index, DraftField::Name, self.name)?;
        session.edit_draft(index, DraftField::Phone, self.phone)?;
        let reservation_id = session.submit(index).await?;

        let entry = session.board().map(|board| board.entry(index)).transpose()?;
        let view = ReserveView {
            reservation_id,
            slot_no: SlotNo::from_index(index)?,
            name: entry.map(|e| e.name.clone()).unwrap_or_default(),
            phone: entry.map(|e| e.phone.clone()).unwrap_or_default(),
        };

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => print_success(&format!(
                "Reserved slot {} of {} for {} (reservation {})",
                view.slot_no, selection, view.name, view.reservation_id
            )),
        }

        Ok(())
    }
}
