//! Participant board of one selection.

use anyhow::Result;
use booth_board::{AdminSession, SlotBoard, SlotEntry, SlotState};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_single, print_table, print_warning, OutputFormat};

use super::CommandContext;

/// Show the twelve slots of the selected date/booth/round.
#[derive(Debug, Args)]
pub struct SlotsCommand {}

#[derive(Debug, Tabled)]
struct SlotRow {
    #[tabled(rename = "No")]
    slot_no: u8,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Reservation ID")]
    reservation_id: String,
}

impl From<&SlotEntry> for SlotRow {
    fn from(entry: &SlotEntry) -> Self {
        let status = match entry.state {
            SlotState::Empty => "비어있음",
            SlotState::Pending => "처리중",
            SlotState::Confirmed(_) => "예약됨",
        };
        Self {
            slot_no: entry.slot_no.get(),
            name: entry.name.clone(),
            phone: entry.phone.clone(),
            status,
            reservation_id: entry
                .state
                .reservation_id()
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct SlotsView<'a> {
    board: &'a SlotBoard,
    occupied: usize,
    remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn board_rows(board: &SlotBoard) -> Vec<SlotRow> {
    board.entries().iter().map(SlotRow::from).collect()
}

impl SlotsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let selection = ctx.require_selection()?;
        let mut session = AdminSession::new(ctx.client()?);

        // A failed load keeps the empty board on screen, next to the error.
        let error = session
            .select(selection)
            .await
            .err()
            .map(|e| e.to_string());
        let empty = SlotBoard::empty(selection);
        let board = session.board().unwrap_or(&empty);

        match ctx.format {
            OutputFormat::Json => print_single(&SlotsView {
                board,
                occupied: board.occupied_count(),
                remaining: board.remaining(),
                error,
            }),
            OutputFormat::Table => {
                if let Some(error) = &error {
                    print_warning(&format!("Could not load slots: {}", error));
                }
                println!("{}", selection);
                print_table(&board_rows(board));
                println!(
                    "{}/{} reserved, {} remaining",
                    board.occupied_count(),
                    booth_domain::MAX_PARTICIPANTS,
                    board.remaining()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_domain::wire::SlotRecord;
    use booth_domain::{BoothType, ReservationDate, Round, Selection};

    #[test]
    fn rows_cover_every_slot() {
        let selection = Selection::new(
            ReservationDate::Saturday,
            BoothType::NurihoPaperRocket,
            Round::new(2).unwrap(),
        );
        let board = SlotBoard::build(
            SlotBoard::empty(selection),
            &[SlotRecord {
                slot_no: Some(5),
                reservation_id: Some(3),
                name: "박서연".into(),
                phone: "010-3333-4444".into(),
            }],
        );

        let rows = board_rows(&board);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[4].name, "박서연");
        assert_eq!(rows[4].status, "예약됨");
        assert_eq!(rows[4].reservation_id, "3");
        assert_eq!(rows[0].status, "비어있음");
        assert_eq!(rows[0].reservation_id, "-");
    }
}
