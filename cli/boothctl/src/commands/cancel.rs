//! Cancel a confirmed reservation.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use booth_board::{AdminSession, DeleteOutcome, SlotBoard, SlotEntry};
use booth_domain::{ReservationId, SlotNo};
use clap::Args;

use crate::output::{print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Cancel a reservation of the selected date/booth/round.
#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .args(["slot", "reservation_id"]),
))]
pub struct CancelCommand {
    /// Slot number (1-12) holding the reservation.
    #[arg(long)]
    slot: Option<SlotNo>,

    /// Reservation id to cancel.
    #[arg(long)]
    reservation_id: Option<ReservationId>,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,
}

/// Board index addressed by `--slot` or `--reservation-id`.
fn target_index(
    board: &SlotBoard,
    slot: Option<SlotNo>,
    reservation_id: Option<ReservationId>,
) -> Result<usize> {
    match (slot, reservation_id) {
        (Some(slot), _) => Ok(slot.index()),
        (None, Some(id)) => board
            .position_of(id)
            .with_context(|| format!("Reservation {} is not on {}", id, board.selection())),
        (None, None) => anyhow::bail!("Pass --slot or --reservation-id"),
    }
}

/// Accepts "y" and "yes" in any case.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn prompt(entry: &SlotEntry) -> bool {
    eprint!(
        "Cancel reservation of {} ({}) in slot {}? [y/N] ",
        entry.name, entry.phone, entry.slot_no
    );
    let _ = io::stderr().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

impl CancelCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let selection = ctx.require_selection()?;
        let mut session = AdminSession::new(ctx.client()?);

        let board = session.select(selection).await?;
        let index = target_index(board, self.slot, self.reservation_id)?;

        let skip_prompt = self.yes;
        let outcome = session
            .delete(index, |entry| skip_prompt || prompt(entry))
            .await?;

        match (outcome, ctx.format) {
            (DeleteOutcome::Deleted(id), OutputFormat::Json) => {
                print_single(&serde_json::json!({ "deleted": true, "reservationId": id }))
            }
            (DeleteOutcome::Deleted(id), OutputFormat::Table) => {
                print_success(&format!("Cancelled reservation {}", id))
            }
            (DeleteOutcome::Declined, OutputFormat::Json) => {
                print_single(&serde_json::json!({ "deleted": false }))
            }
            (DeleteOutcome::Declined, OutputFormat::Table) => print_info("Nothing cancelled"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_domain::wire::SlotRecord;
    use booth_domain::{BoothType, ReservationDate, Round, Selection};
    use rstest::rstest;

    fn board() -> SlotBoard {
        let selection = Selection::new(
            ReservationDate::Saturday,
            BoothType::NurihoTabletRocket,
            Round::new(5).unwrap(),
        );
        SlotBoard::build(
            SlotBoard::empty(selection),
            &[SlotRecord {
                slot_no: Some(7),
                reservation_id: Some(42),
                name: "이도현".into(),
                phone: "010-5555-6666".into(),
            }],
        )
    }

    #[rstest]
    #[case("y", true)]
    #[case("YES\n", true)]
    #[case(" Yes ", true)]
    #[case("", false)]
    #[case("n", false)]
    #[case("yep", false)]
    fn affirmative_answers(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer), expected);
    }

    #[test]
    fn reservation_id_resolves_to_its_slot() {
        let id = ReservationId::new(42).unwrap();
        assert_eq!(target_index(&board(), None, Some(id)).unwrap(), 6);
    }

    #[test]
    fn unknown_reservation_id_is_an_error() {
        let id = ReservationId::new(7).unwrap();
        let err = target_index(&board(), None, Some(id)).unwrap_err();
        assert!(err.to_string().contains("Reservation 7"));
    }

    #[test]
    fn slot_flag_is_used_directly() {
        let slot = SlotNo::new(3).unwrap();
        assert_eq!(target_index(&board(), Some(slot), None).unwrap(), 2);
    }
}
