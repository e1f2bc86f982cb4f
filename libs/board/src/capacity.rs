//! Remaining capacity per booth and round, for the public dashboard.

use booth_domain::wire::ReservationSummary;
use booth_domain::{BoothType, ReservationDate, Round, MAX_PARTICIPANTS};
use serde::Serialize;
use tracing::debug;

/// One (booth, round) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityCell {
    pub round: Round,
    pub booked: usize,
    pub remaining: usize,
}

impl CapacityCell {
    fn from_booked(round: Round, booked: i64) -> Self {
        let booked = booked.clamp(0, MAX_PARTICIPANTS as i64) as usize;
        Self {
            round,
            booked,
            remaining: MAX_PARTICIPANTS - booked,
        }
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

/// All six rounds of one booth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRow {
    pub booth: BoothType,
    pub booth_name: &'static str,
    pub cells: Vec<CapacityCell>,
}

/// Booth × round grid of one event day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityGrid {
    pub date: ReservationDate,
    pub rows: Vec<CapacityRow>,
}

impl CapacityGrid {
    /// Grid with every seat available.
    pub fn empty(date: ReservationDate) -> Self {
        Self::from_summary(&ReservationSummary::default(), date)
    }

    /// Builds the grid for `date` in fixed booth order.
    ///
    /// Booths or rounds missing from the summary count as unbooked. Booth
    /// codes and round numbers the event does not know are skipped.
    pub fn from_summary(summary: &ReservationSummary, date: ReservationDate) -> Self {
        let entries = summary.booths_on(date);

        let rows = BoothType::ALL
            .into_iter()
            .map(|booth| {
                let counts = entries.iter().find(|entry| entry.booth() == Some(booth));
                let cells = Round::all()
                    .map(|round| {
                        let booked = counts
                            .and_then(|entry| {
                                entry
                                    .rounds
                                    .iter()
                                    .find(|r| r.round_no == round.get() as i64)
                            })
                            .map(|r| r.count)
                            .unwrap_or(0);
                        CapacityCell::from_booked(round, booked)
                    })
                    .collect();
                CapacityRow {
                    booth,
                    booth_name: booth.display_name(),
                    cells,
                }
            })
            .collect();

        for entry in entries.iter().filter(|entry| entry.booth().is_none()) {
            debug!(booth_type = %entry.booth_type, %date, "skipping unknown booth in summary");
        }

        Self { date, rows }
    }

    pub fn total_remaining(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.remaining)
            .sum()
    }
}
