//! Public dashboard: remaining seats per booth and round.

use anyhow::Result;
use booth_board::{CapacityCell, CapacityGrid, CapacityRow};
use booth_domain::ReservationDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_single, print_table, print_warning, OutputFormat};

use super::CommandContext;

/// Show remaining seats for one event day (or both).
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Show both event days instead of only --date.
    #[arg(long)]
    all_days: bool,
}

/// One dashboard row.
#[derive(Debug, Tabled)]
struct StatusRow {
    #[tabled(rename = "부스명")]
    booth: String,
    #[tabled(rename = "1회차 (10:00-10:45)")]
    round1: String,
    #[tabled(rename = "2회차 (11:00-11:45)")]
    round2: String,
    #[tabled(rename = "3회차 (13:00-13:45)")]
    round3: String,
    #[tabled(rename = "4회차 (14:00-14:45)")]
    round4: String,
    #[tabled(rename = "5회차 (15:00-15:45)")]
    round5: String,
    #[tabled(rename = "6회차 (16:00-16:45)")]
    round6: String,
}

#[derive(Debug, Serialize)]
struct StatusView {
    fetched_at: String,
    days: Vec<CapacityGrid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn cell_text(cell: Option<&CapacityCell>) -> String {
    match cell {
        Some(cell) if cell.is_full() => "마감".to_string(),
        Some(cell) => format!("{}자리 남음", cell.remaining),
        None => "-".to_string(),
    }
}

fn status_row(row: &CapacityRow) -> StatusRow {
    let cell = |index: usize| cell_text(row.cells.get(index));
    StatusRow {
        booth: row.booth_name.to_string(),
        round1: cell(0),
        round2: cell(1),
        round3: cell(2),
        round4: cell(3),
        round5: cell(4),
        round6: cell(5),
    }
}

/// Rows shown when the summary could not be loaded.
fn unavailable_rows(date: ReservationDate) -> Vec<StatusRow> {
    CapacityGrid::empty(date)
        .rows
        .iter()
        .map(|row| StatusRow {
            booth: row.booth_name.to_string(),
            round1: cell_text(None),
            round2: cell_text(None),
            round3: cell_text(None),
            round4: cell_text(None),
            round5: cell_text(None),
            round6: cell_text(None),
        })
        .collect()
}

impl StatusCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let days: Vec<ReservationDate> = if self.all_days {
            ReservationDate::ALL.to_vec()
        } else {
            vec![ctx.resolve_date().unwrap_or(ReservationDate::Saturday)]
        };

        let client = ctx.client()?;
        let fetched_at = chrono::Utc::now().to_rfc3339();

        // Read failures degrade to a banner, not an exit code.
        let (grids, error) = match client.summary().await {
            Ok(summary) => (
                days.iter()
                    .map(|date| CapacityGrid::from_summary(&summary, *date))
                    .collect::<Vec<_>>(),
                None,
            ),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load reservation summary");
                (Vec::new(), Some(e.to_string()))
            }
        };

        match ctx.format {
            OutputFormat::Json => print_single(&StatusView {
                fetched_at,
                days: grids,
                error,
            }),
            OutputFormat::Table => {
                if let Some(error) = &error {
                    print_warning(&format!(
                        "Could not load reservation status: {}",
                        error
                    ));
                }
                for date in &days {
                    println!("{}", date);
                    let rows = match grids.iter().find(|grid| grid.date == *date) {
                        Some(grid) => grid.rows.iter().map(status_row).collect(),
                        None => unavailable_rows(*date),
                    };
                    print_table(&rows);
                }
                println!("각 칸은 남은 인원 수를 의미하며, 0명이면 마감으로 표기됩니다.");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_domain::wire::SummaryEnvelope;

    #[test]
    fn full_cells_read_as_closed() {
        let summary = serde_json::from_value::<SummaryEnvelope>(serde_json::json!({
            "dateMap": { "2025-11-22": [
                { "boothType": "AIR_ROCKET",
                  "rounds": [ { "roundNo": 1, "count": 12 }, { "roundNo": 2, "count": 5 } ] }
            ] }
        }))
        .unwrap()
        .into_summary()
        .unwrap();

        let grid = CapacityGrid::from_summary(&summary, ReservationDate::Saturday);
        let row = status_row(&grid.rows[0]);
        assert_eq!(row.booth, "에어로켓 만들기");
        assert_eq!(row.round1, "마감");
        assert_eq!(row.round2, "7자리 남음");
        assert_eq!(row.round6, "12자리 남음");
    }

    #[test]
    fn unavailable_rows_show_placeholders() {
        let rows = unavailable_rows(ReservationDate::Sunday);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.round3 == "-"));
    }
}
