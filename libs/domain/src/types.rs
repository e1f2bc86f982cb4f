//! Typed domain values for the reservation event.
//!
//! Each value has a canonical wire representation (what the backend sends
//! and expects) and, where it matters, a display label for people.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{define_ranged, DomainError};

// =============================================================================
// Dates
// =============================================================================

/// One of the two event days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReservationDate {
    #[serde(rename = "2025-11-22")]
    Saturday,
    #[serde(rename = "2025-11-23")]
    Sunday,
}

impl ReservationDate {
    /// Every event day in calendar order.
    pub const ALL: [ReservationDate; 2] = [ReservationDate::Saturday, ReservationDate::Sunday];

    /// ISO date string used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservationDate::Saturday => "2025-11-22",
            ReservationDate::Sunday => "2025-11-23",
        }
    }
}

impl fmt::Display for ReservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        Self::ALL
            .into_iter()
            .find(|date| date.as_str() == trimmed)
            .ok_or_else(|| DomainError::UnknownDate(trimmed.to_string()))
    }
}

// =============================================================================
// Booths
// =============================================================================

/// One of the five exhibition booths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoothType {
    AirRocket,
    #[serde(rename = "NURIHO_3D")]
    Nuriho3d,
    EarthMoonModel,
    NurihoPaperRocket,
    NurihoTabletRocket,
}

impl BoothType {
    /// Every booth in display order.
    pub const ALL: [BoothType; 5] = [
        BoothType::AirRocket,
        BoothType::Nuriho3d,
        BoothType::EarthMoonModel,
        BoothType::NurihoPaperRocket,
        BoothType::NurihoTabletRocket,
    ];

    /// Code used on the wire (`boothType`, `booth` query parameter).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            BoothType::AirRocket => "AIR_ROCKET",
            BoothType::Nuriho3d => "NURIHO_3D",
            BoothType::EarthMoonModel => "EARTH_MOON_MODEL",
            BoothType::NurihoPaperRocket => "NURIHO_PAPER_ROCKET",
            BoothType::NurihoTabletRocket => "NURIHO_TABLET_ROCKET",
        }
    }

    /// Display name shown to visitors.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            BoothType::AirRocket => "에어로켓 만들기",
            BoothType::Nuriho3d => "누리호 3D 입체모형 만들기",
            BoothType::EarthMoonModel => "지구와 달의 운동모형 만들기",
            BoothType::NurihoPaperRocket => "누리호 종이 로켓 만들기",
            BoothType::NurihoTabletRocket => "발포정 누리호 로켓 만들기",
        }
    }

    /// Looks up a booth by its wire code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|booth| booth.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for BoothType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BoothType {
    type Err = DomainError;

    /// Accepts the wire code (any case, `-` or `_`) or the exact display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        let normalized = trimmed.replace('-', "_");
        Self::from_code(&normalized)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|booth| booth.display_name() == trimmed)
            })
            .ok_or_else(|| DomainError::UnknownBooth(trimmed.to_string()))
    }
}

// =============================================================================
// Rounds and slots
// =============================================================================

define_ranged!(Round, 1, 6, RoundOutOfRange);
define_ranged!(SlotNo, 1, 12, SlotOutOfRange);

impl Round {
    /// Time window label, e.g. `3회차 (13:00-13:45)`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "1회차 (10:00-10:45)",
            2 => "2회차 (11:00-11:45)",
            3 => "3회차 (13:00-13:45)",
            4 => "4회차 (14:00-14:45)",
            5 => "5회차 (15:00-15:45)",
            _ => "6회차 (16:00-16:45)",
        }
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// Server-issued reservation identifier.
///
/// The backend uses `0` for "no reservation"; that value never becomes a
/// `ReservationId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates an id, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::InvalidReservationId(id));
        }
        Ok(Self(id))
    }

    /// Interprets a wire value where `0`, negative or null means "none".
    #[must_use]
    pub fn from_wire(id: Option<i64>) -> Option<Self> {
        id.and_then(|id| Self::new(id).ok())
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        let id: i64 = trimmed
            .parse()
            .map_err(|_| DomainError::InvalidNumber(trimmed.to_string()))?;
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ReservationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Self::new(id).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The (date, booth, round) triple an admin board is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub date: ReservationDate,
    pub booth: BoothType,
    pub round: Round,
}

impl Selection {
    #[must_use]
    pub const fn new(date: ReservationDate, booth: BoothType, round: Round) -> Self {
        Self { date, booth, round }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.date,
            self.booth.display_name(),
            self.round.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-11-22", ReservationDate::Saturday)]
    #[case(" 2025-11-23 ", ReservationDate::Sunday)]
    fn parses_event_dates(#[case] input: &str, #[case] expected: ReservationDate) {
        assert_eq!(input.parse::<ReservationDate>().unwrap(), expected);
    }

    #[test]
    fn rejects_other_dates() {
        let err = "2025-11-24".parse::<ReservationDate>().unwrap_err();
        assert_eq!(err, DomainError::UnknownDate("2025-11-24".to_string()));
        assert_eq!("".parse::<ReservationDate>().unwrap_err(), DomainError::Empty);
    }

    #[rstest]
    #[case("AIR_ROCKET", BoothType::AirRocket)]
    #[case("nuriho_3d", BoothType::Nuriho3d)]
    #[case("earth-moon-model", BoothType::EarthMoonModel)]
    #[case("누리호 종이 로켓 만들기", BoothType::NurihoPaperRocket)]
    #[case("NURIHO_TABLET_ROCKET", BoothType::NurihoTabletRocket)]
    fn parses_booth_codes_and_names(#[case] input: &str, #[case] expected: BoothType) {
        assert_eq!(input.parse::<BoothType>().unwrap(), expected);
    }

    #[test]
    fn booth_serializes_as_code() {
        for booth in BoothType::ALL {
            let json = serde_json::to_string(&booth).unwrap();
            assert_eq!(json, format!("\"{}\"", booth.code()));
        }
    }

    #[rstest]
    #[case("0")]
    #[case("7")]
    #[case("-1")]
    fn rejects_rounds_out_of_range(#[case] input: &str) {
        assert!(input.parse::<Round>().unwrap_err().is_range_error());
    }

    #[test]
    fn round_labels_follow_schedule() {
        let labels: Vec<_> = Round::all().map(|r| r.label()).collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "1회차 (10:00-10:45)");
        assert_eq!(labels[2], "3회차 (13:00-13:45)");
        assert_eq!(labels[5], "6회차 (16:00-16:45)");
    }

    #[test]
    fn slot_index_matches_number() {
        let slot = SlotNo::new(12).unwrap();
        assert_eq!(slot.index(), 11);
        assert_eq!(SlotNo::from_index(0).unwrap().get(), 1);
        assert!(SlotNo::from_index(12).is_err());
        assert_eq!(SlotNo::all().count(), crate::MAX_PARTICIPANTS);
    }

    #[test]
    fn reservation_id_wire_zero_means_none() {
        assert_eq!(ReservationId::from_wire(Some(0)), None);
        assert_eq!(ReservationId::from_wire(None), None);
        assert_eq!(ReservationId::from_wire(Some(-1)), None);
        assert_eq!(ReservationId::from_wire(Some(3)).map(|id| id.value()), Some(3));
    }

    #[test]
    fn selection_display_uses_labels() {
        let selection = Selection::new(
            ReservationDate::Saturday,
            BoothType::AirRocket,
            Round::new(1).unwrap(),
        );
        assert_eq!(
            selection.to_string(),
            "2025-11-22 / 에어로켓 만들기 / 1회차 (10:00-10:45)"
        );
    }
}
