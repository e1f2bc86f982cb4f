//! Request and response bodies of the reservation backend API.
//!
//! Field names follow the backend's camelCase JSON. Inbound slot data is kept
//! loosely typed (`Option<i64>`) so malformed entries can be dropped by the
//! board instead of failing the whole response.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{BoothType, ReservationDate, ReservationId, Round, Selection, SlotNo};

/// `GET /api/v1/reservations/summary`.
pub const SUMMARY_PATH: &str = "/api/v1/reservations/summary";

/// `GET /api/v1/admin/reservations/detail?date&booth&round`.
pub const DETAIL_PATH: &str = "/api/v1/admin/reservations/detail";

/// `POST /api/v1/admin/reservations`, `DELETE .../{reservationId}`.
pub const RESERVATIONS_PATH: &str = "/api/v1/admin/reservations";

/// One occupied slot as reported by the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    #[serde(default)]
    pub slot_no: Option<i64>,
    #[serde(default)]
    pub reservation_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
}

/// Reads a string field where the backend may send `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Payload of the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub booth_type: Option<String>,
    #[serde(default)]
    pub round_no: Option<i64>,
    #[serde(default)]
    pub slots: Option<Vec<SlotRecord>>,
}

/// Detail endpoint envelope: `{ "data": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub data: Option<ReservationDetail>,
}

impl DetailEnvelope {
    /// Extracts the slot list, or `None` when the body carries no slot data.
    pub fn into_slots(self) -> Option<Vec<SlotRecord>> {
        self.data.and_then(|detail| detail.slots)
    }
}

/// Booked seats for one round of one booth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundCount {
    pub round_no: i64,
    pub count: i64,
}

/// Per-booth entry of the summary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothSummary {
    /// Kept as the raw code; unknown booths are skipped when rendering.
    pub booth_type: String,
    #[serde(default)]
    pub booth_name: Option<String>,
    #[serde(default)]
    pub rounds: Vec<RoundCount>,
}

impl BoothSummary {
    /// Resolves the raw booth code against the fixed booth list.
    pub fn booth(&self) -> Option<BoothType> {
        BoothType::from_code(&self.booth_type)
    }
}

/// Payload of the summary endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub date_map: BTreeMap<String, Vec<BoothSummary>>,
}

impl ReservationSummary {
    /// Booth entries for one event day (empty if the day is absent).
    pub fn booths_on(&self, date: ReservationDate) -> &[BoothSummary] {
        self.date_map
            .get(date.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The summary endpoint answers either `{ data: { dateMap } }` or `{ dateMap }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub data: Option<ReservationSummary>,
    #[serde(default)]
    pub date_map: Option<BTreeMap<String, Vec<BoothSummary>>>,
}

impl SummaryEnvelope {
    /// Extracts the summary, or `None` when the body carries neither form.
    pub fn into_summary(self) -> Option<ReservationSummary> {
        self.data
            .or_else(|| self.date_map.map(|date_map| ReservationSummary { date_map }))
    }
}

/// Body of `POST /api/v1/admin/reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub date: ReservationDate,
    pub booth_type: BoothType,
    pub round: Round,
    pub slot_no: SlotNo,
    pub name: String,
    pub phone: String,
}

impl CreateReservationRequest {
    pub fn new(selection: Selection, slot_no: SlotNo, name: String, phone: String) -> Self {
        Self {
            date: selection.date,
            booth_type: selection.booth,
            round: selection.round,
            slot_no,
            name,
            phone,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.date, self.booth_type, self.round)
    }
}

/// Response of a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation_id: ReservationId,
}

/// Error body the backend sends on non-2xx responses, when it sends one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_backend_field_names() {
        let selection = Selection::new(
            ReservationDate::Sunday,
            BoothType::EarthMoonModel,
            Round::new(3).unwrap(),
        );
        let request = CreateReservationRequest::new(
            selection,
            SlotNo::new(7).unwrap(),
            "이도현".to_string(),
            "010-5555-6666".to_string(),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-11-23",
                "boothType": "EARTH_MOON_MODEL",
                "round": 3,
                "slotNo": 7,
                "name": "이도현",
                "phone": "010-5555-6666",
            })
        );
        assert_eq!(request.selection(), selection);
    }

    #[test]
    fn detail_tolerates_null_and_missing_fields() {
        let body = serde_json::json!({
            "data": {
                "date": "2025-11-22",
                "boothType": "AIR_ROCKET",
                "roundNo": 1,
                "slots": [
                    { "slotNo": 5, "reservationId": 3, "name": "박서연", "phone": "010-3333-4444" },
                    { "slotNo": null, "reservationId": null, "name": "", "phone": "" },
                    { "name": "no slot" },
                    { "slotNo": 6, "reservationId": 0, "name": null, "phone": null }
                ]
            }
        });

        let envelope: DetailEnvelope = serde_json::from_value(body).unwrap();
        let slots = envelope.into_slots().unwrap();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].slot_no, Some(5));
        assert_eq!(slots[1].slot_no, None);
        assert_eq!(slots[2].reservation_id, None);
        assert_eq!(slots[3].slot_no, Some(6));
        assert_eq!(slots[3].name, "");
        assert_eq!(slots[3].phone, "");
    }

    #[test]
    fn detail_without_slots_yields_none() {
        let envelope: DetailEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(envelope.into_slots().is_none());
    }

    #[test]
    fn summary_accepts_wrapped_and_bare_bodies() {
        let day = serde_json::json!({
            "2025-11-22": [
                { "boothType": "AIR_ROCKET", "boothName": "에어로켓 만들기",
                  "rounds": [ { "roundNo": 1, "count": 12 } ] }
            ]
        });

        let wrapped: SummaryEnvelope =
            serde_json::from_value(serde_json::json!({ "data": { "dateMap": day.clone() } }))
                .unwrap();
        let bare: SummaryEnvelope =
            serde_json::from_value(serde_json::json!({ "dateMap": day })).unwrap();

        for summary in [wrapped.into_summary().unwrap(), bare.into_summary().unwrap()] {
            let booths = summary.booths_on(ReservationDate::Saturday);
            assert_eq!(booths.len(), 1);
            assert_eq!(booths[0].booth(), Some(BoothType::AirRocket));
            assert!(summary.booths_on(ReservationDate::Sunday).is_empty());
        }
    }

    #[test]
    fn summary_without_date_map_has_no_data() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({ "data": null }),
            serde_json::json!({ "error": "oops" }),
            serde_json::json!({ "dateMap": null }),
        ] {
            let envelope: SummaryEnvelope = serde_json::from_value(body.clone()).unwrap();
            assert!(envelope.into_summary().is_none(), "accepted {}", body);
        }
    }

    #[test]
    fn wrapped_summary_requires_date_map() {
        let body = serde_json::json!({ "data": {} });
        assert!(serde_json::from_value::<SummaryEnvelope>(body).is_err());
    }
}
