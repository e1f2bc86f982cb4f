//! HTTP client for the reservation backend.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use booth_board::{BackendError, ReservationBackend};
use booth_domain::wire::{
    CreateReservationRequest, CreateReservationResponse, DetailEnvelope, ErrorBody,
    ReservationSummary, SlotRecord, SummaryEnvelope, DETAIL_PATH, RESERVATIONS_PATH, SUMMARY_PATH,
};
use booth_domain::{ReservationId, Selection};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::CliError;

/// API client for the reservation backend.
///
/// A client can be built without a base URL; every call then fails with
/// [`CliError::Configuration`] instead of reaching the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self, CliError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> Result<String, CliError> {
        let base = self.base_url.as_deref().ok_or(CliError::Configuration)?;
        Ok(format!("{}{}", base, path))
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CliError> {
        let url = self.url(path)?;
        debug!(%url, ?query, "GET");
        let response = self.client.get(url).query(query).send().await?;

        if response.status().is_success() {
            Self::parse_body(response).await
        } else {
            Self::handle_error(response, |text| {
                format!("Network response was not ok: {}", text)
            })
            .await
        }
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &'static str,
    ) -> Result<T, CliError> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;

        if response.status().is_success() {
            Self::parse_body(response).await
        } else {
            Self::handle_error(response, |_| fallback.to_string()).await
        }
    }

    /// Make a DELETE request.
    async fn delete(&self, path: &str, fallback: &'static str) -> Result<(), CliError> {
        let url = self.url(path)?;
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Self::handle_error(response, |_| fallback.to_string()).await
        }
    }

    async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CliError> {
        response
            .json()
            .await
            .map_err(|e| CliError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Handle an error response. Uses the body's `message` when present,
    /// else `fallback` applied to the raw body text.
    async fn handle_error<T>(
        response: reqwest::Response,
        fallback: impl FnOnce(&str) -> String,
    ) -> Result<T, CliError> {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback(&text));

        if status == 404 {
            return Err(CliError::NotFound(message));
        }

        Err(CliError::api(status, message))
    }

    /// `GET /api/v1/reservations/summary`.
    pub async fn summary(&self) -> Result<ReservationSummary, CliError> {
        let envelope: SummaryEnvelope = self.get(SUMMARY_PATH, &[]).await?;
        envelope.into_summary().ok_or_else(|| {
            CliError::InvalidResponse("API response did not contain data.".to_string())
        })
    }

    /// `GET /api/v1/admin/reservations/detail`.
    pub async fn detail(&self, selection: &Selection) -> Result<Vec<SlotRecord>, CliError> {
        let query = [
            ("date", selection.date.as_str().to_string()),
            ("booth", selection.booth.code().to_string()),
            ("round", selection.round.to_string()),
        ];
        let envelope: DetailEnvelope = self.get(DETAIL_PATH, &query).await?;
        envelope.into_slots().ok_or_else(|| {
            CliError::InvalidResponse("API response did not contain valid slot data.".to_string())
        })
    }

    /// `POST /api/v1/admin/reservations`.
    pub async fn create(&self, request: &CreateReservationRequest) -> Result<ReservationId, CliError> {
        let response: CreateReservationResponse = self
            .post(RESERVATIONS_PATH, request, "Failed to create reservation")
            .await?;
        Ok(response.reservation_id)
    }

    /// `DELETE /api/v1/admin/reservations/{reservationId}`.
    pub async fn remove(&self, reservation_id: ReservationId) -> Result<(), CliError> {
        let path = format!("{}/{}", RESERVATIONS_PATH, reservation_id);
        self.delete(&path, "Failed to delete reservation").await
    }
}

#[async_trait]
impl ReservationBackend for ApiClient {
    async fn fetch_slots(&self, selection: &Selection) -> Result<Vec<SlotRecord>, BackendError> {
        self.detail(selection).await.map_err(BackendError::from)
    }

    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<ReservationId, BackendError> {
        self.create(request).await.map_err(BackendError::from)
    }

    async fn delete_reservation(&self, reservation_id: ReservationId) -> Result<(), BackendError> {
        self.remove(reservation_id).await.map_err(BackendError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_board::{AdminSession, BoardError, DraftField, SlotState};
    use booth_domain::{BoothType, ReservationDate, Round};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(Some(&server.uri()), Duration::from_secs(5)).unwrap()
    }

    fn selection() -> Selection {
        Selection::new(
            ReservationDate::Saturday,
            BoothType::AirRocket,
            Round::new(1).unwrap(),
        )
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new(Some("http://api.local/"), Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(SUMMARY_PATH).unwrap(),
            "http://api.local/api/v1/reservations/summary"
        );
    }

    #[tokio::test]
    async fn missing_base_url_is_a_configuration_error() {
        let client = ApiClient::new(None, Duration::from_secs(1)).unwrap();

        assert!(matches!(client.summary().await, Err(CliError::Configuration)));
        assert_eq!(
            client.fetch_slots(&selection()).await.unwrap_err(),
            BackendError::Configuration
        );
    }

    #[tokio::test]
    async fn summary_reads_wrapped_date_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUMMARY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "dateMap": { "2025-11-22": [
                    { "boothType": "NURIHO_3D", "boothName": "누리호 3D 입체모형 만들기",
                      "rounds": [ { "roundNo": 2, "count": 4 } ] }
                ] } }
            })))
            .mount(&server)
            .await;

        let summary = client_for(&server).summary().await.unwrap();
        let booths = summary.booths_on(ReservationDate::Saturday);
        assert_eq!(booths[0].booth(), Some(BoothType::Nuriho3d));
        assert_eq!(booths[0].rounds[0].count, 4);
    }

    #[tokio::test]
    async fn summary_without_data_is_invalid() {
        for body in [serde_json::json!({}), serde_json::json!({ "data": null })] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(SUMMARY_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;

            let err = client_for(&server).summary().await.unwrap_err();
            assert!(
                matches!(&err, CliError::InvalidResponse(message) if message == "API response did not contain data."),
                "unexpected error: {err}"
            );
        }
    }

    #[tokio::test]
    async fn detail_sends_selection_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .and(query_param("date", "2025-11-22"))
            .and(query_param("booth", "AIR_ROCKET"))
            .and(query_param("round", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "date": "2025-11-22", "boothType": "AIR_ROCKET", "roundNo": 1,
                    "slots": [ { "slotNo": 5, "reservationId": 3,
                                 "name": "박서연", "phone": "010-3333-4444" } ]
                }
            })))
            .mount(&server)
            .await;

        let slots = client_for(&server).detail(&selection()).await.unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].slot_no, Some(5));
        assert_eq!(slots[0].reservation_id, Some(3));
    }

    #[tokio::test]
    async fn detail_without_slots_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": {} })))
            .mount(&server)
            .await;

        let err = client_for(&server).detail(&selection()).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn read_failure_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUMMARY_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).summary().await.unwrap_err();
        match err {
            CliError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Network response was not ok: maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_distinct_from_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "no such round" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_slots(&selection()).await.unwrap_err();
        assert_eq!(err, BackendError::NotFound("no such round".into()));
    }

    #[tokio::test]
    async fn create_posts_payload_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESERVATIONS_PATH))
            .and(body_json(serde_json::json!({
                "date": "2025-11-22", "boothType": "AIR_ROCKET", "round": 1,
                "slotNo": 2, "name": "김민준", "phone": "010-1111-2222"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "reservationId": 77 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateReservationRequest::new(
            selection(),
            booth_domain::SlotNo::new(2).unwrap(),
            "김민준".into(),
            "010-1111-2222".into(),
        );
        let id = client_for(&server).create(&request).await.unwrap();
        assert_eq!(id.value(), 77);
    }

    #[tokio::test]
    async fn create_failure_uses_error_message_or_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESERVATIONS_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let request = CreateReservationRequest::new(
            selection(),
            booth_domain::SlotNo::new(1).unwrap(),
            "a".into(),
            "b".into(),
        );
        let err = client_for(&server).create_reservation(&request).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::Api {
                status: 500,
                message: "Failed to create reservation".into()
            }
        );
    }

    #[tokio::test]
    async fn delete_targets_reservation_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/admin/reservations/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .remove(ReservationId::new(3).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn session_over_http_rolls_back_rejected_create() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "slots": [] }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(RESERVATIONS_PATH))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({ "message": "이미 예약된 자리입니다." })),
            )
            .mount(&server)
            .await;

        let mut session = AdminSession::new(client_for(&server));
        session.select(selection()).await.unwrap();
        session.edit_draft(0, DraftField::Name, "김민준").unwrap();
        session.edit_draft(0, DraftField::Phone, "010-1111-2222").unwrap();

        let err = session.submit(0).await.unwrap_err();
        assert_eq!(
            err,
            BoardError::Backend(BackendError::Api {
                status: 409,
                message: "이미 예약된 자리입니다.".into()
            })
        );
        let entry = session.board().unwrap().entry(0).unwrap();
        assert_eq!(entry.state, SlotState::Empty);
        assert_eq!(entry.name, "김민준");
    }

    #[tokio::test]
    async fn session_over_http_deletes_confirmed_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "slots": [ { "slotNo": 5, "reservationId": 3,
                                       "name": "박서연", "phone": "010-3333-4444" } ] }
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/admin/reservations/3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = AdminSession::new(client_for(&server));
        session.select(selection()).await.unwrap();
        session.delete(4, |_| true).await.unwrap();

        assert_eq!(session.board().unwrap().occupied_count(), 0);
    }
}
