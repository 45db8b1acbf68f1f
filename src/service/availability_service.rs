use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::clients::http_transport::{HttpTransport, ReqwestTransport, TransportResponse};
use crate::error::{BookingError, GENERIC_REQUEST_FAILURE};
use crate::models::availability::{CommonSlot, TimeRangeQuery};
use crate::models::booking::{EventIdentity, parse_booking_url};

pub const AVAILABILITY_PATH: &str = "/api/availability";

#[derive(Clone)]
pub struct BookingLinkClient {
    transport: Arc<dyn HttpTransport>,
}

impl BookingLinkClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    // Fails only if the HTTP client can't be built; nothing has been sent yet.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let transport = ReqwestTransport::new(base_url, timeout)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn parse_booking_url(&self, url: &str) -> Result<EventIdentity, BookingError> {
        parse_booking_url(url)
    }

    /// Asks the availability service for windows shared by every booking link.
    ///
    /// URLs and dates go to the server as given. One request per call, never
    /// retried.
    pub async fn query_common_availability(
        &self,
        event_urls: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<CommonSlot>, BookingError> {
        let query = TimeRangeQuery::new(event_urls, start_date, end_date);
        let span = info_span!("availability_query", request_id = %Uuid::new_v4());
        self.send_query(&query).instrument(span).await
    }

    async fn send_query(&self, query: &TimeRangeQuery) -> Result<Vec<CommonSlot>, BookingError> {
        let body = serde_json::to_value(query).map_err(|e| BookingError::request(e.to_string()))?;
        info!(
            url_count = query.event_urls.len(),
            start_date = %query.start_date,
            end_date = %query.end_date,
            "Querying common availability"
        );

        let response = match self.transport.post_json(AVAILABILITY_PATH, &body).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Availability request failed before a response");
                return Err(BookingError::request(e));
            }
        };

        let slots = read_slots(&response)?;
        info!(slot_count = slots.len(), "Availability query complete");
        Ok(slots)
    }
}

fn read_slots(response: &TransportResponse) -> Result<Vec<CommonSlot>, BookingError> {
    if !response.is_success() {
        let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
        let message = server_error(&body).unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string());
        warn!(status = response.status, error = %message, "Availability service returned an error");
        return Err(BookingError::request(message));
    }

    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        warn!(status = response.status, "Availability response was not valid JSON");
        BookingError::request(format!("Failed to parse availability response: {}", e))
    })?;

    if let Some(error) = server_error(&body) {
        return Err(BookingError::request(error));
    }
    let slots = body
        .get("slots")
        .cloned()
        .ok_or_else(|| BookingError::request("Availability response is missing slots"))?;
    serde_json::from_value(slots)
        .map_err(|e| BookingError::request(format!("Failed to parse availability slots: {}", e)))
}

// The `error` field as a message. Null, false, 0 and blank strings carry none;
// other non-string values are shown as JSON.
fn server_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
