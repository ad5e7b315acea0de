//! Aladhan adapter. Implements TimeProvider via the public Aladhan REST API.

use super::{AladhanResponse, day_timings_from_response};
use crate::domain::{DayTimings, DomainError, GeoPoint};
use crate::ports::TimeProvider;
use chrono::{Local, NaiveDateTime, TimeZone};
use reqwest::Client;
use tracing::debug;

/// Fetches daily timings from `{base_url}/timings/{unix_timestamp}`.
///
/// Aladhan picks the day containing that instant at the requested position.
/// No retries: a failed request surfaces as `DomainError::TimeProvider`.
pub struct AladhanTimeProvider {
    client: Client,
    base_url: String,
    method: u8,
}

impl AladhanTimeProvider {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://api.aladhan.com/v1"
    /// * `method` - calculation method id (3 = Muslim World League)
    pub fn new(base_url: String, method: u8) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            method,
        }
    }

    fn timings_url(&self, timestamp: i64) -> String {
        format!("{}/timings/{}", self.base_url, timestamp)
    }
}

/// Seconds since the epoch for a local wall-clock time.
///
/// A time skipped by a DST jump has no local instant; it is read as UTC.
fn unix_timestamp(at: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&at)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| at.and_utc().timestamp())
}

#[async_trait::async_trait]
impl TimeProvider for AladhanTimeProvider {
    async fn day_timings(
        &self,
        point: GeoPoint,
        at: NaiveDateTime,
    ) -> Result<DayTimings, DomainError> {
        let url = self.timings_url(unix_timestamp(at));
        debug!(%url, %point, method = self.method, "requesting prayer times");

        let res = self
            .client
            .get(&url)
            .query(&[
                ("latitude", point.latitude_deg.to_string()),
                ("longitude", point.longitude_deg.to_string()),
                ("method", self.method.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::TimeProvider(format!("Request failed: {}", e)))?;

        // Aladhan reports errors in the JSON envelope too; prefer that message.
        let status = res.status();
        let body: AladhanResponse = res.json().await.map_err(|e| {
            DomainError::TimeProvider(format!("Invalid response ({}): {}", status, e))
        })?;

        day_timings_from_response(body, at.date())
    }
}
