//! Offline time provider. Reads an Aladhan-shaped JSON document from disk.

use super::{AladhanResponse, day_timings_from_response};
use crate::domain::{DayTimings, DomainError, GeoPoint};
use crate::ports::TimeProvider;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The same document is served for every date and position.
pub struct JsonFileTimeProvider {
    path: PathBuf,
}

impl JsonFileTimeProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl TimeProvider for JsonFileTimeProvider {
    async fn day_timings(
        &self,
        point: GeoPoint,
        at: NaiveDateTime,
    ) -> Result<DayTimings, DomainError> {
        debug!(path = %self.path.display(), %point, "reading prayer times from file");
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::TimeProvider(format!("read {}: {}", self.path.display(), e))
        })?;
        let body: AladhanResponse = serde_json::from_str(&raw).map_err(|e| {
            DomainError::TimeProvider(format!("parse {}: {}", self.path.display(), e))
        })?;
        day_timings_from_response(body, at.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::time::SAMPLE_RESPONSE;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_reads_timings_file() {
        let path = std::env::temp_dir().join(format!("vakit-timings-{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE_RESPONSE).await.unwrap();

        let provider = JsonFileTimeProvider::new(&path);
        let at = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let timings = provider
            .day_timings(GeoPoint::new(41.0, 29.0).unwrap(), at)
            .await
            .unwrap();
        assert_eq!(timings.slots.len(), 6);
        assert_eq!(timings.date, at.date());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_is_provider_error() {
        let provider = JsonFileTimeProvider::new("/nonexistent/vakit/timings.json");
        let err = provider
            .day_timings(
                GeoPoint::new(0.0, 0.0).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::TimeProvider(_)));
    }
}
