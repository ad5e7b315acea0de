//! Replays recorded magnetometer samples from a CSV file, looping forever.
//!
//! Columns: `x,y` with an optional `z`. Uses the `csv` crate with serde headers.

use super::{period_for_rate, spawn_stream};
use crate::domain::{DomainError, HeadingSample};
use crate::ports::{HeadingSensor, HeadingSubscription};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvMagnetometer {
    path: PathBuf,
    rate_hz: u32,
}

impl CsvMagnetometer {
    pub fn new(path: impl AsRef<Path>, rate_hz: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            rate_hz,
        }
    }
}

/// Parse recorded samples. An empty recording is an error.
pub fn parse_samples(data: &str) -> Result<Vec<HeadingSample>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let samples = rdr
        .deserialize::<HeadingSample>()
        .collect::<Result<Vec<_>, csv::Error>>()
        .map_err(|e| DomainError::Sensor(format!("invalid sample row: {}", e)))?;
    if samples.is_empty() {
        return Err(DomainError::Sensor("recording contains no samples".into()));
    }
    Ok(samples)
}

#[async_trait::async_trait]
impl HeadingSensor for CsvMagnetometer {
    async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn subscribe(&self) -> Result<HeadingSubscription, DomainError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::Sensor(format!("read {}: {}", self.path.display(), e)))?;
        let samples = parse_samples(&data)?;
        info!(
            path = %self.path.display(),
            samples = samples.len(),
            rate_hz = self.rate_hz,
            "replaying magnetometer recording"
        );
        Ok(spawn_stream(period_for_rate(self.rate_hz), move |tick| {
            let index = (tick % samples.len() as u64) as usize;
            Some(samples[index])
        }))
    }
}
