//! Time provider adapters. Parse provider `HH:MM` strings into domain slots.

pub mod aladhan;
pub mod timings_file;

pub use aladhan::AladhanTimeProvider;
pub use timings_file::JsonFileTimeProvider;

use crate::domain::{DayTimings, DomainError, HijriDate, Prayer, PrayerSlot, TimeOfDay};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level Aladhan envelope. `data` is an error string when `code != 200`.
#[derive(Debug, Deserialize)]
pub(crate) struct AladhanResponse {
    pub code: u16,
    #[serde(default)]
    pub status: Option<String>,
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AladhanDay {
    timings: HashMap<String, String>,
    #[serde(default)]
    date: Option<AladhanDate>,
}

#[derive(Debug, Deserialize)]
struct AladhanDate {
    #[serde(default)]
    hijri: Option<AladhanHijri>,
}

#[derive(Debug, Deserialize)]
struct AladhanHijri {
    day: String,
    month: AladhanMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct AladhanMonth {
    en: String,
}

/// Parse `"HH:MM"`, ignoring any trailing annotation such as `"05:12 (EET)"`.
pub fn parse_hhmm(raw: &str) -> Result<TimeOfDay, DomainError> {
    let bad = || DomainError::TimeProvider(format!("invalid time string: {:?}", raw));
    let clock = raw.split_whitespace().next().ok_or_else(bad)?;
    let (h, m) = clock.split_once(':').ok_or_else(bad)?;
    let hour: u32 = h.parse().map_err(|_| bad())?;
    let minute: u32 = m.parse().map_err(|_| bad())?;
    if hour > 23 || minute > 59 {
        return Err(bad());
    }
    Ok(TimeOfDay::from_hm(hour, minute))
}

/// Turn an Aladhan response body into the six canonical slots plus the Hijri date.
pub(crate) fn day_timings_from_response(
    body: AladhanResponse,
    date: NaiveDate,
) -> Result<DayTimings, DomainError> {
    if body.code != 200 {
        let detail = body
            .data
            .as_str()
            .map(str::to_string)
            .or(body.status)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(DomainError::TimeProvider(format!(
            "Aladhan API error {}: {}",
            body.code, detail
        )));
    }

    let day: AladhanDay = serde_json::from_value(body.data)
        .map_err(|e| DomainError::TimeProvider(format!("unexpected response shape: {}", e)))?;

    let slots = Prayer::ALL
        .iter()
        .map(|prayer| {
            let raw = day.timings.get(prayer.provider_key()).ok_or_else(|| {
                DomainError::TimeProvider(format!("missing {} time", prayer.provider_key()))
            })?;
            Ok(PrayerSlot::for_prayer(*prayer, parse_hhmm(raw)?))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let hijri = day
        .date
        .and_then(|d| d.hijri)
        .and_then(|h| {
            Some(HijriDate {
                day: h.day.parse().ok()?,
                month: h.month.en,
                year: h.year.parse().ok()?,
            })
        });

    Ok(DayTimings { date, slots, hijri })
}

#[cfg(test)]
pub(crate) const SAMPLE_RESPONSE: &str = r#"{
  "code": 200,
  "status": "OK",
  "data": {
    "timings": {
      "Fajr": "05:00",
      "Sunrise": "06:30",
      "Dhuhr": "12:30",
      "Asr": "16:00",
      "Sunset": "19:28",
      "Maghrib": "19:30",
      "Isha": "21:00 (EET)",
      "Imsak": "04:50",
      "Midnight": "00:15"
    },
    "date": {
      "readable": "01 Mar 2026",
      "hijri": {
        "date": "12-09-1447",
        "day": "12",
        "month": { "number": 9, "en": "Ramaḍān", "ar": "رَمَضان" },
        "year": "1447"
      }
    }
  }
}"#;
