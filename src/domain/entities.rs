//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/sensor types here. Adapters parse raw provider data into these.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DomainError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Local wall-clock time as minutes since midnight, always in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    /// Any minute count is reduced modulo one day.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Self {
        Self::from_minutes((hour % 24) * 60 + minute)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self::from_hm(t.hour(), t.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// The six daily boundaries, in canonical day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Canonical order. The first entry is the wraparound target for the next day.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Display label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Prayer::Fajr => "İmsak",
            Prayer::Sunrise => "Güneş",
            Prayer::Dhuhr => "Öğle",
            Prayer::Asr => "İkindi",
            Prayer::Maghrib => "Akşam",
            Prayer::Isha => "Yatsı",
        }
    }

    /// Field name in the Aladhan `timings` object.
    pub fn provider_key(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

/// One labelled boundary of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSlot {
    pub label: String,
    pub boundary: TimeOfDay,
}

impl PrayerSlot {
    pub fn new(label: impl Into<String>, boundary: TimeOfDay) -> Self {
        Self {
            label: label.into(),
            boundary,
        }
    }

    pub fn for_prayer(prayer: Prayer, boundary: TimeOfDay) -> Self {
        Self::new(prayer.label(), boundary)
    }
}

/// The upcoming boundary and how long until it. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPrayer {
    pub label: String,
    pub boundary: TimeOfDay,
    pub remaining_minutes: u32,
}

impl NextPrayer {
    pub fn remaining_hours(&self) -> u32 {
        self.remaining_minutes / 60
    }

    pub fn remaining_minutes_part(&self) -> u32 {
        self.remaining_minutes % 60
    }

    /// e.g. `"7h 0m"`.
    pub fn remaining_display(&self) -> String {
        format!(
            "{}h {}m",
            self.remaining_hours(),
            self.remaining_minutes_part()
        )
    }
}

/// A position on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    /// Validating constructor for untrusted input (config, providers).
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, DomainError> {
        let lat_ok = latitude_deg.is_finite() && (-90.0..=90.0).contains(&latitude_deg);
        let lon_ok = longitude_deg.is_finite() && (-180.0..=180.0).contains(&longitude_deg);
        if !(lat_ok && lon_ok) {
            return Err(DomainError::InvalidCoordinate {
                latitude: latitude_deg,
                longitude: longitude_deg,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude_deg, self.longitude_deg)
    }
}

/// Degrees clockwise from true north, in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Bearing(pub(crate) f64);

impl Bearing {
    /// Wraps any angle into `[0, 360)`.
    pub fn from_degrees(degrees: f64) -> Self {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        Self(if wrapped >= 360.0 { 0.0 } else { wrapped })
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Raw magnetometer reading. Only the horizontal `x`/`y` axes are used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl HeadingSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Rotation to apply to the direction indicator. Deliberately not normalised:
/// it may be negative or exceed 360.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct RelativeRotation(pub(crate) f64);

impl RelativeRotation {
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RelativeRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Hijri calendar date as reported by the time provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: u32,
    /// Provider's transliterated month name, e.g. `"Ramaḍān"`.
    pub month: String,
    pub year: i32,
}

impl HijriDate {
    /// Turkish month name; unknown names are passed through unchanged.
    pub fn month_tr(&self) -> &str {
        match self.month.as_str() {
            "Muḥarram" => "Muharrem",
            "Ṣafar" => "Safer",
            "Rabīʿ al-awwal" => "Rebiülevvel",
            "Rabīʿ al-thānī" => "Rebiülahir",
            "Jumādá al-ūlá" => "Cemaziyelevvel",
            "Jumādá al-ākhirah" => "Cemaziyelahir",
            "Rajab" => "Recep",
            "Shaʿbān" => "Şaban",
            "Ramaḍān" => "Ramazan",
            "Shawwāl" => "Şevval",
            "Dhū al-Qaʿdah" => "Zilkade",
            "Dhū al-Ḥijjah" => "Zilhicce",
            other => other,
        }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_tr(), self.year)
    }
}

/// Everything a time provider returns for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTimings {
    pub date: NaiveDate,
    /// Canonical order (see [`Prayer::ALL`]).
    pub slots: Vec<PrayerSlot>,
    pub hijri: Option<HijriDate>,
}
