//! Prayer times use case: locate -> fetch day timings -> live countdown to the next prayer.
//!
//! Falls back to a fixed point when the observer cannot be located, so the screen
//! always has times to show. The countdown loop uses tokio::time::interval and
//! never blocks the caller's runtime.

use crate::domain::{
    DailySchedule, DomainError, GeoPoint, HijriDate, NextPrayer, TimeOfDay, UnavailableReason,
};
use crate::ports::{Clock, Geocoder, LocationProvider, TimeProvider};
use chrono::{NaiveDate, NaiveDateTime};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Place label when location access was refused.
pub const PERMISSION_REQUIRED_LABEL: &str = "İzin Gerekli";

/// Where prayer times come from when the observer cannot be located.
#[derive(Debug, Clone)]
pub struct FallbackPlace {
    pub point: GeoPoint,
    pub name: String,
}

/// One loaded day, ready for repeated next-prayer queries.
#[derive(Debug, Clone)]
pub struct PrayerDay {
    pub date: NaiveDate,
    pub point: GeoPoint,
    /// Header label: the geocoded observer, or a fixed label on fallback.
    pub place: String,
    /// True when `point` is the configured fallback rather than the observer.
    pub used_fallback: bool,
    pub schedule: DailySchedule,
    pub hijri: Option<HijriDate>,
}

/// Emitted on every clock tick.
#[derive(Debug, Clone)]
pub struct ClockTick {
    pub now: NaiveDateTime,
    pub next: NextPrayer,
    /// The wall clock has moved past the loaded date; the caller should reload.
    pub day_changed: bool,
}

pub struct PrayerService {
    time: Arc<dyn TimeProvider>,
    location: Arc<dyn LocationProvider>,
    geocoder: Arc<dyn Geocoder>,
    clock: Arc<dyn Clock>,
    fallback: FallbackPlace,
    tick: Duration,
}

impl PrayerService {
    pub fn new(
        time: Arc<dyn TimeProvider>,
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
        clock: Arc<dyn Clock>,
        fallback: FallbackPlace,
        tick: Duration,
    ) -> Self {
        Self {
            time,
            location,
            geocoder,
            clock,
            fallback,
            tick,
        }
    }

    /// Locate the observer (or fall back) and fetch today's six boundaries.
    pub async fn load_day(&self) -> Result<PrayerDay, DomainError> {
        let now = self.clock.now();
        let date = now.date();
        let (point, place, used_fallback) = match self.location.locate().await {
            Ok(point) => (point, self.place_name(point).await, false),
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %self.fallback.point,
                    "location unavailable; using fallback for prayer times"
                );
                let place = match e {
                    DomainError::Unavailable(UnavailableReason::PermissionDenied) => {
                        PERMISSION_REQUIRED_LABEL.to_string()
                    }
                    _ => self.fallback.name.clone(),
                };
                (self.fallback.point, place, true)
            }
        };

        let timings = self.time.day_timings(point, now).await?;
        let count = timings.slots.len();
        if count == 0 {
            return Err(DomainError::InsufficientData);
        }
        let schedule = DailySchedule::try_from(timings.slots).map_err(|_| {
            DomainError::TimeProvider(format!("expected 6 prayer times, got {}", count))
        })?;

        info!(%date, %point, %place, used_fallback, "prayer times loaded");
        Ok(PrayerDay {
            date,
            point,
            place,
            used_fallback,
            schedule,
            hijri: timings.hijri,
        })
    }

    /// Geocoded name of `point`, or its coordinates when the lookup fails.
    async fn place_name(&self, point: GeoPoint) -> String {
        match self.geocoder.place_name(point).await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, %point, "reverse geocoding failed; showing coordinates");
                point.to_string()
            }
        }
    }

    /// Next prayer relative to the clock's current time.
    pub fn next_prayer(&self, day: &PrayerDay) -> Result<NextPrayer, DomainError> {
        day.schedule.next_prayer(TimeOfDay::from(self.clock.now().time()))
    }

    /// Re-resolve the next prayer on every tick until `shutdown` completes.
    /// Returns the number of ticks delivered.
    pub async fn run_clock<S, F>(
        &self,
        day: &PrayerDay,
        shutdown: S,
        mut on_tick: F,
    ) -> Result<usize, DomainError>
    where
        S: Future<Output = ()>,
        F: FnMut(&ClockTick),
    {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut ticks = 0usize;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    let now = self.clock.now();
                    let next = day.schedule.next_prayer(TimeOfDay::from(now.time()))?;
                    let tick = ClockTick {
                        now,
                        next,
                        day_changed: now.date() != day.date,
                    };
                    on_tick(&tick);
                    ticks += 1;
                }
            }
        }

        debug!(ticks, "prayer clock stopped");
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayTimings, Prayer, PrayerSlot};
    use chrono::NaiveTime;
    use std::sync::Mutex;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    struct FakeLocation(Result<GeoPoint, UnavailableReason>);

    #[async_trait::async_trait]
    impl LocationProvider for FakeLocation {
        async fn locate(&self) -> Result<GeoPoint, DomainError> {
            self.0.clone().map_err(DomainError::Unavailable)
        }
    }

    /// Names every point, or fails every lookup when `name` is None.
    struct FakeGeocoder(Option<&'static str>);

    #[async_trait::async_trait]
    impl Geocoder for FakeGeocoder {
        async fn place_name(&self, _point: GeoPoint) -> Result<String, DomainError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| DomainError::Geocoder("offline".into()))
        }
    }

    struct FakeTimes {
        slot_count: usize,
        requested: Mutex<Vec<(GeoPoint, NaiveDateTime)>>,
    }

    impl FakeTimes {
        fn new(slot_count: usize) -> Self {
            Self {
                slot_count,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl TimeProvider for FakeTimes {
        async fn day_timings(
            &self,
            point: GeoPoint,
            at: NaiveDateTime,
        ) -> Result<DayTimings, DomainError> {
            self.requested.lock().unwrap().push((point, at));
            let times = [(5, 0), (6, 30), (12, 30), (16, 0), (19, 30), (21, 0)];
            let slots = Prayer::ALL
                .iter()
                .zip(times)
                .take(self.slot_count)
                .map(|(p, (h, m))| PrayerSlot::for_prayer(*p, TimeOfDay::from_hm(h, m)))
                .collect();
            Ok(DayTimings {
                date: at.date(),
                slots,
                hijri: None,
            })
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn fallback() -> FallbackPlace {
        FallbackPlace {
            point: GeoPoint::new(41.0082, 28.9784).unwrap(),
            name: "İstanbul, Türkiye".into(),
        }
    }

    fn service_with(
        times: Arc<FakeTimes>,
        location: Result<GeoPoint, UnavailableReason>,
        geocoder: FakeGeocoder,
        now: NaiveDateTime,
    ) -> PrayerService {
        PrayerService::new(
            times,
            Arc::new(FakeLocation(location)),
            Arc::new(geocoder),
            Arc::new(FixedClock(now)),
            fallback(),
            Duration::from_millis(10),
        )
    }

    fn service(
        times: Arc<FakeTimes>,
        location: Option<GeoPoint>,
        now: NaiveDateTime,
    ) -> PrayerService {
        let location = location.ok_or(UnavailableReason::NoFix);
        service_with(times, location, FakeGeocoder(Some("Mitte, Deutschland")), now)
    }

    #[tokio::test]
    async fn test_load_day_uses_observer() {
        let times = Arc::new(FakeTimes::new(6));
        let observer = GeoPoint::new(52.52, 13.405).unwrap();
        let svc = service(Arc::clone(&times), Some(observer), at(9, 0));

        let day = svc.load_day().await.unwrap();
        assert!(!day.used_fallback);
        assert_eq!(day.point, observer);
        assert_eq!(day.place, "Mitte, Deutschland");
        assert_eq!(times.requested.lock().unwrap().as_slice(), &[(observer, at(9, 0))]);
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[tokio::test]
    async fn test_load_day_falls_back_when_location_fails() {
        let times = Arc::new(FakeTimes::new(6));
        let svc = service(Arc::clone(&times), None, at(9, 0));

        let day = svc.load_day().await.unwrap();
        assert!(day.used_fallback);
        assert_eq!(day.point.latitude_deg, 41.0082);
        assert_eq!(day.place, "İstanbul, Türkiye");
    }

    #[tokio::test]
    async fn test_permission_denied_is_labelled() {
        let svc = service_with(
            Arc::new(FakeTimes::new(6)),
            Err(UnavailableReason::PermissionDenied),
            FakeGeocoder(Some("unused")),
            at(9, 0),
        );

        let day = svc.load_day().await.unwrap();
        assert!(day.used_fallback);
        assert_eq!(day.place, PERMISSION_REQUIRED_LABEL);
        assert_eq!(day.point, fallback().point);
    }

    #[tokio::test]
    async fn test_geocoder_failure_shows_coordinates() {
        let observer = GeoPoint::new(52.52, 13.405).unwrap();
        let svc = service_with(
            Arc::new(FakeTimes::new(6)),
            Ok(observer),
            FakeGeocoder(None),
            at(9, 0),
        );

        let day = svc.load_day().await.unwrap();
        assert!(!day.used_fallback);
        assert_eq!(day.place, observer.to_string());
    }

    #[tokio::test]
    async fn test_load_day_rejects_incomplete_timings() {
        let svc = service(Arc::new(FakeTimes::new(4)), None, at(9, 0));
        assert!(matches!(
            svc.load_day().await,
            Err(DomainError::TimeProvider(_))
        ));

        let svc = service(Arc::new(FakeTimes::new(0)), None, at(9, 0));
        assert!(matches!(
            svc.load_day().await,
            Err(DomainError::InsufficientData)
        ));
    }

    #[tokio::test]
    async fn test_next_prayer_wraps_after_isha() {
        let svc = service(Arc::new(FakeTimes::new(6)), None, at(22, 0));
        let day = svc.load_day().await.unwrap();
        let next = svc.next_prayer(&day).unwrap();
        assert_eq!(next.label, "İmsak");
        assert_eq!(next.remaining_minutes, 420);
    }

    #[tokio::test]
    async fn test_run_clock_ticks_until_shutdown() {
        let svc = service(Arc::new(FakeTimes::new(6)), None, at(13, 0));
        let day = svc.load_day().await.unwrap();

        let mut seen = Vec::new();
        let ticks = svc
            .run_clock(
                &day,
                tokio::time::sleep(Duration::from_millis(35)),
                |tick| seen.push(tick.next.clone()),
            )
            .await
            .unwrap();

        assert!(ticks >= 1);
        assert_eq!(seen.len(), ticks);
        assert!(seen.iter().all(|n| n.label == "İkindi" && n.remaining_minutes == 180));
    }

    #[tokio::test]
    async fn test_run_clock_flags_day_change() {
        let svc = service(Arc::new(FakeTimes::new(6)), None, at(13, 0));
        let mut day = svc.load_day().await.unwrap();
        day.date = day.date.pred_opt().unwrap();

        let mut changed = false;
        svc.run_clock(
            &day,
            tokio::time::sleep(Duration::from_millis(15)),
            |tick| changed |= tick.day_changed,
        )
        .await
        .unwrap();
        assert!(changed);
    }
}
