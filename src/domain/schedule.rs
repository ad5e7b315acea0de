//! Next-prayer resolution over the daily ring of boundaries.
//!
//! The six boundaries form a cycle: the slot after the last one is the first
//! one, tomorrow. Resolution is a walk over that ring starting at midnight.

use super::entities::{MINUTES_PER_DAY, NextPrayer, PrayerSlot, TimeOfDay};
use super::errors::DomainError;

pub const SLOTS_PER_DAY: usize = 6;

/// Find the first slot whose boundary is strictly after `now`, wrapping to the
/// first slot of the sequence (as tomorrow) once every boundary has passed.
///
/// A boundary equal to `now` counts as passed. Slots are scanned in the given
/// order; they are neither sorted nor validated.
pub fn resolve(slots: &[PrayerSlot], now: TimeOfDay) -> Result<NextPrayer, DomainError> {
    if slots.is_empty() {
        return Err(DomainError::InsufficientData);
    }

    let len = slots.len();
    // Walk today's slots then step onto tomorrow's first; `step / len` counts days crossed.
    let (slot, days_ahead) = (0..=len)
        .map(|step| (&slots[step % len], (step / len) as u32))
        .find(|(slot, days_ahead)| *days_ahead > 0 || now < slot.boundary)
        .ok_or(DomainError::InsufficientData)?;

    let remaining_minutes = days_ahead * MINUTES_PER_DAY + slot.boundary.minutes() - now.minutes();

    Ok(NextPrayer {
        label: slot.label.clone(),
        boundary: slot.boundary,
        remaining_minutes,
    })
}

/// A complete day of exactly [`SLOTS_PER_DAY`] boundaries in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    slots: [PrayerSlot; SLOTS_PER_DAY],
}

impl DailySchedule {
    pub fn slots(&self) -> &[PrayerSlot] {
        &self.slots
    }

    pub fn next_prayer(&self, now: TimeOfDay) -> Result<NextPrayer, DomainError> {
        resolve(&self.slots, now)
    }
}

impl TryFrom<Vec<PrayerSlot>> for DailySchedule {
    type Error = DomainError;

    fn try_from(slots: Vec<PrayerSlot>) -> Result<Self, Self::Error> {
        let slots: [PrayerSlot; SLOTS_PER_DAY] = slots
            .try_into()
            .map_err(|_| DomainError::InsufficientData)?;
        Ok(Self { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Prayer;

    fn hm(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m)
    }

    fn sample_slots() -> Vec<PrayerSlot> {
        [hm(5, 0), hm(6, 30), hm(12, 30), hm(16, 0), hm(19, 30), hm(21, 0)]
            .into_iter()
            .zip(Prayer::ALL)
            .map(|(t, p)| PrayerSlot::for_prayer(p, t))
            .collect()
    }

    #[test]
    fn test_before_first_boundary_returns_first() {
        let slots = sample_slots();
        for now in 0..300 {
            let next = resolve(&slots, TimeOfDay::from_minutes(now)).unwrap();
            assert_eq!(next.label, "İmsak");
            assert_eq!(next.boundary, hm(5, 0));
            assert_eq!(next.remaining_minutes, 300 - now);
        }
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let slots = sample_slots();
        for (i, slot) in slots.iter().enumerate().take(slots.len() - 1) {
            let next = resolve(&slots, slot.boundary).unwrap();
            assert_eq!(next.label, slots[i + 1].label);
            assert_eq!(
                next.remaining_minutes,
                slots[i + 1].boundary.minutes() - slot.boundary.minutes()
            );
        }
    }

    #[test]
    fn test_between_boundaries() {
        let next = resolve(&sample_slots(), hm(13, 15)).unwrap();
        assert_eq!(next.label, "İkindi");
        assert_eq!(next.remaining_minutes, 165);
        assert_eq!(next.remaining_display(), "2h 45m");
    }

    #[test]
    fn test_wraps_to_first_slot_after_last_boundary() {
        let next = resolve(&sample_slots(), hm(22, 0)).unwrap();
        assert_eq!(next.label, "İmsak");
        assert_eq!(next.boundary, hm(5, 0));
        assert_eq!(next.remaining_minutes, (1440 - 1320) + 300);
        assert_eq!(next.remaining_display(), "7h 0m");
    }

    #[test]
    fn test_exactly_last_boundary_wraps() {
        let next = resolve(&sample_slots(), hm(21, 0)).unwrap();
        assert_eq!(next.label, "İmsak");
        assert_eq!(next.remaining_minutes, (1440 - 1260) + 300);
    }

    #[test]
    fn test_last_minute_of_day() {
        let next = resolve(&sample_slots(), hm(23, 59)).unwrap();
        assert_eq!(next.label, "İmsak");
        assert_eq!(next.remaining_minutes, 301);
    }

    #[test]
    fn test_single_slot_ring() {
        let slots = [PrayerSlot::new("Öğle", hm(12, 0))];
        assert_eq!(resolve(&slots, hm(11, 0)).unwrap().remaining_minutes, 60);
        assert_eq!(resolve(&slots, hm(12, 0)).unwrap().remaining_minutes, 1440);
        assert_eq!(resolve(&slots, hm(13, 0)).unwrap().remaining_minutes, 1380);
    }

    #[test]
    fn test_slots_scanned_in_given_order() {
        let slots = [
            PrayerSlot::new("late", hm(20, 0)),
            PrayerSlot::new("early", hm(6, 0)),
        ];
        let next = resolve(&slots, hm(5, 0)).unwrap();
        assert_eq!(next.label, "late");
        assert_eq!(next.remaining_minutes, 900);

        let next = resolve(&slots, hm(21, 0)).unwrap();
        assert_eq!(next.label, "late");
        assert_eq!(next.remaining_minutes, 1380);
    }

    #[test]
    fn test_empty_slots_is_insufficient_data() {
        let err = resolve(&[], hm(12, 0)).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientData));
    }

    #[test]
    fn test_daily_schedule_requires_six_slots() {
        let mut slots = sample_slots();
        slots.pop();
        assert!(matches!(
            DailySchedule::try_from(slots),
            Err(DomainError::InsufficientData)
        ));

        let schedule = DailySchedule::try_from(sample_slots()).unwrap();
        assert_eq!(schedule.slots().len(), SLOTS_PER_DAY);
        assert_eq!(schedule.next_prayer(hm(17, 0)).unwrap().label, "Akşam");
    }
}
