//! Implements InputPort. Inquire menu plus live terminal rendering.
//!
//! Prayer screen: the day's six times with the next one highlighted and a
//! countdown refreshed on every clock tick. Qibla screen: the target bearing and
//! a rotating arrow driven by the compass stream. Ctrl-C returns to the menu.

use super::banner::{MARKER, MINT, rgb};
use super::progress;
use crate::domain::{DomainError, NextPrayer, RelativeRotation};
use crate::ports::{HeadingSensor, InputPort, LocationProvider};
use crate::usecases::{ClockTick, PrayerDay, PrayerService, QiblaCompass};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::cursor::MoveToColumn;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use inquire::ui::{Color as PromptColor, RenderConfig, Styled};
use inquire::{InquireError, Select};
use std::future::Future;
use std::io::{Stdout, Write, stdout};
use std::sync::Arc;
use tracing::{info, warn};

const MENU_PRAYER: &str = "Prayer times";
const MENU_QIBLA: &str = "Qibla compass";
const MENU_EXIT: &str = "Exit";

/// Rotation (degrees) within which the device counts as facing the Qibla.
const ALIGNED_TOLERANCE_DEG: f64 = 5.0;

/// Green prompt prefix for all inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("☾").with_fg(PromptColor::LightGreen));
    inquire::set_global_render_config(config);
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    prayer: Arc<PrayerService>,
    sensor: Arc<dyn HeadingSensor>,
    location: Arc<dyn LocationProvider>,
}

impl TuiInputPort {
    pub fn new(
        prayer: Arc<PrayerService>,
        sensor: Arc<dyn HeadingSensor>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            prayer,
            sensor,
            location,
        }
    }

    /// Main menu. Returns on "Exit" or when the prompt is cancelled (Esc / Ctrl-C).
    pub async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = Select::new(
                "What would you like to see?",
                vec![MENU_PRAYER, MENU_QIBLA, MENU_EXIT],
            )
            .prompt();

            let result = match choice {
                Ok(MENU_PRAYER) => self.run_prayer_times().await,
                Ok(MENU_QIBLA) => self.run_qibla().await,
                Ok(_)
                | Err(InquireError::OperationCanceled)
                | Err(InquireError::OperationInterrupted) => return Ok(()),
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            if let Err(e) = result {
                warn!(error = %e, "screen failed");
                print_colored(Color::Red, &describe(&e));
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run_prayer_times(&self) -> Result<(), DomainError> {
        let pb = progress::spinner("Fetching location and prayer times...");
        let loaded = self.prayer.load_day().await;
        pb.finish_and_clear();

        let day = match loaded {
            Ok(day) => day,
            Err(DomainError::InsufficientData) => {
                print_colored(Color::Yellow, &describe(&DomainError::InsufficientData));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let next = self.prayer.next_prayer(&day)?;
        render_day(&day, &next);
        println!("Press Ctrl-C to return to the menu.");

        let mut out = stdout();
        self.prayer
            .run_clock(&day, shutdown_signal(), |tick| {
                render_countdown(&mut out, tick)
            })
            .await?;
        println!();
        Ok(())
    }

    async fn run_qibla(&self) -> Result<(), DomainError> {
        let mut compass = QiblaCompass::new(Arc::clone(&self.sensor), Arc::clone(&self.location));

        let pb = progress::spinner("Setting up compass...");
        let armed = compass.arm().await;
        pb.finish_and_clear();

        let bearing = match armed {
            Ok(bearing) => bearing,
            Err(DomainError::Unavailable(reason)) => {
                print_colored(Color::Red, &reason.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        print_colored(rgb(MINT), &format!("Qibla: {} from true north", bearing));
        println!("Turn the device until the arrow points straight up. Ctrl-C to stop.");

        let mut out = stdout();
        let samples = compass
            .run(shutdown_signal(), |rotation| {
                render_rotation(&mut out, rotation)
            })
            .await?;
        println!();
        info!(samples, "compass session ended");
        Ok(())
    }
}

/// Completes on Ctrl-C.
fn shutdown_signal() -> impl Future<Output = ()> {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C; stopping immediately");
        }
    }
}

/// User-facing text for an error.
fn describe(err: &DomainError) -> String {
    match err {
        DomainError::InsufficientData => "Loading prayer times...".to_string(),
        DomainError::Unavailable(reason) => reason.to_string(),
        DomainError::TimeProvider(_) => {
            format!("{}. Check your internet connection.", err)
        }
        other => other.to_string(),
    }
}

fn print_colored(color: Color, text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print("\r\n"));
}

fn render_day(day: &PrayerDay, next: &NextPrayer) {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Bold));
    let _ = out.execute(Print(format!("{}\r\n", day.date.format("%-d %B %Y, %A"))));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    if let Some(hijri) = &day.hijri {
        let _ = out.execute(Print(format!("{}\r\n", hijri)));
    }
    let _ = out.execute(Print(format!("{}\r\n", place_line(day))));
    if day.used_fallback {
        let _ = out.execute(SetForegroundColor(Color::Yellow));
        let _ = out.execute(Print(
            "Could not get your location; showing times for the default location.\r\n",
        ));
        let _ = out.execute(ResetColor);
    }
    let _ = out.execute(Print("\r\n"));

    for slot in day.schedule.slots() {
        let is_next = slot.label == next.label;
        let line = format!(
            "{} {:<8} {}\r\n",
            if is_next { "▶" } else { " " },
            slot.label,
            slot.boundary
        );
        if is_next {
            let _ = out.execute(SetForegroundColor(rgb(MARKER)));
            let _ = out.execute(Print(line));
            let _ = out.execute(ResetColor);
        } else {
            let _ = out.execute(Print(line));
        }
    }
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

/// Place label with the coordinates the times were computed for.
fn place_line(day: &PrayerDay) -> String {
    if day.place == day.point.to_string() {
        format!("Location: {}", day.place)
    } else {
        format!("Location: {} ({})", day.place, day.point)
    }
}

fn render_countdown(out: &mut Stdout, tick: &ClockTick) {
    let mut line = format!(
        "{}  Next: {} at {}  remaining {}",
        tick.now.format("%H:%M:%S"),
        tick.next.label,
        tick.next.boundary,
        tick.next.remaining_display()
    );
    if tick.day_changed {
        line.push_str("  (new day, reopen to refresh)");
    }
    let _ = out.execute(MoveToColumn(0));
    let _ = out.execute(Clear(ClearType::CurrentLine));
    let _ = out.execute(Print(line));
    let _ = out.flush();
}

fn render_rotation(out: &mut Stdout, rotation: RelativeRotation) {
    let status = if is_aligned(rotation) {
        "facing the Qibla"
    } else {
        ""
    };
    let _ = out.execute(MoveToColumn(0));
    let _ = out.execute(Clear(ClearType::CurrentLine));
    let _ = out.execute(Print(format!(
        "{}  rotation {:>7}  {}",
        indicator_arrow(rotation),
        rotation.to_string(),
        status
    )));
    let _ = out.flush();
}

/// Arrow glyph for an upward-pointing indicator rotated clockwise by `rotation`.
fn indicator_arrow(rotation: RelativeRotation) -> &'static str {
    const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let turned = rotation.degrees().rem_euclid(360.0);
    let octant = ((turned + 22.5) / 45.0) as usize % ARROWS.len();
    ARROWS[octant]
}

/// Display-only check; the rotation value itself stays unnormalised.
fn is_aligned(rotation: RelativeRotation) -> bool {
    let turned = rotation.degrees().rem_euclid(360.0);
    turned <= ALIGNED_TOLERANCE_DEG || turned >= 360.0 - ALIGNED_TOLERANCE_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DailySchedule, GeoPoint, Prayer, PrayerSlot, TimeOfDay, UnavailableReason};
    use chrono::NaiveDate;

    fn day(place: &str, point: GeoPoint) -> PrayerDay {
        let slots: Vec<PrayerSlot> = Prayer::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| PrayerSlot::for_prayer(*p, TimeOfDay::from_hm(4 + 3 * i as u32, 0)))
            .collect();
        PrayerDay {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            point,
            place: place.to_string(),
            used_fallback: false,
            schedule: DailySchedule::try_from(slots).unwrap(),
            hijri: None,
        }
    }

    #[test]
    fn test_place_line_shows_name_and_coordinates() {
        let point = GeoPoint::new(41.0082, 28.9784).unwrap();
        assert_eq!(
            place_line(&day("İstanbul, Türkiye", point)),
            "Location: İstanbul, Türkiye (41.0082, 28.9784)"
        );
        assert_eq!(
            place_line(&day(&point.to_string(), point)),
            "Location: 41.0082, 28.9784"
        );
    }

    #[test]
    fn test_indicator_arrow_octants() {
        assert_eq!(indicator_arrow(RelativeRotation(0.0)), "↑");
        assert_eq!(indicator_arrow(RelativeRotation(-90.0)), "←");
        assert_eq!(indicator_arrow(RelativeRotation(90.0)), "→");
        assert_eq!(indicator_arrow(RelativeRotation(-152.0)), "↙");
        assert_eq!(indicator_arrow(RelativeRotation(350.0)), "↑");
        assert_eq!(indicator_arrow(RelativeRotation(540.0)), "↓");
    }

    #[test]
    fn test_is_aligned_wraps() {
        assert!(is_aligned(RelativeRotation(0.0)));
        assert!(is_aligned(RelativeRotation(-3.0)));
        assert!(is_aligned(RelativeRotation(358.0)));
        assert!(is_aligned(RelativeRotation(-358.0)));
        assert!(!is_aligned(RelativeRotation(-151.6)));
    }

    #[test]
    fn test_describe_loading_and_unavailable() {
        assert_eq!(
            describe(&DomainError::InsufficientData),
            "Loading prayer times..."
        );
        assert_eq!(
            describe(&DomainError::Unavailable(UnavailableReason::SensorMissing)),
            UnavailableReason::SensorMissing.to_string()
        );
    }
}
