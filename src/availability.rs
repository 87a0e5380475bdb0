use log::trace;

use crate::{
    feed::{BookingWindow, Day},
    utils::sort_by_key_ref,
};

const MINUTES_PER_HOUR: i64 = 60;

/// A bookable range on one court, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// `7am`, `12pm`, `2pm`
    #[default]
    TwelveHour,
    /// `07:00`, `14:00`
    TwentyFourHour,
}

impl TimeFormat {
    pub fn render(&self, minutes: i64) -> String {
        match self {
            TimeFormat::TwelveHour => minutes_to_time(minutes),
            TimeFormat::TwentyFourHour => minutes_to_clock(minutes),
        }
    }
}

/// Bookable slots of one court for one day, ascending by start time.
///
/// The venue window isn't enforced; sessions outside it are only traced.
pub fn parse_availability(day: &Day, window: &BookingWindow) -> Vec<Slot> {
    let mut slots: Vec<Slot> = day
        .sessions
        .iter()
        .filter(|session| session.is_bookable())
        .filter_map(|session| {
            let Some((start, end)) = session.times() else {
                trace!("Skipping bookable session without times on {}", day.date);
                return None;
            };
            Some(Slot { start, end })
        })
        .collect();

    for slot in slots.iter().filter(|s| !window.contains(s.start, s.end)) {
        trace!(
            "Bookable session {}-{} on {} falls outside the venue window {}-{}",
            slot.start, slot.end, day.date, window.earliest_start, window.latest_end
        );
    }

    sort_by_key_ref(&mut slots, |slot| &slot.start);
    slots
}

/// One label per hour start inside each slot, end exclusive.
pub fn expand_time_slots(slots: &[Slot], format: TimeFormat) -> Vec<String> {
    slots
        .iter()
        .flat_map(|slot| {
            (slot.start..slot.end)
                .step_by(MINUTES_PER_HOUR as usize)
                .map(move |minutes| format.render(minutes))
        })
        .collect()
}

/// 12-hour shorthand, minutes dropped: `420 -> "7am"`, `780 -> "1pm"`.
pub fn minutes_to_time(minutes: i64) -> String {
    let hours = minutes.div_euclid(MINUTES_PER_HOUR);
    match hours {
        0 => "12am".to_string(),
        1..=11 => format!("{hours}am"),
        12 => "12pm".to_string(),
        _ => format!("{}pm", hours - 12),
    }
}

/// 24-hour `HH:MM`: `420 -> "07:00"`.
pub fn minutes_to_clock(minutes: i64) -> String {
    format!(
        "{:02}:{:02}",
        minutes.div_euclid(MINUTES_PER_HOUR),
        minutes.rem_euclid(MINUTES_PER_HOUR)
    )
}

/// The availability string for one court, e.g. `Court 1: 7am, 8am`. This text
/// is what gets compared against the previous run, so its shape must stay put.
pub fn format_court_availability(court_name: &str, hour_starts: &[String]) -> String {
    format!("{court_name}: {}", hour_starts.join(", "))
}
