//! Wire types for the venue booking API.
//!
//! Each venue exposes one endpoint that returns every court ("resource") with
//! its scheduled sessions for a window of days.

use serde::Deserialize;

pub const DEFAULT_EARLIEST_START: i64 = 420;
pub const DEFAULT_LATEST_END: i64 = 1320;
pub const DEFAULT_MINIMUM_INTERVAL: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedResponse {
    #[serde(default = "default_earliest_start")]
    pub earliest_start_time: i64,
    #[serde(default = "default_latest_end")]
    pub latest_end_time: i64,
    #[serde(default = "default_minimum_interval")]
    pub minimum_interval: i64,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

fn default_earliest_start() -> i64 {
    DEFAULT_EARLIEST_START
}

fn default_latest_end() -> i64 {
    DEFAULT_LATEST_END
}

fn default_minimum_interval() -> i64 {
    DEFAULT_MINIMUM_INTERVAL
}

impl FeedResponse {
    pub fn booking_window(&self) -> BookingWindow {
        BookingWindow {
            earliest_start: self.earliest_start_time,
            latest_end: self.latest_end_time,
            minimum_interval: self.minimum_interval,
        }
    }
}

/// A single court.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    pub name: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Resource {
    /// The day whose `Date` starts with `date`; upstream dates carry a time
    /// suffix (`2025-10-20T00:00:00`).
    pub fn day_for(&self, date: &str) -> Option<&Day> {
        self.days.iter().find(|day| day.date.starts_with(date))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Day {
    pub date: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
}

impl Session {
    /// Category 0 is the open-for-booking category; anything else is a block,
    /// a lesson, a booking and so on.
    pub fn is_bookable(&self) -> bool {
        self.category == Some(0) && self.capacity >= 1
    }

    /// `(start, end)` when upstream sent both; blocked sessions often don't.
    pub fn times(&self) -> Option<(i64, i64)> {
        Some((self.start_time?, self.end_time?))
    }
}

/// Venue-level booking limits, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub earliest_start: i64,
    pub latest_end: i64,
    pub minimum_interval: i64,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self {
            earliest_start: DEFAULT_EARLIEST_START,
            latest_end: DEFAULT_LATEST_END,
            minimum_interval: DEFAULT_MINIMUM_INTERVAL,
        }
    }
}

impl BookingWindow {
    pub fn contains(&self, start: i64, end: i64) -> bool {
        start >= self.earliest_start && end <= self.latest_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_venue_limits_fall_back_to_defaults() {
        let feed: FeedResponse = serde_json::from_value(json!({ "Resources": [] })).unwrap();
        assert_eq!(feed.booking_window(), BookingWindow::default());
    }

    #[test]
    fn session_without_capacity_is_not_bookable() {
        let session: Session =
            serde_json::from_value(json!({ "Category": 0, "StartTime": 420, "EndTime": 480 }))
                .unwrap();
        assert_eq!(session.capacity, 0);
        assert!(!session.is_bookable());
    }

    #[test]
    fn session_without_category_is_not_bookable() {
        let session: Session =
            serde_json::from_value(json!({ "Capacity": 4, "StartTime": 420, "EndTime": 480 }))
                .unwrap();
        assert!(!session.is_bookable());
    }

    #[test]
    fn blocked_session_without_times_still_decodes() {
        let day: Day = serde_json::from_value(json!({
            "Date": "2025-10-20T00:00:00",
            "Sessions": [
                { "Category": 1000, "Capacity": 0 },
                { "Category": 0, "Capacity": 1, "StartTime": 420, "EndTime": 480 }
            ]
        }))
        .unwrap();

        assert_eq!(day.sessions.len(), 2);
        assert_eq!(day.sessions[0].times(), None);
        assert_eq!(day.sessions[1].times(), Some((420, 480)));
    }

    #[test]
    fn day_lookup_matches_on_date_prefix() {
        let resource: Resource = serde_json::from_value(json!({
            "Name": "Court 1",
            "Days": [
                { "Date": "2025-10-19T00:00:00", "Sessions": [] },
                { "Date": "2025-10-20T00:00:00", "Sessions": [] }
            ]
        }))
        .unwrap();

        assert_eq!(
            resource.day_for("2025-10-20").map(|d| d.date.as_str()),
            Some("2025-10-20T00:00:00")
        );
        assert!(resource.day_for("2025-10-21").is_none());
    }
}
