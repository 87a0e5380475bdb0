//! Last-seen availability, persisted between runs as JSON.
//!
//! A snapshot file is a single object: each venue id maps to
//! `{"name": .., "availability": [..]}` and a `last_checked` key holds a naive
//! local ISO-8601 timestamp.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::venue::VenueId;

const LEGACY_STATE_FILE: &str = "availability_state.json";
const STATE_SUBDIR: &str = "state";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueState {
    pub name: String,
    #[serde(default)]
    pub availability: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub venues: BTreeMap<VenueId, VenueState>,
}

impl StateSnapshot {
    pub fn stamped_now(venues: BTreeMap<VenueId, VenueState>) -> Self {
        Self {
            last_checked: Some(Local::now().naive_local()),
            venues,
        }
    }

    pub fn availability_for(&self, venue_id: &str) -> &[String] {
        self.venues
            .get(venue_id)
            .map(|venue| venue.availability.as_slice())
            .unwrap_or_default()
    }
}

/// How snapshot files are keyed on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateLayout {
    /// `state/availability_state_<date>.json`, one baseline per checked date.
    #[default]
    PerDate,
    /// One `availability_state.json` shared by every date; only sound when a
    /// deployment checks a single date per run.
    SingleFile,
}

#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
    layout: StateLayout,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>, layout: StateLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn path_for(&self, date: &str) -> PathBuf {
        match self.layout {
            StateLayout::PerDate => self
                .root
                .join(STATE_SUBDIR)
                .join(format!("availability_state_{date}.json")),
            StateLayout::SingleFile => self.root.join(LEGACY_STATE_FILE),
        }
    }

    /// The baseline for `date`. A missing file is a first run; an unreadable
    /// one is logged and treated the same way.
    pub fn load(&self, date: &str) -> StateSnapshot {
        let path = self.path_for(date);
        match read_snapshot(&path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("No previous state at {}", path.display());
                StateSnapshot::default()
            }
            Err(e) => {
                warn!("Could not load previous state: {e:#}");
                StateSnapshot::default()
            }
        }
    }

    /// Overwrites the baseline for `date`. Failures are logged and dropped.
    pub fn save(&self, date: &str, snapshot: &StateSnapshot) {
        let path = self.path_for(date);
        if let Err(e) = write_snapshot(&path, snapshot) {
            warn!("Could not save state: {e:#}");
        }
    }
}

fn read_snapshot(path: &Path) -> anyhow::Result<Option<StateSnapshot>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("malformed state file {}", path.display()))?;
    Ok(Some(snapshot))
}

fn write_snapshot(path: &Path, snapshot: &StateSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "courtwatch-state-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn snapshot() -> StateSnapshot {
        let mut venues = BTreeMap::new();
        venues.insert(
            "north".to_string(),
            VenueState {
                name: "North Park".to_string(),
                availability: vec!["Court 1: 7am, 8am".to_string()],
            },
        );
        StateSnapshot::stamped_now(venues)
    }

    #[test]
    fn reads_the_flat_json_layout() {
        let parsed: StateSnapshot = serde_json::from_value(json!({
            "north": { "name": "North Park", "availability": ["Court 1: 7am"] },
            "south": { "name": "South Park", "availability": [] },
            "last_checked": "2025-10-20T07:00:01.123456"
        }))
        .unwrap();

        assert_eq!(parsed.venues.len(), 2);
        assert_eq!(parsed.availability_for("north"), ["Court 1: 7am"]);
        assert!(parsed.availability_for("east").is_empty());
        assert_eq!(
            parsed.last_checked.map(|t| t.to_string()),
            Some("2025-10-20 07:00:01.123456".to_string())
        );
    }

    #[test]
    fn writes_venues_next_to_last_checked() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert!(value.get("last_checked").is_some());
        assert_eq!(value["north"]["name"], "North Park");
        assert_eq!(value["north"]["availability"][0], "Court 1: 7am, 8am");
    }

    #[test]
    fn per_date_layout_round_trips() {
        let store = StateStore::new(scratch_dir("per-date"), StateLayout::PerDate);
        let saved = snapshot();

        store.save("2025-10-20", &saved);

        assert!(store.path_for("2025-10-20").ends_with("state/availability_state_2025-10-20.json"));
        assert_eq!(store.load("2025-10-20"), saved);
        assert_eq!(store.load("2025-10-21"), StateSnapshot::default());
    }

    #[test]
    fn single_file_layout_ignores_the_date() {
        let store = StateStore::new(scratch_dir("single"), StateLayout::SingleFile);
        let saved = snapshot();

        store.save("2025-10-20", &saved);

        assert_eq!(store.path_for("2025-10-21"), store.path_for("2025-10-20"));
        assert_eq!(store.load("2025-10-21"), saved);
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let store = StateStore::new(scratch_dir("malformed"), StateLayout::SingleFile);
        let path = store.path_for("2025-10-20");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(store.load("2025-10-20"), StateSnapshot::default());
    }
}
