use std::{fs, path::PathBuf};

use anyhow::Context;
use log::error;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    availability::TimeFormat,
    notifier::PushoverCredentials,
    state::{StateLayout, StateStore},
    venue::Venue,
};

pub const DEFAULT_CONFIG_DIR: &str = "config";
const VENUES_FILE: &str = "venues.json";

/// Notification credentials that may come from the environment (or `.env`).
#[derive(Debug, Default, Deserialize)]
pub struct NotificationEnv {
    pub pushover_user: Option<String>,
    pub pushover_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyMode {
    /// Only slots missing from the previous snapshot are announced.
    #[default]
    OnChanges,
    /// Any availability is announced and no snapshot is kept.
    Always,
}

/// Everything one checker run needs to know.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub venues_file: PathBuf,
    pub state: StateStore,
    pub credentials: Option<PushoverCredentials>,
    pub notify_mode: NotifyMode,
    pub time_format: TimeFormat,
}

impl CheckerConfig {
    /// `<dir>/venues.json` for venues and state alongside it.
    pub fn from_dir(config_dir: impl Into<PathBuf>, layout: StateLayout) -> Self {
        let config_dir = config_dir.into();
        Self {
            venues_file: config_dir.join(VENUES_FILE),
            state: StateStore::new(config_dir, layout),
            credentials: None,
            notify_mode: NotifyMode::default(),
            time_format: TimeFormat::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VenueCatalog {
    #[serde(default)]
    pub venues: Vec<Venue>,
}

impl VenueCatalog {
    pub fn read(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("{} not found", path.display()))?;
        let catalog = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse venues from {}", path.display()))?;
        Ok(catalog)
    }

    /// Venue list from `path`; a missing or broken file is logged and means no
    /// venues at all.
    pub fn load(path: &std::path::Path) -> Vec<Venue> {
        match Self::read(path) {
            Ok(catalog) => catalog.venues,
            Err(e) => {
                error!("Error loading venues: {e:#}");
                vec![]
            }
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("courtwatch-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_venues_in_file_order() {
        let path = scratch_file(
            "venues.json",
            r#"{"venues": [
                {"id": "b", "name": "B", "url_template": "https://b.test/{date}", "enabled": false},
                {"id": "a", "name": "A", "url_template": "https://a.test/{date}"}
            ]}"#,
        );

        let venues = VenueCatalog::load(&path);

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].id, "b");
        assert!(!venues[0].enabled);
        assert!(venues[1].enabled);
    }

    #[test]
    fn missing_or_malformed_catalog_means_no_venues() {
        let missing = std::env::temp_dir().join("courtwatch-definitely-missing-venues.json");
        assert!(VenueCatalog::load(&missing).is_empty());

        let broken = scratch_file("broken.json", "{\"venues\": [");
        assert!(VenueCatalog::load(&broken).is_empty());
    }

    #[test]
    fn config_dir_layout() {
        let config = CheckerConfig::from_dir("/srv/courts", StateLayout::PerDate);
        assert_eq!(config.venues_file, PathBuf::from("/srv/courts/venues.json"));
        assert_eq!(
            config.state.path_for("2025-10-20"),
            PathBuf::from("/srv/courts/state/availability_state_2025-10-20.json")
        );
        assert_eq!(config.notify_mode, NotifyMode::OnChanges);
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
    }
}
