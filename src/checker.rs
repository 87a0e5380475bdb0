//! One pass over the configured venues for a single date: fetch every venue,
//! diff against the last snapshot, notify, persist.

use std::collections::BTreeMap;

use log::info;

use crate::{
    config::{CheckerConfig, NotifyMode, VenueCatalog},
    diff::get_new_slots,
    notifier::{Notifier, PushoverNotifier},
    requests::{RequestClient, VenueFeed},
    state::{StateSnapshot, VenueState},
    utils::format_date,
    venue::{VenueId, resolve_venues},
    venue_checker::check_venue,
};

pub const NOTIFICATION_TITLE: &str = "Tennis Courts Available";
const NEW_SLOTS_PREFIX: &str = "New courts available";
const ANY_SLOTS_PREFIX: &str = "Courts available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueAvailability {
    pub id: VenueId,
    pub name: String,
    pub availability: Vec<String>,
}

/// Availability strings grouped under a venue's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSlots {
    pub venue_name: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Every checked venue, in check order.
    pub venues: Vec<VenueAvailability>,
    pub notified: bool,
    /// Only filled in when diffing against the previous snapshot.
    pub new_slots: Option<Vec<VenueSlots>>,
}

impl CheckResult {
    pub fn has_availability(&self) -> bool {
        self.venues.iter().any(|v| !v.availability.is_empty())
    }

    pub fn total_slots(&self) -> usize {
        self.venues.iter().map(|v| v.availability.len()).sum()
    }

    /// Whether the run counts as a success for the process exit code: something
    /// was sent or at least one court was open.
    pub fn is_success(&self) -> bool {
        self.notified || self.has_availability()
    }
}

pub struct AvailabilityChecker<F, N> {
    config: CheckerConfig,
    feed: F,
    notifier: Option<N>,
}

impl AvailabilityChecker<RequestClient, PushoverNotifier> {
    /// Live checker; Pushover is only wired up when the config carries
    /// credentials.
    pub fn from_config(config: CheckerConfig, request_client: RequestClient) -> Self {
        let notifier = config
            .credentials
            .clone()
            .map(|credentials| PushoverNotifier::new(request_client.client().clone(), credentials));
        Self::new(config, request_client, notifier)
    }
}

impl<F: VenueFeed, N: Notifier> AvailabilityChecker<F, N> {
    pub fn new(config: CheckerConfig, feed: F, notifier: Option<N>) -> Self {
        Self {
            config,
            feed,
            notifier,
        }
    }

    pub async fn check_all_venues(&self, date: &str, venue_ids: &[VenueId]) -> CheckResult {
        let venues = resolve_venues(&VenueCatalog::load(&self.config.venues_file), venue_ids);
        if venues.is_empty() {
            info!(
                "No venues enabled. Please check {}",
                self.config.venues_file.display()
            );
            return CheckResult::default();
        }

        let diffing = self.config.notify_mode == NotifyMode::OnChanges;
        let previous = if diffing {
            self.config.state.load(date)
        } else {
            StateSnapshot::default()
        };

        let mut results = vec![];
        let mut new_by_venue = vec![];

        for venue in &venues {
            let availability =
                check_venue(&self.feed, venue, date, self.config.time_format).await;

            if diffing {
                let new_slots = get_new_slots(&availability, previous.availability_for(&venue.id));

                if availability.is_empty() {
                    info!("No availability at {}", venue.name);
                } else if new_slots.is_empty() {
                    info!("All slots at {} were already known", venue.name);
                } else {
                    info!("{} new slot(s) detected at {}", new_slots.len(), venue.name);
                }

                if !new_slots.is_empty() {
                    new_by_venue.push(VenueSlots {
                        venue_name: venue.name.clone(),
                        slots: new_slots,
                    });
                }
            }

            results.push(VenueAvailability {
                id: venue.id.clone(),
                name: venue.name.clone(),
                availability,
            });
        }

        let mut result = CheckResult {
            venues: results,
            notified: false,
            new_slots: None,
        };

        match self.config.notify_mode {
            NotifyMode::OnChanges => {
                if !new_by_venue.is_empty() {
                    let total: usize = new_by_venue.iter().map(|v| v.slots.len()).sum();
                    info!("{total} total new slot(s) across all venues!");
                    result.notified = self.notify(date, &new_by_venue, NEW_SLOTS_PREFIX).await;
                } else if result.has_availability() {
                    info!(
                        "{} slot(s) found, but all were already known (no notification sent)",
                        result.total_slots()
                    );
                } else {
                    info!("No availability found at any venue");
                }

                self.config.state.save(date, &snapshot_of(&result.venues));
                result.new_slots = Some(new_by_venue);
            }
            NotifyMode::Always => {
                if result.has_availability() {
                    info!("{} slot(s) available across all venues", result.total_slots());
                    let all_by_venue: Vec<VenueSlots> = result
                        .venues
                        .iter()
                        .filter(|v| !v.availability.is_empty())
                        .map(|v| VenueSlots {
                            venue_name: v.name.clone(),
                            slots: v.availability.clone(),
                        })
                        .collect();
                    result.notified = self.notify(date, &all_by_venue, ANY_SLOTS_PREFIX).await;
                } else {
                    info!("No availability found at any venue");
                }
            }
        }

        result
    }

    async fn notify(&self, date: &str, by_venue: &[VenueSlots], prefix: &str) -> bool {
        let Some(notifier) = &self.notifier else {
            return false;
        };
        let message = build_message(date, by_venue, prefix);
        notifier.send(&message, NOTIFICATION_TITLE).await
    }
}

fn snapshot_of(venues: &[VenueAvailability]) -> StateSnapshot {
    let venues: BTreeMap<VenueId, VenueState> = venues
        .iter()
        .map(|v| {
            (
                v.id.clone(),
                VenueState {
                    name: v.name.clone(),
                    availability: v.availability.clone(),
                },
            )
        })
        .collect();
    StateSnapshot::stamped_now(venues)
}

pub fn build_message(date: &str, by_venue: &[VenueSlots], prefix: &str) -> String {
    let mut parts = vec![format!("{prefix} on {}:\n", format_date(date))];
    for venue in by_venue {
        parts.push(format!("\n📍 {}:", venue.venue_name));
        parts.extend(venue.slots.iter().map(|slot| format!("  • {slot}")));
    }
    parts.join("\n")
}
