use serde::{Deserialize, Serialize};

pub type VenueId = String;

const DATE_PLACEHOLDER: &str = "{date}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub url_template: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Venue {
    pub fn url_for_date(&self, date: &str) -> String {
        self.url_template.replace(DATE_PLACEHOLDER, date)
    }
}

/// Venues to check this run. With no explicit ids, every enabled venue;
/// otherwise the venues whose id was asked for, enabled or not. Unknown ids
/// are dropped. Catalog order is kept either way.
pub fn resolve_venues(all_venues: &[Venue], requested_ids: &[VenueId]) -> Vec<Venue> {
    all_venues
        .iter()
        .filter(|venue| {
            if requested_ids.is_empty() {
                venue.enabled
            } else {
                requested_ids.contains(&venue.id)
            }
        })
        .cloned()
        .collect()
}
