use log::{info, warn};

use crate::{
    availability::{TimeFormat, expand_time_slots, format_court_availability, parse_availability},
    feed::FeedResponse,
    requests::VenueFeed,
    venue::Venue,
};

/// Availability strings for one venue on `date`, one per court with at least
/// one bookable slot. A venue that can't be fetched or decoded yields nothing.
pub async fn check_venue(
    feed: &impl VenueFeed,
    venue: &Venue,
    date: &str,
    format: TimeFormat,
) -> Vec<String> {
    let url = venue.url_for_date(date);
    info!("Checking {} ({url})", venue.name);

    match feed.fetch_feed(&url).await {
        Ok(response) => court_availability(&response, date, format),
        Err(e) => {
            warn!("Error fetching data for {}: {e:#}", venue.name);
            vec![]
        }
    }
}

pub fn court_availability(response: &FeedResponse, date: &str, format: TimeFormat) -> Vec<String> {
    let window = response.booking_window();
    let mut venue_availability = vec![];

    for resource in &response.resources {
        let Some(day) = resource.day_for(date) else {
            info!("{}: No data for {date}", resource.name);
            continue;
        };

        let slots = parse_availability(day, &window);
        if slots.is_empty() {
            info!("{}: No availability", resource.name);
            continue;
        }

        let hour_starts = expand_time_slots(&slots, format);
        let result = format_court_availability(&resource.name, &hour_starts);
        info!("{result}");
        venue_availability.push(result);
    }

    venue_availability
}
