use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn sort_by_key_ref<T, B, F>(slice: &mut [T], mut f: F)
where
    F: FnMut(&T) -> &B,
    B: Ord,
{
    slice.sort_by(|a, b| f(a).cmp(f(b)))
}

/// Renders `2025-10-20` as `Monday Oct. 20`. Anything that isn't a
/// `YYYY-MM-DD` date comes back untouched.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => parsed.format("%A %b. %-d").to_string(),
        Err(_) => date.to_string(),
    }
}
