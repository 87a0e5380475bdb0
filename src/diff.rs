/// Entries of `current` that `previous` doesn't contain, in `current`'s order.
///
/// Comparison is exact string equality on rendered availability strings, so a
/// court whose slot list changed at all shows up as new in full.
pub fn get_new_slots(current: &[String], previous: &[String]) -> Vec<String> {
    current
        .iter()
        .filter(|entry| !previous.contains(entry))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_runs_have_nothing_new() {
        let current = strings(&["Court 1: 7am", "Court 2: 8am, 9am"]);
        assert!(get_new_slots(&current, &current).is_empty());
    }

    #[test]
    fn everything_is_new_without_a_baseline() {
        let current = strings(&["Court 1: 7am", "Court 2: 8am"]);
        assert_eq!(get_new_slots(&current, &[]), current);
    }

    #[test]
    fn keeps_current_order_and_drops_known_entries() {
        let current = strings(&["Court 3: 6pm", "Court 1: 7am", "Court 2: 8am"]);
        let previous = strings(&["Court 2: 8am", "Court 9: 1pm"]);
        assert_eq!(
            get_new_slots(&current, &previous),
            strings(&["Court 3: 6pm", "Court 1: 7am"])
        );
    }

    #[test]
    fn changed_court_line_counts_as_new() {
        let current = strings(&["Court 1: 7am, 8am"]);
        let previous = strings(&["Court 1: 7am"]);
        assert_eq!(get_new_slots(&current, &previous), current);
    }
}
