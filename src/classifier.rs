use crate::gpx_types::{Group, Waypoint};

/// Transect prefix rules, checked in order; the first hit wins.
// TODO: anchor the prefix on the trailing dot — a two-digit transect
// name like "T10.1" currently lands in Transect 1.
const GROUP_RULES: [(&str, Group); 3] = [
    ("T1", Group::Transect1),
    ("T2", Group::Transect2),
    ("T3", Group::Transect3),
];

/// Classify a waypoint name into its survey group.
///
/// Names that match no rule stay unassigned; that is a valid state,
/// not an error.
pub fn classify(name: &str) -> Group {
    for (prefix, group) in GROUP_RULES {
        if name.starts_with(prefix) {
            return group;
        }
    }
    Group::Unassigned
}

/// Assign each waypoint its group. The only mutation after load.
pub fn assign_groups(waypoints: &mut [Waypoint]) {
    for wpt in waypoints {
        wpt.group = wpt.name.as_deref().map_or(Group::Unassigned, classify);
    }
}

/// Waypoint count per group, in legend order.
pub fn group_counts(waypoints: &[Waypoint]) -> Vec<(Group, usize)> {
    Group::ALL
        .iter()
        .map(|&group| {
            let count = waypoints.iter().filter(|w| w.group == group).count();
            (group, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transect_prefixes() {
        assert_eq!(classify("T1.1"), Group::Transect1);
        assert_eq!(classify("T2.5"), Group::Transect2);
        assert_eq!(classify("T3.2"), Group::Transect3);
    }

    #[test]
    fn test_unmatched_names() {
        assert_eq!(classify("Waypoint1"), Group::Unassigned);
        assert_eq!(classify("BaseCamp"), Group::Unassigned);
        assert_eq!(classify(""), Group::Unassigned);
        assert_eq!(classify("T4.1"), Group::Unassigned);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(classify("t1.1"), Group::Unassigned);
    }

    // Pins the known ambiguity of the bare prefix rule.
    #[test]
    fn test_two_digit_transect_matches_first_rule() {
        assert_eq!(classify("T10.1"), Group::Transect1);
        assert_eq!(classify("T21.3"), Group::Transect2);
    }

    #[test]
    fn test_assign_groups() {
        let mut waypoints = vec![
            named_waypoint(Some("T1.1")),
            named_waypoint(Some("T3.2")),
            named_waypoint(Some("BaseCamp")),
            named_waypoint(None),
        ];
        assign_groups(&mut waypoints);
        assert_eq!(waypoints[0].group, Group::Transect1);
        assert_eq!(waypoints[1].group, Group::Transect3);
        assert_eq!(waypoints[2].group, Group::Unassigned);
        assert_eq!(waypoints[3].group, Group::Unassigned);
    }

    #[test]
    fn test_group_counts() {
        let mut waypoints = vec![
            named_waypoint(Some("T1.1")),
            named_waypoint(Some("T1.2")),
            named_waypoint(Some("T2.1")),
            named_waypoint(Some("shed")),
        ];
        assign_groups(&mut waypoints);
        let counts = group_counts(&waypoints);
        assert_eq!(counts[0], (Group::Transect1, 2));
        assert_eq!(counts[1], (Group::Transect2, 1));
        assert_eq!(counts[2], (Group::Transect3, 0));
        assert_eq!(counts[3], (Group::Unassigned, 1));
    }

    fn named_waypoint(name: Option<&str>) -> Waypoint {
        let mut wpt = Waypoint::new(33.444, 130.001);
        wpt.name = name.map(str::to_string);
        wpt
    }
}
