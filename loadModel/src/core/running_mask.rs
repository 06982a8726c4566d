use crate::config::const_funcs::round_half_even;
use crate::config::constants::HOURS_IN_YEAR;

/// Per-hour running flags for the fleet.
///
/// Exactly `round(8760 * availability)` hours run. Downtime hours sit at evenly
/// spaced indices from hour 0 to hour 8759 so outages are spread across the
/// year. Placement does not depend on the random seed.
pub fn build_running_mask(availability: f64) -> Vec<bool> {
    let mut mask = vec![true; HOURS_IN_YEAR];
    let running_hours = (round_half_even(HOURS_IN_YEAR as f64 * availability) as usize).min(HOURS_IN_YEAR);
    let downtime = HOURS_IN_YEAR - running_hours;

    for idx in downtime_indices(downtime) {
        mask[idx] = false;
    }
    mask
}

// Evenly spaced integer positions over [0, 8759], truncated toward zero.
fn downtime_indices(count: usize) -> impl Iterator<Item = usize> {
    let last = (HOURS_IN_YEAR - 1) as f64;
    let step = if count > 1 { last / (count - 1) as f64 } else { 0.0 };
    (0..count).map(move |i| {
        if count > 1 && i == count - 1 {
            HOURS_IN_YEAR - 1
        } else {
            (i as f64 * step) as usize
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downtime(mask: &[bool]) -> usize {
        mask.iter().filter(|running| !**running).count()
    }

    #[test]
    fn downtime_count_is_exact() {
        for availability in [0.0, 0.25, 0.5, 0.9, 0.96, 0.999, 1.0] {
            let mask = build_running_mask(availability);
            let expected = HOURS_IN_YEAR - round_half_even(HOURS_IN_YEAR as f64 * availability) as usize;
            assert_eq!(downtime(&mask), expected, "availability {}", availability);
        }
    }

    #[test]
    fn single_outage_lands_on_first_hour() {
        let availability = (HOURS_IN_YEAR - 1) as f64 / HOURS_IN_YEAR as f64;
        let mask = build_running_mask(availability);
        assert!(!mask[0]);
        assert_eq!(downtime(&mask), 1);
    }

    #[test]
    fn outages_are_spread_not_clustered() {
        let mask = build_running_mask(0.96);
        let positions: Vec<usize> = mask.iter().enumerate().filter(|(_, r)| !**r).map(|(i, _)| i).collect();
        assert_eq!(positions.first(), Some(&0));
        assert_eq!(positions.last(), Some(&(HOURS_IN_YEAR - 1)));
        assert!(positions.windows(2).all(|w| w[1] - w[0] >= 20));
    }
}
