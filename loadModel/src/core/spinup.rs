use rand::Rng;

use crate::config::centrifuge_params::SpinupWindow;
use crate::config::constants::{DAYS_IN_YEAR, HOURS_PER_DAY};

/// Extra power drawn while one machine spins up, spread over the hour it lands in.
#[derive(Debug, Clone, Copy)]
pub struct SpinupLoad {
    pub extra_kw_per_machine: f64,   // (power_factor - 1) * per-machine kW
    pub minutes_fraction: f64,       // spin-up minutes / 60
}

impl SpinupLoad {
    pub fn kw_for(&self, count: u64) -> f64 {
        count as f64 * self.extra_kw_per_machine * self.minutes_fraction
    }
}

/// Hourly spin-up kW and restart counts for the year.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinupSchedule {
    pub spinup_kw: Vec<f64>,
    pub spinup_count: Vec<u64>,
}

/// Scatter daily restarts across the restart window.
///
/// For each day, in order, all `machines_per_day` hour-of-day draws are taken
/// from `rng` in one batch (uniform over the window, with replacement). Draws
/// that land on a downtime hour are discarded.
pub fn schedule_spinups<R: Rng>(
    rng: &mut R,
    machines_per_day: u64,
    window: SpinupWindow,
    running_mask: &[bool],
    load: SpinupLoad,
) -> SpinupSchedule {
    let hours = running_mask.len();
    let mut spinup_kw = vec![0.0; hours];
    let mut spinup_count = vec![0u64; hours];

    if machines_per_day == 0 || window.is_empty() {
        return SpinupSchedule { spinup_kw, spinup_count };
    }

    for day in 0..DAYS_IN_YEAR {
        let mut tally = [0u64; HOURS_PER_DAY];
        for _ in 0..machines_per_day {
            tally[rng.gen_range(window.hours())] += 1;
        }

        for (hour_of_day, &count) in tally.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let hour_idx = day * HOURS_PER_DAY + hour_of_day;
            if hour_idx < hours && running_mask[hour_idx] {
                spinup_kw[hour_idx] += load.kw_for(count);
                spinup_count[hour_idx] += count;
            }
        }
    }

    SpinupSchedule { spinup_kw, spinup_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::HOURS_IN_YEAR;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LOAD: SpinupLoad = SpinupLoad { extra_kw_per_machine: 10.0, minutes_fraction: 0.5 };

    #[test]
    fn restarts_stay_inside_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let window = SpinupWindow { start: 6, end: 22 };
        let mask = vec![true; HOURS_IN_YEAR];
        let schedule = schedule_spinups(&mut rng, 17, window, &mask, LOAD);

        for (idx, &count) in schedule.spinup_count.iter().enumerate() {
            if count > 0 {
                assert!(window.contains(idx % HOURS_PER_DAY));
            }
        }
        assert_eq!(schedule.spinup_count.iter().sum::<u64>(), 17 * DAYS_IN_YEAR as u64);
    }

    #[test]
    fn spinup_kw_scales_with_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let window = SpinupWindow { start: 9, end: 10 };
        let mask = vec![true; HOURS_IN_YEAR];
        let schedule = schedule_spinups(&mut rng, 4, window, &mask, LOAD);

        assert_eq!(schedule.spinup_count[9], 4);
        assert!((schedule.spinup_kw[9] - 20.0).abs() < 1e-12);
        assert_eq!(schedule.spinup_count[10], 0);
    }

    #[test]
    fn downtime_hours_absorb_no_restarts() {
        let mut rng = StdRng::seed_from_u64(5);
        let window = SpinupWindow { start: 0, end: 1 };
        let mut mask = vec![true; HOURS_IN_YEAR];
        mask[0] = false;
        let schedule = schedule_spinups(&mut rng, 3, window, &mask, LOAD);

        assert_eq!(schedule.spinup_count[0], 0);
        assert_eq!(schedule.spinup_kw[0], 0.0);
        assert_eq!(schedule.spinup_count[24], 3);
    }

    #[test]
    fn zero_restarts_leave_schedule_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let mask = vec![true; HOURS_IN_YEAR];
        let schedule = schedule_spinups(&mut rng, 0, SpinupWindow { start: 6, end: 22 }, &mask, LOAD);
        assert!(schedule.spinup_kw.iter().all(|kw| *kw == 0.0));
    }
}
