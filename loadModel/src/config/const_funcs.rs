use std::f64::consts::PI;

use super::constants::{MONTHS_PER_YEAR, MONTH_LENGTHS};

/// Calendar month (1-12) and day of month (1-based) for a day index in a
/// 365-day year. Day indices past the end of the year land in December.
pub fn month_and_day(day_of_year: usize) -> (u32, u32) {
    let mut remaining = day_of_year;
    for (month_idx, &length) in MONTH_LENGTHS.iter().enumerate() {
        if remaining < length {
            return (month_idx as u32 + 1, remaining as u32 + 1);
        }
        remaining -= length;
    }
    (12, MONTH_LENGTHS[11] as u32)
}

/// HVAC multiplier for a month: a cosine with its maximum at `peak_month`.
/// Amplitudes above 1 give negative multipliers in the trough; not clamped.
pub fn seasonal_multiplier(month: u32, peak_month: u32, amplitude: f64) -> f64 {
    let angle = (month as f64 - peak_month as f64) * (2.0 * PI / MONTHS_PER_YEAR);
    1.0 + amplitude * angle.cos()
}

/// Number of machines needed to deliver the plant's SWU target.
/// Caller guarantees `machine_swu_per_year > 0`.
pub fn machine_count(plant_swu_per_year: f64, machine_swu_per_year: f64) -> u64 {
    (plant_swu_per_year / machine_swu_per_year).ceil() as u64
}

/// Round half to even, matching the rounding used for hour and restart counts.
pub fn round_half_even(value: f64) -> u64 {
    value.round_ties_even().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_boundaries_follow_non_leap_calendar() {
        assert_eq!(month_and_day(0), (1, 1));
        assert_eq!(month_and_day(31), (2, 1));
        assert_eq!(month_and_day(58), (2, 28));
        assert_eq!(month_and_day(59), (3, 1));
        assert_eq!(month_and_day(364), (12, 31));
    }

    #[test]
    fn seasonal_multiplier_peaks_at_peak_month() {
        assert!((seasonal_multiplier(7, 7, 0.2) - 1.2).abs() < 1e-12);
        assert!((seasonal_multiplier(1, 7, 0.2) - 0.8).abs() < 1e-12);
        assert!((seasonal_multiplier(4, 7, 0.2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn large_amplitude_goes_negative() {
        assert!(seasonal_multiplier(1, 7, 1.5) < 0.0);
    }

    #[test]
    fn machine_count_rounds_up() {
        assert_eq!(machine_count(1_000_000.0, 300.0), 3334);
        assert_eq!(machine_count(900.0, 300.0), 3);
        assert_eq!(machine_count(0.0, 300.0), 0);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(3.5), 4);
        assert_eq!(round_half_even(8409.6), 8410);
        assert_eq!(round_half_even(16.67), 17);
    }
}
