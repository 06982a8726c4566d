use chrono::{NaiveDate, NaiveDateTime};

use crate::config::const_funcs::month_and_day;
use crate::config::constants::{HOURS_IN_YEAR, HOURS_PER_DAY};
use crate::utils::errors::LoadModelError;

/// Hourly index for the model year.
///
/// The year is always treated as 365 days: in leap years Feb 29 is skipped and
/// the last row is still Dec 31 23:00.
#[derive(Debug, Clone)]
pub struct Timeline {
    timestamps: Vec<NaiveDateTime>,
    months: Vec<u32>,
}

impl Timeline {
    pub fn for_year(year: i32) -> Result<Self, LoadModelError> {
        let mut timestamps = Vec::with_capacity(HOURS_IN_YEAR);
        let mut months = Vec::with_capacity(HOURS_IN_YEAR);

        for hour in 0..HOURS_IN_YEAR {
            let (month, day) = month_and_day(hour / HOURS_PER_DAY);
            let hour_of_day = (hour % HOURS_PER_DAY) as u32;
            let timestamp = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour_of_day, 0, 0))
                .ok_or_else(|| {
                    LoadModelError::invalid("year", format!("{} has no calendar date {}-{}", year, month, day))
                })?;
            timestamps.push(timestamp);
            months.push(month);
        }

        Ok(Self { timestamps, months })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn leap_year_still_has_8760_hours_without_feb_29() {
        let timeline = Timeline::for_year(2024).unwrap();
        assert_eq!(timeline.len(), HOURS_IN_YEAR);
        assert!(!timeline.timestamps().iter().any(|ts| ts.month() == 2 && ts.day() == 29));

        let last = timeline.timestamps()[HOURS_IN_YEAR - 1];
        assert_eq!((last.month(), last.day(), last.hour()), (12, 31, 23));
    }

    #[test]
    fn months_track_timestamps() {
        let timeline = Timeline::for_year(2025).unwrap();
        for (ts, month) in timeline.timestamps().iter().zip(timeline.months()) {
            assert_eq!(ts.month(), *month);
        }
        assert_eq!(timeline.timestamps()[0].hour(), 0);
        assert_eq!(timeline.timestamps()[25].hour(), 1);
    }
}
