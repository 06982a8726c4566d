use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::const_funcs::round_half_even;
use super::constants::*;
use crate::utils::errors::LoadModelError;

/// Physical and operational configuration of an enrichment plant for one model run.
///
/// Missing keys in imported JSON take the defaults below and unknown keys are
/// dropped, so a partial parameter file is always a valid overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentrifugeParams {
    // Plant-scale production
    pub plant_swu_per_year: f64,
    pub kwh_per_swu: f64,                    // electricity intensity [kWh/SWU]
    pub interpret_kwh_per_swu_as_total_plant: bool,

    // Centrifuge fleet
    pub machine_swu_per_year: f64,
    pub availability: f64,                   // 0..1
    pub num_cascades: u32,                   // informational only

    // Spin-up / restart dynamics
    pub daily_restart_fraction: f64,
    pub spinup_minutes: f64,
    pub spinup_power_factor: f64,            // multiple of steady per-machine kW
    #[serde(with = "window_pair")]
    pub spinup_window_hours: (i32, i32),     // [start, end) hour of day

    // HVAC & aux loads
    pub hvac_fraction_of_running: f64,
    pub aux_kw_constant: f64,
    pub hvac_seasonal_amplitude: f64,
    pub season_peak_month: u32,              // 1..12

    // Ride-through study
    pub ride_through_seconds: f64,
    pub critical_fraction: f64,

    pub year: i32,
    pub random_seed: u64,
}

impl Default for CentrifugeParams {
    fn default() -> Self {
        Self {
            plant_swu_per_year: DEFAULT_PLANT_SWU_PER_YEAR,
            kwh_per_swu: DEFAULT_KWH_PER_SWU,
            interpret_kwh_per_swu_as_total_plant: false,
            machine_swu_per_year: DEFAULT_MACHINE_SWU_PER_YEAR,
            availability: DEFAULT_AVAILABILITY,
            num_cascades: DEFAULT_NUM_CASCADES,
            daily_restart_fraction: DEFAULT_DAILY_RESTART_FRACTION,
            spinup_minutes: DEFAULT_SPINUP_MINUTES,
            spinup_power_factor: DEFAULT_SPINUP_POWER_FACTOR,
            spinup_window_hours: DEFAULT_SPINUP_WINDOW_HOURS,
            hvac_fraction_of_running: DEFAULT_HVAC_FRACTION_OF_RUNNING,
            aux_kw_constant: DEFAULT_AUX_KW_CONSTANT,
            hvac_seasonal_amplitude: DEFAULT_HVAC_SEASONAL_AMPLITUDE,
            season_peak_month: DEFAULT_SEASON_PEAK_MONTH,
            ride_through_seconds: DEFAULT_RIDE_THROUGH_SECONDS,
            critical_fraction: DEFAULT_CRITICAL_FRACTION,
            year: DEFAULT_YEAR,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

/// Clamped, normalized restart window: `start < end`, both within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinupWindow {
    pub start: usize,
    pub end: usize,
}

impl SpinupWindow {
    pub fn hours(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, hour_of_day: usize) -> bool {
        self.hours().contains(&hour_of_day)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl CentrifugeParams {
    /// Copy of these parameters with a different restart seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self { random_seed: seed, ..self.clone() }
    }

    pub fn annual_kwh_target(&self) -> f64 {
        self.plant_swu_per_year * self.kwh_per_swu
    }

    pub fn spinup_window(&self) -> SpinupWindow {
        let (raw_start, raw_end) = self.spinup_window_hours;
        let start = raw_start.clamp(0, WINDOW_START_MAX);
        let mut end = raw_end.clamp(WINDOW_END_MIN, WINDOW_END_MAX);
        if end <= start {
            end = (start + 1).min(WINDOW_END_MAX);
        }
        SpinupWindow { start: start as usize, end: end as usize }
    }

    /// Eager bound checks; the synthesizer never sees a record that fails these.
    pub fn validate(&self) -> Result<(), LoadModelError> {
        check_non_negative("plant_swu_per_year", self.plant_swu_per_year)?;
        check_non_negative("kwh_per_swu", self.kwh_per_swu)?;
        check_finite("machine_swu_per_year", self.machine_swu_per_year)?;
        if self.machine_swu_per_year <= 0.0 {
            return Err(LoadModelError::invalid(
                "machine_swu_per_year",
                format!("must be > 0, got {}", self.machine_swu_per_year),
            ));
        }
        check_unit_interval("availability", self.availability)?;
        if self.num_cascades < 1 {
            return Err(LoadModelError::invalid("num_cascades", "must be at least 1"));
        }
        check_unit_interval("daily_restart_fraction", self.daily_restart_fraction)?;
        check_non_negative("spinup_minutes", self.spinup_minutes)?;
        check_finite("spinup_power_factor", self.spinup_power_factor)?;
        if self.spinup_power_factor < 1.0 {
            return Err(LoadModelError::invalid(
                "spinup_power_factor",
                format!("must be >= 1, got {}", self.spinup_power_factor),
            ));
        }
        check_non_negative("hvac_fraction_of_running", self.hvac_fraction_of_running)?;
        check_non_negative("aux_kw_constant", self.aux_kw_constant)?;
        check_non_negative("hvac_seasonal_amplitude", self.hvac_seasonal_amplitude)?;
        if !(1..=12).contains(&self.season_peak_month) {
            return Err(LoadModelError::invalid(
                "season_peak_month",
                format!("must be in 1..=12, got {}", self.season_peak_month),
            ));
        }
        check_non_negative("ride_through_seconds", self.ride_through_seconds)?;
        check_unit_interval("critical_fraction", self.critical_fraction)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(LoadModelError::invalid(
                "year",
                format!("must be in {}..={}, got {}", MIN_YEAR, MAX_YEAR, self.year),
            ));
        }
        self.validate_derived()
    }

    // Field combinations: energy target, fleet size and daily restarts.
    fn validate_derived(&self) -> Result<(), LoadModelError> {
        let target = self.annual_kwh_target();
        if !target.is_finite() || target > MAX_ANNUAL_KWH_TARGET {
            return Err(LoadModelError::invalid(
                "kwh_per_swu",
                format!(
                    "plant_swu_per_year * kwh_per_swu = {} kWh exceeds {} kWh",
                    target, MAX_ANNUAL_KWH_TARGET
                ),
            ));
        }

        let machines = (self.plant_swu_per_year / self.machine_swu_per_year).ceil();
        if !machines.is_finite() || machines > MAX_MACHINES {
            return Err(LoadModelError::invalid(
                "machine_swu_per_year",
                format!(
                    "plant_swu_per_year / machine_swu_per_year needs {} machines, limit is {}",
                    machines, MAX_MACHINES
                ),
            ));
        }

        let restarts = round_half_even(self.daily_restart_fraction * machines);
        if restarts > MAX_RESTARTS_PER_DAY {
            return Err(LoadModelError::invalid(
                "daily_restart_fraction",
                format!("{} restarts per day exceeds limit of {}", restarts, MAX_RESTARTS_PER_DAY),
            ));
        }
        Ok(())
    }

    /// Parse a parameter overlay and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, LoadModelError> {
        let params: CentrifugeParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, LoadModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LoadModelError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json_string_pretty()?)?;
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), LoadModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LoadModelError::invalid(field, format!("must be finite, got {}", value)))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), LoadModelError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(LoadModelError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), LoadModelError> {
    check_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(LoadModelError::invalid(field, format!("must be in [0, 1], got {}", value)));
    }
    Ok(())
}

// The restart window travels as a 2-element JSON array.
mod window_pair {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(pair: &(i32, i32), serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq([pair.0, pair.1])
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<(i32, i32), D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<i32>::deserialize(deserializer)?;
        match values.as_slice() {
            [start, end] => Ok((*start, *end)),
            other => Err(D::Error::custom(format!(
                "spinup_window_hours must have exactly 2 elements, got {}",
                other.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CentrifugeParams::default().validate().is_ok());
    }

    #[test]
    fn json_roundtrip_ignores_unknown_keys() {
        let params = CentrifugeParams::default();
        let mut value = serde_json::to_value(&params).unwrap();
        value["extra_field"] = serde_json::json!(12345);
        assert_eq!(value["spinup_window_hours"], serde_json::json!([6, 22]));

        let reconstructed = CentrifugeParams::from_json_str(&value.to_string()).unwrap();
        assert_eq!(reconstructed, params);
    }

    #[test]
    fn partial_json_overlays_defaults() {
        let params = CentrifugeParams::from_json_str(
            r#"{"availability": 0.9, "spinup_window_hours": [8, 18], "random_seed": 7}"#,
        )
        .unwrap();
        assert_eq!(params.availability, 0.9);
        assert_eq!(params.spinup_window_hours, (8, 18));
        assert_eq!(params.random_seed, 7);
        assert_eq!(params.kwh_per_swu, DEFAULT_KWH_PER_SWU);
    }

    #[test]
    fn window_with_wrong_arity_is_rejected() {
        let err = CentrifugeParams::from_json_str(r#"{"spinup_window_hours": [1, 2, 3]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadModelError::JsonError(_)));
    }

    #[test]
    fn out_of_bounds_fields_are_rejected() {
        let cases = [
            CentrifugeParams { machine_swu_per_year: 0.0, ..Default::default() },
            CentrifugeParams { availability: 1.2, ..Default::default() },
            CentrifugeParams { critical_fraction: -0.1, ..Default::default() },
            CentrifugeParams { spinup_power_factor: 0.5, ..Default::default() },
            CentrifugeParams { season_peak_month: 13, ..Default::default() },
            CentrifugeParams { num_cascades: 0, ..Default::default() },
            CentrifugeParams { kwh_per_swu: f64::NAN, ..Default::default() },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(LoadModelError::InvalidParameter { .. })),
                "expected rejection for {:?}",
                params
            );
        }
    }

    #[test]
    fn window_is_clamped_and_normalized() {
        let window = |pair| CentrifugeParams { spinup_window_hours: pair, ..Default::default() }.spinup_window();
        assert_eq!(window((6, 22)), SpinupWindow { start: 6, end: 22 });
        assert_eq!(window((-5, 30)), SpinupWindow { start: 0, end: 24 });
        assert_eq!(window((10, 10)), SpinupWindow { start: 10, end: 11 });
        assert_eq!(window((24, 24)), SpinupWindow { start: 23, end: 24 });
        assert_eq!(window((0, 0)), SpinupWindow { start: 0, end: 1 });
        assert!(!window((18, 3)).is_empty());
    }

    fn rejected_field(params: &CentrifugeParams) -> Option<&'static str> {
        match params.validate() {
            Err(LoadModelError::InvalidParameter { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn overflowing_energy_target_is_rejected() {
        let params = CentrifugeParams {
            plant_swu_per_year: 1e300,
            kwh_per_swu: 1e10,
            machine_swu_per_year: 1e300,
            daily_restart_fraction: 0.0,
            ..Default::default()
        };
        assert!(params.annual_kwh_target().is_infinite());
        assert_eq!(rejected_field(&params), Some("kwh_per_swu"));

        let total_plant = CentrifugeParams { interpret_kwh_per_swu_as_total_plant: true, ..params };
        assert_eq!(rejected_field(&total_plant), Some("kwh_per_swu"));
    }

    #[test]
    fn oversized_fleet_is_rejected() {
        let params = CentrifugeParams { machine_swu_per_year: 1e-6, ..Default::default() };
        assert_eq!(rejected_field(&params), Some("machine_swu_per_year"));
    }

    #[test]
    fn excessive_daily_restarts_are_rejected() {
        // 3.34M machines, half restarted each day
        let params = CentrifugeParams {
            plant_swu_per_year: 1e9,
            daily_restart_fraction: 0.5,
            ..Default::default()
        };
        assert_eq!(rejected_field(&params), Some("daily_restart_fraction"));

        let modest = CentrifugeParams { daily_restart_fraction: 0.01, ..params };
        assert!(modest.validate().is_ok());
    }
}
