use serde::{Deserialize, Serialize};

/// Derived scalars for one load curve, plus the inputs echoed for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub plant_swu_per_year: f64,
    pub kwh_per_swu: f64,
    pub interpret_kwh_per_swu_as_total_plant: bool,
    pub machine_swu_per_year: f64,
    pub num_centrifuges: u64,
    pub availability: f64,
    pub running_hours: usize,
    pub machines_restarted_per_day: u64,
    pub centrifuge_running_kw: f64,     // after any total-plant scaling
    pub per_machine_kw: f64,            // after any total-plant scaling
    pub avg_kw_over_year: f64,
    pub peak_kw: f64,
    pub p95_kw: f64,
    pub p90_kw: f64,
    pub p50_kw: f64,
    pub annual_mwh: f64,
    pub critical_kw: f64,
    pub estimated_ups_kwh_required_for_ridethrough: f64,
    pub ups_ridethrough_seconds: f64,
    pub critical_fraction: f64,
    pub year: i32,
    pub random_seed: u64,
}
