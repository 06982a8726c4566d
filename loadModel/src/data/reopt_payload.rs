use serde::Serialize;

use crate::config::constants::REOPT_LOAD_DECIMALS;
use crate::models::hourly_series::HourlySeries;

/// Hourly load block in the optimization engine's scenario schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricLoad {
    pub loads_kw: Vec<f64>,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReoptLoadPayload {
    #[serde(rename = "ElectricLoad")]
    pub electric_load: ElectricLoad,
}

impl ReoptLoadPayload {
    /// Total kW column rounded to the engine's fixed precision, tagged with the model year.
    pub fn from_series(series: &HourlySeries, year: i32) -> Self {
        let loads_kw = series
            .iter()
            .map(|row| round_to(row.total_kw, REOPT_LOAD_DECIMALS))
            .collect();
        Self { electric_load: ElectricLoad { loads_kw, year } }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
