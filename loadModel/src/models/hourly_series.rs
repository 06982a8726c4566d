use chrono::NaiveDateTime;
use serde::Serialize;

/// One hour of the synthesized load curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyLoad {
    pub timestamp: NaiveDateTime,
    pub running: bool,
    pub centrifuge_kw: f64,
    pub hvac_kw: f64,
    pub aux_kw: f64,
    pub spinup_kw: f64,
    pub spinup_count: u64,
    pub total_kw: f64,
}

impl HourlyLoad {
    pub fn component_sum(&self) -> f64 {
        self.centrifuge_kw + self.hvac_kw + self.aux_kw + self.spinup_kw
    }
}

/// Year-long hourly load curve, one row per hour in timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    rows: Vec<HourlyLoad>,
}

impl HourlySeries {
    pub fn new(rows: Vec<HourlyLoad>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[HourlyLoad] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HourlyLoad> {
        self.rows.iter()
    }

    pub fn total_kw(&self) -> Vec<f64> {
        self.column(|row| row.total_kw)
    }

    pub fn centrifuge_kw(&self) -> Vec<f64> {
        self.column(|row| row.centrifuge_kw)
    }

    pub fn hvac_kw(&self) -> Vec<f64> {
        self.column(|row| row.hvac_kw)
    }

    pub fn aux_kw(&self) -> Vec<f64> {
        self.column(|row| row.aux_kw)
    }

    pub fn spinup_kw(&self) -> Vec<f64> {
        self.column(|row| row.spinup_kw)
    }

    pub fn spinup_count(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.spinup_count).collect()
    }

    pub fn running_hours(&self) -> usize {
        self.rows.iter().filter(|row| row.running).count()
    }

    pub fn downtime_hours(&self) -> usize {
        self.len() - self.running_hours()
    }

    /// Annual energy in kWh (hourly kW summed over the year).
    pub fn annual_kwh(&self) -> f64 {
        self.rows.iter().map(|row| row.total_kw).sum()
    }

    fn column(&self, field: impl Fn(&HourlyLoad) -> f64) -> Vec<f64> {
        self.rows.iter().map(field).collect()
    }
}

impl<'a> IntoIterator for &'a HourlySeries {
    type Item = &'a HourlyLoad;
    type IntoIter = std::slice::Iter<'a, HourlyLoad>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
