//! Hourly load-curve synthesis for a gas-centrifuge enrichment plant.
//!
//! The curve is the sum of four components: steady centrifuge running load,
//! HVAC following the running load with a seasonal swing, a constant auxiliary
//! load, and seeded spin-up transients. Each call owns its random generator,
//! so concurrent calls never share state and identical inputs give identical
//! outputs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::running_mask::build_running_mask;
use super::spinup::{schedule_spinups, SpinupLoad, SpinupSchedule};
use super::timeline::Timeline;
use crate::analysis::statistics;
use crate::config::centrifuge_params::CentrifugeParams;
use crate::config::const_funcs::{machine_count, round_half_even, seasonal_multiplier};
use crate::config::constants::*;
use crate::models::diagnostics::Diagnostic;
use crate::models::hourly_series::{HourlyLoad, HourlySeries};
use crate::models::summary::SummaryStatistics;
use crate::utils::errors::LoadModelError;
use crate::utils::logging::{self, OperationCategory, SynthesisStep};

/// Result of one synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadCurve {
    pub series: HourlySeries,
    pub summary: SummaryStatistics,
    pub diagnostics: Vec<Diagnostic>,
}

// Component columns before they are zipped into rows.
struct Components {
    centrifuge_kw: Vec<f64>,
    hvac_kw: Vec<f64>,
    aux_kw: Vec<f64>,
    spinup_kw: Vec<f64>,
}

impl Components {
    fn total_kw(&self) -> Vec<f64> {
        (0..self.centrifuge_kw.len())
            .map(|h| self.centrifuge_kw[h] + self.hvac_kw[h] + self.aux_kw[h] + self.spinup_kw[h])
            .collect()
    }

    fn scale(&mut self, factor: f64) {
        for column in [&mut self.centrifuge_kw, &mut self.hvac_kw, &mut self.aux_kw, &mut self.spinup_kw] {
            column.iter_mut().for_each(|kw| *kw *= factor);
        }
    }
}

/// Build the hourly load curve and its summary for `params`.
///
/// Fails with [`LoadModelError::InvalidParameter`] before doing any work if a
/// field or field combination is out of bounds, and with
/// [`LoadModelError::NonFiniteLoad`] if the curve would overflow. A curve with
/// non-positive energy in total-plant mode is returned unscaled with a
/// [`Diagnostic`] attached.
pub fn synthesize(params: &CentrifugeParams) -> Result<LoadCurve, LoadModelError> {
    let _timing = logging::start_timing("synthesize",
        OperationCategory::Synthesis { subcategory: SynthesisStep::Other });

    params.validate()?;
    let mut rng = StdRng::seed_from_u64(params.random_seed);
    let mut diagnostics = Vec::new();

    let timeline = {
        let _timing = logging::start_timing("build_timeline",
            OperationCategory::Synthesis { subcategory: SynthesisStep::Timeline });
        Timeline::for_year(params.year)?
    };

    let annual_kwh_target = params.annual_kwh_target();
    let num_centrifuges = machine_count(params.plant_swu_per_year, params.machine_swu_per_year);

    let running_mask = {
        let _timing = logging::start_timing("build_running_mask",
            OperationCategory::Synthesis { subcategory: SynthesisStep::RunningMask });
        build_running_mask(params.availability)
    };
    let running_hours = running_mask.iter().filter(|running| **running).count();

    // Constant running kW that hits the centrifuge energy target averaged over all hours
    let avg_kw_all_hours = annual_kwh_target / HOURS_IN_YEAR as f64;
    let mut centrifuge_running_kw = avg_kw_all_hours / params.availability.max(AVAILABILITY_FLOOR);
    let mut per_machine_kw = centrifuge_running_kw / num_centrifuges.max(1) as f64;

    debug!(
        num_centrifuges,
        running_hours,
        centrifuge_running_kw,
        per_machine_kw,
        "Sized centrifuge fleet"
    );

    let centrifuge_kw: Vec<f64> = running_mask
        .iter()
        .map(|&running| if running { centrifuge_running_kw } else { 0.0 })
        .collect();

    let hvac_kw: Vec<f64> = centrifuge_kw
        .iter()
        .zip(timeline.months())
        .map(|(&kw, &month)| {
            params.hvac_fraction_of_running
                * kw
                * seasonal_multiplier(month, params.season_peak_month, params.hvac_seasonal_amplitude)
        })
        .collect();

    let aux_kw = vec![params.aux_kw_constant; HOURS_IN_YEAR];

    let machines_per_day = round_half_even(params.daily_restart_fraction * num_centrifuges as f64);
    let SpinupSchedule { spinup_kw, spinup_count } = {
        let _timing = logging::start_timing("schedule_spinups",
            OperationCategory::Synthesis { subcategory: SynthesisStep::Spinup });
        let load = SpinupLoad {
            extra_kw_per_machine: (params.spinup_power_factor - 1.0) * per_machine_kw,
            minutes_fraction: params.spinup_minutes / MINUTES_PER_HOUR,
        };
        schedule_spinups(&mut rng, machines_per_day, params.spinup_window(), &running_mask, load)
    };

    let mut components = Components { centrifuge_kw, hvac_kw, aux_kw, spinup_kw };
    let mut total_kw = components.total_kw();
    ensure_finite(&total_kw)?;

    if params.interpret_kwh_per_swu_as_total_plant {
        let _timing = logging::start_timing("scale_to_total_plant",
            OperationCategory::Synthesis { subcategory: SynthesisStep::Scaling });

        let current_annual_kwh: f64 = total_kw.iter().sum();
        if current_annual_kwh > 0.0 {
            let scale = annual_kwh_target / current_annual_kwh;
            components.scale(scale);
            // Recomputed from the scaled parts so the component sum holds exactly
            total_kw = components.total_kw();
            centrifuge_running_kw *= scale;
            per_machine_kw *= scale;
            ensure_finite(&total_kw)?;
            debug!(scale, "Scaled curve to total-plant energy target");
        } else {
            let diagnostic = Diagnostic::NonPositiveEnergyScalingSkipped {
                target_kwh: annual_kwh_target,
                unscaled_kwh: current_annual_kwh,
            };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }
    }

    let summary = {
        let _timing = logging::start_timing("summarize",
            OperationCategory::Synthesis { subcategory: SynthesisStep::Statistics });
        summarize(
            params,
            &total_kw,
            SizingFacts { num_centrifuges, running_hours, machines_per_day, centrifuge_running_kw, per_machine_kw },
        )
    };

    let rows = timeline
        .timestamps()
        .iter()
        .enumerate()
        .map(|(h, &timestamp)| HourlyLoad {
            timestamp,
            running: running_mask[h],
            centrifuge_kw: components.centrifuge_kw[h],
            hvac_kw: components.hvac_kw[h],
            aux_kw: components.aux_kw[h],
            spinup_kw: components.spinup_kw[h],
            spinup_count: spinup_count[h],
            total_kw: total_kw[h],
        })
        .collect();

    info!(
        seed = params.random_seed,
        annual_mwh = summary.annual_mwh,
        peak_kw = summary.peak_kw,
        "Built centrifuge load curve"
    );

    Ok(LoadCurve {
        series: HourlySeries::new(rows),
        summary,
        diagnostics,
    })
}

// Hourly values and the annual sum must stay representable.
fn ensure_finite(total_kw: &[f64]) -> Result<(), LoadModelError> {
    if total_kw.iter().any(|kw| !kw.is_finite()) {
        return Err(LoadModelError::NonFiniteLoad { quantity: "hourly total kW" });
    }
    if !total_kw.iter().sum::<f64>().is_finite() {
        return Err(LoadModelError::NonFiniteLoad { quantity: "annual energy" });
    }
    Ok(())
}

struct SizingFacts {
    num_centrifuges: u64,
    running_hours: usize,
    machines_per_day: u64,
    centrifuge_running_kw: f64,
    per_machine_kw: f64,
}

fn summarize(params: &CentrifugeParams, total_kw: &[f64], facts: SizingFacts) -> SummaryStatistics {
    let mut sorted = total_kw.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // UPS sizing at the 90th percentile load
    let p90_kw = statistics::percentile_of_sorted(&sorted, RIDE_THROUGH_PERCENTILE);
    let critical_kw = params.critical_fraction * p90_kw;
    let ups_kwh = critical_kw * (params.ride_through_seconds / SECONDS_PER_HOUR);

    SummaryStatistics {
        plant_swu_per_year: params.plant_swu_per_year,
        kwh_per_swu: params.kwh_per_swu,
        interpret_kwh_per_swu_as_total_plant: params.interpret_kwh_per_swu_as_total_plant,
        machine_swu_per_year: params.machine_swu_per_year,
        num_centrifuges: facts.num_centrifuges,
        availability: params.availability,
        running_hours: facts.running_hours,
        machines_restarted_per_day: facts.machines_per_day,
        centrifuge_running_kw: facts.centrifuge_running_kw,
        per_machine_kw: facts.per_machine_kw,
        avg_kw_over_year: statistics::mean(total_kw),
        peak_kw: statistics::max(total_kw),
        p95_kw: statistics::percentile_of_sorted(&sorted, HIGH_PERCENTILE),
        p90_kw,
        p50_kw: statistics::percentile_of_sorted(&sorted, MEDIAN_PERCENTILE),
        annual_mwh: total_kw.iter().sum::<f64>() / KWH_PER_MWH,
        critical_kw,
        estimated_ups_kwh_required_for_ridethrough: ups_kwh,
        ups_ridethrough_seconds: params.ride_through_seconds,
        critical_fraction: params.critical_fraction,
        year: params.year,
        random_seed: params.random_seed,
    }
}
