use std::ops::Range;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::synthesizer::synthesize;
use crate::config::centrifuge_params::CentrifugeParams;
use crate::models::summary::SummaryStatistics;
use crate::utils::errors::LoadModelError;
use crate::utils::logging::{self, OperationCategory};

/// Min / mean / max of one metric across sweep runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Spread {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        if count == 0 {
            return Spread { min: 0.0, mean: 0.0, max: 0.0 };
        }
        Spread { min, mean: sum / count as f64, max }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub runs: Vec<SummaryStatistics>,   // in seed order
    pub peak_kw: Spread,
    pub p95_kw: Spread,
    pub ups_kwh: Spread,
    pub annual_mwh: Spread,
}

/// Run the synthesizer once per seed in `seeds`, keeping every other
/// parameter fixed, and aggregate how much the restart draws move the results.
///
/// Every run seeds its own generator, so the report is identical whether the
/// runs execute in parallel or not.
pub fn sweep_seeds(
    params: &CentrifugeParams,
    seeds: Range<u64>,
    parallel: bool,
    show_progress: bool,
) -> Result<SweepReport, LoadModelError> {
    let _timing = logging::start_timing("sweep_seeds", OperationCategory::SeedSweep);
    params.validate()?;

    let total = seeds.end.saturating_sub(seeds.start);
    let progress = if show_progress {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} seeds ({eta})") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let run = |seed: u64| -> Result<SummaryStatistics, LoadModelError> {
        let curve = synthesize(&params.with_seed(seed))?;
        progress.inc(1);
        Ok(curve.summary)
    };

    let runs: Vec<SummaryStatistics> = if parallel {
        seeds.into_par_iter().map(run).collect::<Result<Vec<_>, _>>()?
    } else {
        seeds.map(run).collect::<Result<Vec<_>, _>>()?
    };
    progress.finish_and_clear();

    info!(runs = runs.len(), parallel, "Completed seed sweep");

    Ok(SweepReport {
        peak_kw: Spread::of(runs.iter().map(|s| s.peak_kw)),
        p95_kw: Spread::of(runs.iter().map(|s| s.p95_kw)),
        ups_kwh: Spread::of(runs.iter().map(|s| s.estimated_ups_kwh_required_for_ridethrough)),
        annual_mwh: Spread::of(runs.iter().map(|s| s.annual_mwh)),
        runs,
    })
}
