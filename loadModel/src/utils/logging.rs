use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::{Builder, Histogram};

// Histogram bounds: 1ns .. 60s, 3 significant figures
const HISTOGRAM_LOW_NS: u64 = 1;
const HISTOGRAM_HIGH_NS: u64 = 60_000_000_000;
const HISTOGRAM_SIGFIG: u8 = 3;

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Synthesis {
        subcategory: SynthesisStep,
    },
    SeedSweep,
    FileIO {
        subcategory: FileIOType,
    },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum SynthesisStep {
    Timeline,
    RunningMask,
    Spinup,
    Scaling,
    Statistics,
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ParamsLoad,
    ParamsSave,
    ResultsSave,
    Other,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Synthesis { subcategory } => {
                format!("Synthesis - {}", match subcategory {
                    SynthesisStep::Timeline => "Timeline",
                    SynthesisStep::RunningMask => "Running Mask",
                    SynthesisStep::Spinup => "Spin-up",
                    SynthesisStep::Scaling => "Scaling",
                    SynthesisStep::Statistics => "Statistics",
                    SynthesisStep::Other => "Other",
                })
            },
            OperationCategory::SeedSweep => "Seed Sweep".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::ParamsLoad => "Params Load",
                    FileIOType::ParamsSave => "Params Save",
                    FileIOType::ResultsSave => "Results Save",
                    FileIOType::Other => "Other",
                })
            },
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

/// Records the elapsed time of a scope when dropped.
pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        record_timing_end(&self.function_name, duration, &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    TIMING_STACK.with(|stack| {
        stack.borrow_mut().push(function_name.to_string());
    });

    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(HISTOGRAM_LOW_NS, HISTOGRAM_HIGH_NS, HISTOGRAM_SIGFIG).ok()
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    // The stack is maintained even when timing is off so guards stay balanced.
    let parent = TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();
        stack.last().cloned()
    });

    if !is_timing_enabled() {
        return;
    }

    let duration_ns = (duration.as_nanos() as u64).clamp(HISTOGRAM_LOW_NS, HISTOGRAM_HIGH_NS);

    {
        let mut hierarchical = HIERARCHICAL_TIMINGS.write();
        let entry = hierarchical
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0, Vec::new()));
        entry.0 += duration;
        entry.1 += 1;
        if let Some(parent_name) = parent {
            if !entry.2.contains(&parent_name) {
                entry.2.push(parent_name);
            }
        }
    }

    {
        let mut timings = FUNCTION_TIMINGS.write();
        if !timings.contains_key(function_name) {
            if let Some(histogram) = new_histogram() {
                timings.insert(function_name.to_string(), histogram);
            }
        }
        if let Some(histogram) = timings.get_mut(function_name) {
            let _ = histogram.record(duration_ns);
        }
    }

    {
        let mut category_timings = CATEGORY_TIMINGS.write();
        if !category_timings.contains_key(category) {
            if let Some(histogram) = new_histogram() {
                category_timings.insert(category.clone(), histogram);
            }
        }
        if let Some(histogram) = category_timings.get_mut(category) {
            let _ = histogram.record(duration_ns);
        }
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let mut env_filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    if debug_logging {
        if let Ok(directive) = "centrifuge_load=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    let result = if enable_timing {
        let timing_layer = Builder::default().layer(|| {
            Histogram::<u64>::new_with_bounds(HISTOGRAM_LOW_NS, HISTOGRAM_HIGH_NS, HISTOGRAM_SIGFIG)
                .expect("constant histogram bounds are valid")
        });

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false));

        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(e) = result {
        eprintln!("Failed to set up tracing subscriber: {}", e);
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

struct StepTiming {
    name: String,
    total: Duration,
    calls: usize,
    callers: Vec<String>,
}

struct StageTiming {
    label: String,
    total_ns: f64,
    mean_ns: f64,
    p95_ns: f64,
    samples: u64,
}

/// Prints the collected step and stage timings when `--enable-timing` is on.
pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    let mut steps: Vec<StepTiming> = HIERARCHICAL_TIMINGS
        .read()
        .iter()
        .map(|(name, (total, calls, callers))| StepTiming {
            name: name.clone(),
            total: *total,
            calls: *calls,
            callers: callers.clone(),
        })
        .collect();
    steps.sort_by(|a, b| b.total.cmp(&a.total));

    let mut stages: Vec<StageTiming> = CATEGORY_TIMINGS
        .read()
        .iter()
        .map(|(category, histogram)| StageTiming {
            label: category.as_str(),
            total_ns: histogram.mean() * histogram.len() as f64,
            mean_ns: histogram.mean(),
            p95_ns: histogram.value_at_quantile(0.95) as f64,
            samples: histogram.len(),
        })
        .collect();
    stages.sort_by(|a, b| b.total_ns.total_cmp(&a.total_ns));

    print!("{}", render_timing_report(&steps, &stages));
}

fn render_timing_report(steps: &[StepTiming], stages: &[StageTiming]) -> String {
    let mut out = String::from("\nLoad curve timing\n-----------------\n");

    out.push_str("Steps (slowest first):\n");
    for step in steps {
        let mean_ms = step.total.as_secs_f64() * 1000.0 / step.calls.max(1) as f64;
        out.push_str(&format!(
            "  {:<24} {:>9.3}s  {:>6} call(s)  {:>9.3}ms/call\n",
            step.name,
            step.total.as_secs_f64(),
            step.calls,
            mean_ms
        ));
        if !step.callers.is_empty() {
            out.push_str(&format!("    inside {}\n", step.callers.join(", ")));
        }
    }

    let overall_ns: f64 = stages.iter().map(|stage| stage.total_ns).sum();
    out.push_str("Share by stage:\n");
    for stage in stages {
        let share = if overall_ns > 0.0 { stage.total_ns / overall_ns * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "  {:<28} {:>5.1}%  mean {:.3}ms  p95 {:.3}ms  n={}\n",
            stage.label,
            share,
            stage.mean_ns / 1_000_000.0,
            stage.p95_ns / 1_000_000.0,
            stage.samples
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_include_subcategory() {
        let category = OperationCategory::Synthesis { subcategory: SynthesisStep::Spinup };
        assert_eq!(category.as_str(), "Synthesis - Spin-up");
        assert_eq!(OperationCategory::SeedSweep.as_str(), "Seed Sweep");
    }

    #[test]
    fn nested_guards_keep_stack_balanced() {
        {
            let _outer = start_timing("outer", OperationCategory::Other);
            let _inner = start_timing("inner", OperationCategory::Other);
        }
        TIMING_STACK.with(|stack| assert!(stack.borrow().is_empty()));
    }

    #[test]
    fn timing_report_lists_steps_and_stage_shares() {
        let steps = vec![
            StepTiming {
                name: "synthesize".to_string(),
                total: Duration::from_millis(30),
                calls: 3,
                callers: Vec::new(),
            },
            StepTiming {
                name: "schedule_spinups".to_string(),
                total: Duration::from_millis(12),
                calls: 3,
                callers: vec!["synthesize".to_string()],
            },
        ];
        let stages = vec![
            StageTiming {
                label: OperationCategory::Synthesis { subcategory: SynthesisStep::Spinup }.as_str(),
                total_ns: 3.0e6,
                mean_ns: 1.0e6,
                p95_ns: 1.5e6,
                samples: 3,
            },
            StageTiming {
                label: OperationCategory::FileIO { subcategory: FileIOType::ResultsSave }.as_str(),
                total_ns: 1.0e6,
                mean_ns: 1.0e6,
                p95_ns: 1.0e6,
                samples: 1,
            },
        ];

        let report = render_timing_report(&steps, &stages);
        assert!(report.starts_with("\nLoad curve timing\n"));
        assert!(report.contains("inside synthesize"));
        assert!(report.contains("10.000ms/call"));
        assert!(report.contains("Synthesis - Spin-up"));
        assert!(report.contains(" 75.0%"));
        assert!(report.contains(" 25.0%"));
    }
}
