use crate::core::seed_sweep::{Spread, SweepReport};
use crate::models::diagnostics::Diagnostic;
use crate::models::summary::SummaryStatistics;

pub fn print_summary(summary: &SummaryStatistics, diagnostics: &[Diagnostic]) {
    println!("\nCentrifuge Load Model {} (seed {})", summary.year, summary.random_seed);
    println!("----------------------------------------");
    println!("Plant:");
    println!("  Production: {:.0} SWU/yr at {:.2} kWh/SWU", summary.plant_swu_per_year, summary.kwh_per_swu);
    println!("  Energy target covers: {}",
        if summary.interpret_kwh_per_swu_as_total_plant { "total plant" } else { "centrifuges only" });
    println!("  Centrifuges: {} ({:.0} SWU/yr each)", summary.num_centrifuges, summary.machine_swu_per_year);
    println!("  Availability: {:.3} ({} running hours)", summary.availability, summary.running_hours);
    println!("  Restarts per day: {}", summary.machines_restarted_per_day);
    println!("Load:");
    println!("  Centrifuge running: {:.2} kW ({:.3} kW per machine)",
        summary.centrifuge_running_kw, summary.per_machine_kw);
    println!("  Average: {:.2} kW", summary.avg_kw_over_year);
    println!("  Peak: {:.2} kW", summary.peak_kw);
    println!("  P50 / P95: {:.2} / {:.2} kW", summary.p50_kw, summary.p95_kw);
    println!("  Annual energy: {:.2} MWh", summary.annual_mwh);
    println!("Ride-through:");
    println!("  Critical load: {:.2} kW ({:.0}% of P90 {:.2} kW)",
        summary.critical_kw, summary.critical_fraction * 100.0, summary.p90_kw);
    println!("  UPS energy for {:.1}s: {:.3} kWh",
        summary.ups_ridethrough_seconds, summary.estimated_ups_kwh_required_for_ridethrough);

    if !diagnostics.is_empty() {
        println!("Warnings:");
        for diagnostic in diagnostics {
            println!("  {}", diagnostic);
        }
    }
    println!("----------------------------------------");
}

pub fn print_sweep_report(report: &SweepReport) {
    println!("\nSeed Sweep ({} runs)", report.runs.len());
    println!("----------------------------------------");
    print_spread("Peak kW", &report.peak_kw);
    print_spread("P95 kW", &report.p95_kw);
    print_spread("UPS kWh", &report.ups_kwh);
    print_spread("Annual MWh", &report.annual_mwh);
    println!("----------------------------------------");
}

fn print_spread(label: &str, spread: &Spread) {
    println!("{:>12}: min={:.3}, mean={:.3}, max={:.3}, range={:.3}",
        label, spread.min, spread.mean, spread.max, spread.range());
}
