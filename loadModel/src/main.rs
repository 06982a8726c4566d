use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use centrifuge_load::analysis::reporting;
use centrifuge_load::cli::cli::Args;
use centrifuge_load::config::centrifuge_params::CentrifugeParams;
use centrifuge_load::core::seed_sweep::sweep_seeds;
use centrifuge_load::core::synthesizer::synthesize;
use centrifuge_load::utils::csv_export::CsvExporter;
use centrifuge_load::utils::logging::{self, FileIOType, OperationCategory};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    let params = resolve_params(&args)?;

    if let Some(path) = args.write_default_params() {
        let _timing = logging::start_timing("save_params",
            OperationCategory::FileIO { subcategory: FileIOType::ParamsSave });
        params.save_to_file(path)
            .with_context(|| format!("writing parameters to {}", path))?;
        println!("Parameters written to {}", path);
        return Ok(());
    }

    match args.sweep() {
        Some(runs) => {
            let start = params.random_seed;
            let report = sweep_seeds(&params, start..start.saturating_add(runs), args.parallel(), true)
                .context("running seed sweep")?;
            reporting::print_sweep_report(&report);
        }
        None => {
            let curve = synthesize(&params).context("building load curve")?;
            reporting::print_summary(&curve.summary, &curve.diagnostics);

            if args.export_csv() || args.reopt_json() || args.export_xlsx() {
                let exporter = CsvExporter::new(args.output_dir())
                    .with_context(|| format!("creating output directory under {}", args.output_dir()))?;
                if args.export_csv() || args.reopt_json() {
                    exporter.export_run(&params, &curve, args.reopt_json())
                        .context("exporting results")?;
                }
                if args.export_xlsx() {
                    exporter.export_workbook(&curve).context("exporting workbook")?;
                }
                println!("Results written to {}", exporter.output_dir().display());
            }
        }
    }

    logging::print_timing_report();
    Ok(())
}

// Defaults, overlaid by the parameter file, overlaid by CLI flags.
fn resolve_params(args: &Args) -> Result<CentrifugeParams> {
    let mut params = match args.params() {
        Some(path) => {
            let _timing = logging::start_timing("load_params",
                OperationCategory::FileIO { subcategory: FileIOType::ParamsLoad });
            info!(path, "Loading parameters");
            CentrifugeParams::load_from_file(path)
                .with_context(|| format!("loading parameters from {}", path))?
        }
        None => CentrifugeParams::default(),
    };

    if let Some(seed) = args.seed() {
        params.random_seed = seed;
    }
    if let Some(year) = args.year() {
        params.year = year;
    }
    params.validate().context("validating parameters")?;
    Ok(params)
}
