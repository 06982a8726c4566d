use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Synthetic hourly load curves for gas-centrifuge enrichment plants", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "JSON parameter file; missing keys take defaults, unknown keys are ignored")]
    params: Option<String>,

    #[arg(long, help = "Random seed for restart scheduling (overrides the parameter file)")]
    seed: Option<u64>,

    #[arg(long, help = "Model year (overrides the parameter file)")]
    year: Option<i32>,

    #[arg(short, long, default_value = "output")]
    output_dir: String,

    #[arg(long, default_value_t = false)]
    export_csv: bool,

    #[arg(long, help = "Write the series and summary as an XLSX workbook", default_value_t = false)]
    export_xlsx: bool,

    #[arg(long, help = "Also write the optimization engine load payload", default_value_t = false)]
    reopt_json: bool,

    #[arg(long, help = "Write the effective parameters to this file and exit")]
    write_default_params: Option<String>,

    #[arg(long, help = "Run this many consecutive seeds and report the spread")]
    sweep: Option<u64>,

    #[arg(long, default_value_t = false)]
    parallel: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn export_xlsx(&self) -> bool {
        self.export_xlsx
    }

    pub fn reopt_json(&self) -> bool {
        self.reopt_json
    }

    pub fn write_default_params(&self) -> Option<&str> {
        self.write_default_params.as_deref()
    }

    pub fn sweep(&self) -> Option<u64> {
        self.sweep
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
