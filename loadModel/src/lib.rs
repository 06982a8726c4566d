// Main module declarations for the centrifuge load model

// Load curve synthesis
pub mod core {
    pub mod timeline;
    pub mod running_mask;
    pub mod spinup;
    pub mod synthesizer;
    pub mod seed_sweep;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod centrifuge_params;
}

// Model definitions
pub mod models {
    pub mod hourly_series;
    pub mod summary;
    pub mod diagnostics;
}

// Payloads for downstream consumers
pub mod data {
    pub mod reopt_payload;
}

// Analysis and reporting
pub mod analysis {
    pub mod statistics;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod errors;
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::config::centrifuge_params::{CentrifugeParams, SpinupWindow};
pub use crate::core::synthesizer::{synthesize, LoadCurve};
pub use crate::models::hourly_series::{HourlyLoad, HourlySeries};
pub use crate::models::summary::SummaryStatistics;
pub use crate::utils::errors::LoadModelError;
