// Time Constants
pub const HOURS_IN_YEAR: usize = 8760;                 // non-leap year, always
pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_IN_YEAR: usize = 365;
pub const MONTH_LENGTHS: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

// Numerical Guards
pub const AVAILABILITY_FLOOR: f64 = 1e-6;          // keeps running kW finite when availability is 0
pub const MAX_ANNUAL_KWH_TARGET: f64 = 1e18;       // well above any real plant
pub const MAX_MACHINES: f64 = 10_000_000.0;
pub const MAX_RESTARTS_PER_DAY: u64 = 100_000;     // bounds the per-day restart draws

// Statistics
pub const RIDE_THROUGH_PERCENTILE: f64 = 90.0;
pub const MEDIAN_PERCENTILE: f64 = 50.0;
pub const HIGH_PERCENTILE: f64 = 95.0;
pub const KWH_PER_MWH: f64 = 1000.0;

// Export
pub const REOPT_LOAD_DECIMALS: i32 = 3;
pub const SERIES_CSV_FILE: &str = "centrifuge_load_curve.csv";
pub const SUMMARY_JSON_FILE: &str = "summary.json";
pub const PARAMS_JSON_FILE: &str = "centrifuge_params.json";
pub const REOPT_JSON_FILE: &str = "centrifuge_reopt_payload.json";
pub const WORKBOOK_XLSX_FILE: &str = "centrifuge_load_curve.xlsx";
pub const LOAD_PROFILE_SHEET: &str = "load_profile";
pub const SUMMARY_SHEET: &str = "summary";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Spin-up Window Bounds
pub const WINDOW_START_MAX: i32 = 23;
pub const WINDOW_END_MIN: i32 = 1;
pub const WINDOW_END_MAX: i32 = 24;

// Default Plant Parameters
pub const DEFAULT_PLANT_SWU_PER_YEAR: f64 = 1_000_000.0;
pub const DEFAULT_KWH_PER_SWU: f64 = 55.0;             // modern centrifuge plants sit around 50-60
pub const DEFAULT_MACHINE_SWU_PER_YEAR: f64 = 300.0;
pub const DEFAULT_AVAILABILITY: f64 = 0.96;
pub const DEFAULT_NUM_CASCADES: u32 = 20;

// Default Spin-up Parameters
pub const DEFAULT_DAILY_RESTART_FRACTION: f64 = 0.005; // 0.5% of the fleet per day
pub const DEFAULT_SPINUP_MINUTES: f64 = 20.0;
pub const DEFAULT_SPINUP_POWER_FACTOR: f64 = 3.5;
pub const DEFAULT_SPINUP_WINDOW_HOURS: (i32, i32) = (6, 22);

// Default HVAC & Aux Parameters
pub const DEFAULT_HVAC_FRACTION_OF_RUNNING: f64 = 0.30;
pub const DEFAULT_AUX_KW_CONSTANT: f64 = 1500.0;       // security, UF6 handling, etc.
pub const DEFAULT_HVAC_SEASONAL_AMPLITUDE: f64 = 0.20;
pub const DEFAULT_SEASON_PEAK_MONTH: u32 = 7;

// Default Ride-through Parameters
pub const DEFAULT_RIDE_THROUGH_SECONDS: f64 = 20.0;
pub const DEFAULT_CRITICAL_FRACTION: f64 = 0.80;

// Default Timeframe & Randomness
pub const DEFAULT_YEAR: i32 = 2025;
pub const DEFAULT_RANDOM_SEED: u64 = 42;
