use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::centrifuge_params::CentrifugeParams;
use crate::config::constants::{
    LOAD_PROFILE_SHEET, PARAMS_JSON_FILE, REOPT_JSON_FILE, SERIES_CSV_FILE, SUMMARY_JSON_FILE,
    SUMMARY_SHEET, TIMESTAMP_FORMAT, WORKBOOK_XLSX_FILE,
};
use crate::core::synthesizer::LoadCurve;
use crate::data::reopt_payload::ReoptLoadPayload;
use crate::models::hourly_series::HourlySeries;
use crate::models::summary::SummaryStatistics;
use crate::utils::errors::LoadModelError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

// One CSV line; the running flag is written as 0/1.
#[derive(Serialize)]
struct SeriesRecord {
    timestamp: String,
    running_mask: u8,
    centrifuge_kw: f64,
    hvac_kw: f64,
    aux_kw: f64,
    spinup_kw: f64,
    spinup_count: u64,
    total_kw: f64,
}

const SERIES_COLUMNS: [&str; 8] = [
    "timestamp", "running_mask", "centrifuge_kw", "hvac_kw", "aux_kw", "spinup_kw", "spinup_count", "total_kw",
];

/// Writes the hourly series as CSV to any writer.
pub fn write_series_csv<W: Write>(writer: W, series: &HourlySeries) -> Result<(), LoadModelError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in series {
        csv_writer.serialize(SeriesRecord {
            timestamp: row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            running_mask: u8::from(row.running),
            centrifuge_kw: row.centrifuge_kw,
            hvac_kw: row.hvac_kw,
            aux_kw: row.aux_kw,
            spinup_kw: row.spinup_kw,
            spinup_count: row.spinup_count,
            total_kw: row.total_kw,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Exports run outputs into a timestamped directory.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Create `<output_dir>/<YYYYmmdd_HHMMSS>/` for this run.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, LoadModelError> {
        let run_dir = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(run_dir);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self { output_dir: full_path })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Series CSV, summary JSON and the parameters that produced them.
    /// The engine load payload is written too when `include_reopt` is set.
    pub fn export_run(
        &self,
        params: &CentrifugeParams,
        curve: &LoadCurve,
        include_reopt: bool,
    ) -> Result<(), LoadModelError> {
        let _timing = logging::start_timing("export_run",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        self.export_series(&curve.series)?;
        self.write_json(SUMMARY_JSON_FILE, &curve.summary)?;
        self.write_json(PARAMS_JSON_FILE, params)?;
        if include_reopt {
            self.write_json(REOPT_JSON_FILE, &ReoptLoadPayload::from_series(&curve.series, params.year))?;
        }

        info!(dir = %self.output_dir.display(), "Exported load curve outputs");
        Ok(())
    }

    pub fn export_series(&self, series: &HourlySeries) -> Result<PathBuf, LoadModelError> {
        let path = self.output_dir.join(SERIES_CSV_FILE);
        write_series_csv(BufWriter::new(File::create(&path)?), series)?;
        Ok(path)
    }

    /// Workbook with the hourly series on `load_profile` and a one-row
    /// summary on `summary`.
    pub fn export_workbook(&self, curve: &LoadCurve) -> Result<PathBuf, LoadModelError> {
        let _timing = logging::start_timing("export_workbook",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join(WORKBOOK_XLSX_FILE);
        let mut workbook = Workbook::new();
        write_load_profile_sheet(workbook.add_worksheet(), &curve.series)?;
        write_summary_sheet(workbook.add_worksheet(), &curve.summary)?;
        workbook.save(&path)?;

        info!(path = %path.display(), "Exported load curve workbook");
        Ok(path)
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf, LoadModelError> {
        let path = self.output_dir.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

fn write_load_profile_sheet(sheet: &mut Worksheet, series: &HourlySeries) -> Result<(), LoadModelError> {
    sheet.set_name(LOAD_PROFILE_SHEET)?;
    for (col, name) in SERIES_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (idx, row) in series.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, row.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        sheet.write_number(r, 1, u8::from(row.running))?;
        sheet.write_number(r, 2, row.centrifuge_kw)?;
        sheet.write_number(r, 3, row.hvac_kw)?;
        sheet.write_number(r, 4, row.aux_kw)?;
        sheet.write_number(r, 5, row.spinup_kw)?;
        sheet.write_number(r, 6, row.spinup_count as f64)?;
        sheet.write_number(r, 7, row.total_kw)?;
    }
    Ok(())
}

// Field names across row 0, values in row 1, in declaration order.
fn write_summary_sheet(sheet: &mut Worksheet, summary: &SummaryStatistics) -> Result<(), LoadModelError> {
    sheet.set_name(SUMMARY_SHEET)?;
    let Value::Object(fields) = serde_json::to_value(summary)? else {
        return Ok(());
    };

    for (col, (name, value)) in fields.iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, name.as_str())?;
        match value {
            Value::Bool(flag) => sheet.write_boolean(1, col, *flag)?,
            Value::Number(number) => sheet.write_number(1, col, number.as_f64().unwrap_or(f64::NAN))?,
            other => sheet.write_string(1, col, other.to_string())?,
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::synthesizer::synthesize;

    #[test]
    fn series_csv_has_header_and_one_line_per_hour() {
        let curve = synthesize(&CentrifugeParams::default()).unwrap();
        let mut buffer = Vec::new();
        write_series_csv(&mut buffer, &curve.series).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,running_mask,centrifuge_kw,hvac_kw,aux_kw,spinup_kw,spinup_count,total_kw")
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("2025-01-01 00:00:00,0,"));
        assert_eq!(lines.count(), 8759);
    }

    #[test]
    fn export_run_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let params = CentrifugeParams::default();
        let curve = synthesize(&params).unwrap();

        let exporter = CsvExporter::new(dir.path()).unwrap();
        exporter.export_run(&params, &curve, true).unwrap();

        for file in [SERIES_CSV_FILE, SUMMARY_JSON_FILE, PARAMS_JSON_FILE, REOPT_JSON_FILE] {
            assert!(exporter.output_dir().join(file).exists(), "missing {}", file);
        }
        let reloaded = CentrifugeParams::load_from_file(exporter.output_dir().join(PARAMS_JSON_FILE)).unwrap();
        assert_eq!(reloaded, params);
    }

    #[test]
    fn workbook_export_writes_xlsx_archive() {
        let dir = tempfile::tempdir().unwrap();
        let curve = synthesize(&CentrifugeParams::default()).unwrap();

        let exporter = CsvExporter::new(dir.path()).unwrap();
        let path = exporter.export_workbook(&curve).unwrap();

        assert_eq!(path, exporter.output_dir().join(WORKBOOK_XLSX_FILE));
        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 10_000);
    }

    #[test]
    fn summary_sheet_accepts_every_summary_field_type() {
        let curve = synthesize(&CentrifugeParams::default()).unwrap();
        let mut workbook = Workbook::new();
        write_summary_sheet(workbook.add_worksheet(), &curve.summary).unwrap();
        write_load_profile_sheet(workbook.add_worksheet(), &curve.series).unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
