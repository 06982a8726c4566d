use serde::Serialize;

/// Non-fatal advisories raised while building a load curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// Total-plant scaling was requested but the unscaled curve's annual
    /// energy is zero or negative, so the series is returned unscaled.
    NonPositiveEnergyScalingSkipped { target_kwh: f64, unscaled_kwh: f64 },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NonPositiveEnergyScalingSkipped { target_kwh, unscaled_kwh } => write!(
                f,
                "Total kWh computed as non-positive ({:.1} kWh); scaling to {:.1} kWh skipped",
                unscaled_kwh, target_kwh
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_scaling_message_reports_non_positive_energy() {
        let diagnostic = Diagnostic::NonPositiveEnergyScalingSkipped { target_kwh: 100.0, unscaled_kwh: -2.5 };
        assert_eq!(
            diagnostic.to_string(),
            "Total kWh computed as non-positive (-2.5 kWh); scaling to 100.0 kWh skipped"
        );
    }
}
