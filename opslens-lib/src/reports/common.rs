use crate::metrics::Unit;

/// Coarse classification of a health score, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    #[must_use]
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// A metric value followed by its unit, if any.
pub fn format_metric_value(value: f64, unit: Option<Unit>) -> String {
    match unit {
        Some(Unit::Pct) => format!("{value}%"),
        Some(Unit::Bytes) => format!("{value} bytes"),
        None => format!("{value}"),
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::of(100.0), HealthBand::Good);
        assert_eq!(HealthBand::of(80.0), HealthBand::Good);
        assert_eq!(HealthBand::of(79.9), HealthBand::Fair);
        assert_eq!(HealthBand::of(50.0), HealthBand::Fair);
        assert_eq!(HealthBand::of(49.9), HealthBand::Poor);
        assert_eq!(HealthBand::of(0.0), HealthBand::Poor);
    }

    #[test]
    fn test_format_metric_value() {
        assert_eq!(format_metric_value(95.0, Some(Unit::Pct)), "95%");
        assert_eq!(format_metric_value(1024.0, Some(Unit::Bytes)), "1024 bytes");
        assert_eq!(format_metric_value(64.5, None), "64.5");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(None), "-");
        assert_eq!(format_optional(Some(-4.5)), "-4.5");
    }
}
