use crate::metrics::WpmSample;

/// X (seconds) and Y (WPM) upper bounds for the results chart
pub fn compute_chart_params(samples: &[WpmSample], elapsed_seconds: f64) -> (f64, f64) {
    let highest_wpm = samples.iter().map(|s| s.wpm).fold(0.0, f64::max);

    let overall_duration = samples
        .last()
        .map(|s| s.t)
        .unwrap_or(elapsed_seconds)
        .max(elapsed_seconds)
        .max(1.0);

    (overall_duration, highest_wpm.round().max(1.0))
}

/// Whole numbers without decimals, anything else to two places
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_params_without_samples() {
        assert_eq!(compute_chart_params(&[], 5.0), (5.0, 1.0));
        assert_eq!(compute_chart_params(&[], 0.2), (1.0, 1.0));
    }

    #[test]
    fn test_chart_params_with_samples() {
        let samples = [
            WpmSample::new(1.0, 20.0),
            WpmSample::new(2.0, 41.6),
            WpmSample::new(3.0, 35.0),
        ];
        assert_eq!(compute_chart_params(&samples, 3.4), (3.4, 42.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
