//! Gauge position mapping for the result bar.

pub const GAUGE_MIN: f64 = 15.0;
pub const GAUGE_MAX: f64 = 40.0;

/// Widths (percent of the bar) of the underweight, normal, overweight and obese bands.
/// Fixed visual constants; not derived from the thresholds.
pub const BAND_WIDTHS: [f64; 4] = [18.5, 25.0, 25.0, 31.5];

/// Marker position in percent `[0, 100]`. BMI is clamped to `[GAUGE_MIN, GAUGE_MAX]` first.
pub fn gauge_position(bmi: f64) -> f64 {
    let clamped = bmi.clamp(GAUGE_MIN, GAUGE_MAX);
    (clamped - GAUGE_MIN) / (GAUGE_MAX - GAUGE_MIN) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        assert_eq!(gauge_position(15.0), 0.0);
        assert_eq!(gauge_position(40.0), 100.0);
        assert!((gauge_position(27.5) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(gauge_position(3.0), 0.0);
        assert_eq!(gauge_position(80.0), 100.0);
    }

    #[test]
    fn test_band_widths_cover_bar() {
        assert_eq!(BAND_WIDTHS.iter().sum::<f64>(), 100.0);
    }
}
