//! Short human-readable renderings of metric values, used in log lines.

/// Whole milliseconds, or `n/a` when nothing was measured.
pub fn format_ms(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.0} ms")
    } else {
        "n/a".to_string()
    }
}

/// A proportion in `[0, 1]` as a percentage.
pub fn format_pct(proportion: f64) -> String {
    format!("{:.1}%", proportion * 100.0)
}

/// Relative cost as a signed percentage, e.g. `+30.0%`.
pub fn format_cost(value: f64) -> String {
    format!("{:+.1}%", value * 100.0)
}

pub fn format_difficulty(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(format_ms(412.6), "413 ms");
        assert_eq!(format_ms(f64::NAN), "n/a");
        assert_eq!(format_pct(0.66666), "66.7%");
        assert_eq!(format_cost(0.3), "+30.0%");
        assert_eq!(format_cost(-0.125), "-12.5%");
        assert_eq!(format_difficulty(0.45), "0.45");
    }
}
