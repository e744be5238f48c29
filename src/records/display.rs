//! Formatting helpers for record measurements.
//!
//! T012: Implement age and elapsed-time display formatting

/// Format an age in days as "2y 3m 14d", omitting zero components.
///
/// Uses 365-day years and 30-day months, matching how ages were presented
/// in the original dashboard.
pub fn format_age(days: u32) -> String {
    let years = days / 365;
    let remaining = days % 365;
    let months = remaining / 30;
    let final_days = remaining % 30;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{}y", years));
    }
    if months > 0 {
        parts.push(format!("{}m", months));
    }
    if final_days > 0 || parts.is_empty() {
        parts.push(format!("{}d", final_days));
    }

    parts.join(" ")
}

/// Format an elapsed time in seconds as "Xm YYs", or bare "Zs" under a minute.
pub fn format_elapsed(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;

    if minutes == 0 {
        return format!("{}s", secs);
    }

    format!("{}m {:02}s", minutes, secs)
}

/// Age in years as a decimal, rounded to one place.
pub fn age_years(days: u32) -> f64 {
    (days as f64 / 365.0 * 10.0).round() / 10.0
}

/// Elapsed time in minutes as a decimal, rounded to two places.
pub fn elapsed_minutes_decimal(seconds: u32) -> f64 {
    (seconds as f64 / 60.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_full() {
        // 2*365 + 3*30 + 14 = 834
        assert_eq!(format_age(834), "2y 3m 14d");
    }

    #[test]
    fn test_format_age_omits_zero_components() {
        assert_eq!(format_age(365), "1y");
        assert_eq!(format_age(30), "1m");
        assert_eq!(format_age(5), "5d");
    }

    #[test]
    fn test_format_age_zero() {
        assert_eq!(format_age(0), "0d");
    }

    #[test]
    fn test_format_elapsed_basic() {
        assert_eq!(format_elapsed(125), "2m 05s");
        assert_eq!(format_elapsed(60), "1m 00s");
    }

    #[test]
    fn test_format_elapsed_under_a_minute() {
        assert_eq!(format_elapsed(45), "45s");
        assert_eq!(format_elapsed(0), "0s");
    }

    #[test]
    fn test_age_years_rounding() {
        assert_eq!(age_years(365), 1.0);
        assert_eq!(age_years(548), 1.5);
    }

    #[test]
    fn test_elapsed_minutes_decimal() {
        assert_eq!(elapsed_minutes_decimal(90), 1.5);
        assert_eq!(elapsed_minutes_decimal(125), 2.08);
    }
}
