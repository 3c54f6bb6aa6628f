/// Compact seconds with two decimals (`"1.53s"`)
pub fn format_seconds(ms: f64) -> String {
    format!("{:.2}s", ms / 1000.0)
}

/// Expanded duration (`"1h 2m 3s"`)
///
/// Zero-valued units are omitted. Sub-second durations render in
/// milliseconds, and zero renders as `"0s"`.
pub fn ms_to_time(ms: f64) -> String {
    if !ms.is_finite() {
        return String::new();
    }

    let sign = if ms < 0.0 { "-" } else { "" };
    let total_ms = ms.abs().round() as u64;

    if total_ms == 0 {
        return "0s".to_string();
    }
    if total_ms < 1000 {
        return format!("{sign}{total_ms}ms");
    }

    let total_secs = total_ms / 1000;
    let units = [
        (total_secs / 86_400, "d"),
        ((total_secs % 86_400) / 3600, "h"),
        ((total_secs % 3600) / 60, "m"),
        (total_secs % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    format!("{sign}{}", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(1530.0), "1.53s");
        assert_eq!(format_seconds(1234.0), "1.23s");
        assert_eq!(format_seconds(60_000.0), "60.00s");
    }

    #[test]
    fn test_ms_to_time_units() {
        assert_eq!(ms_to_time(3_723_000.0), "1h 2m 3s");
        assert_eq!(ms_to_time(90_061_000.0), "1d 1h 1m 1s");
        assert_eq!(ms_to_time(120_000.0), "2m");
        assert_eq!(ms_to_time(1_500.0), "1s");
    }

    #[test]
    fn test_ms_to_time_small_values() {
        assert_eq!(ms_to_time(0.0), "0s");
        assert_eq!(ms_to_time(250.0), "250ms");
        assert_eq!(ms_to_time(-2_000.0), "-2s");
        assert_eq!(ms_to_time(f64::NAN), "");
    }
}
