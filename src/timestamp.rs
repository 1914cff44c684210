/// Parse a caption clock value into seconds.
///
/// Accepts bare seconds (`5.5`), `MM:SS.mmm` and `HH:MM:SS.mmm`, with either `.`
/// or `,` as the fractional separator.
pub fn parse_clock(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let fields: Vec<&str> = raw.split(':').collect();
    let (whole, last) = fields.split_at(fields.len() - 1);
    if whole.len() > 2 {
        return None;
    }

    let seconds = parse_seconds(last[0])?;
    let mut total = 0u64;
    for field in whole {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(field.parse::<u64>().ok()?)?;
    }

    Some(total as f64 * 60.0 + seconds)
}

fn parse_seconds(field: &str) -> Option<f64> {
    let field = field.replace(',', ".");
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    field.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Render an offset in seconds as `MM:SS`.
///
/// Fractions are truncated and minutes are not wrapped into hours.
pub fn format_offset(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Parse and render in one step
pub fn normalize(raw: &str) -> Option<String> {
    parse_clock(raw).map(format_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset_basic() {
        assert_eq!(format_offset(0.0), "00:00");
        assert_eq!(format_offset(5.5), "00:05");
        assert_eq!(format_offset(59.999), "00:59");
        assert_eq!(format_offset(60.0), "01:00");
        assert_eq!(format_offset(754.2), "12:34");
    }

    #[test]
    fn test_format_offset_past_an_hour() {
        assert_eq!(format_offset(5400.0), "90:00");
        assert_eq!(format_offset(6001.0), "100:01");
    }

    #[test]
    fn test_format_offset_clamps_bad_input() {
        assert_eq!(format_offset(-3.0), "00:00");
        assert_eq!(format_offset(f64::NAN), "00:00");
        assert_eq!(format_offset(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_format_offset_monotonic_within_minute() {
        let mut previous = format_offset(120.0);
        let mut t = 120.0;
        while t < 180.0 {
            let current = format_offset(t);
            assert!(current >= previous, "{current} < {previous} at {t}");
            previous = current;
            t += 0.25;
        }
    }

    #[test]
    fn test_parse_clock_shapes() {
        assert_eq!(parse_clock("5.5"), Some(5.5));
        assert_eq!(parse_clock("00:07.000"), Some(7.0));
        assert_eq!(parse_clock("00:00:07.000"), Some(7.0));
        assert_eq!(parse_clock("00:00:03,200"), Some(3.2));
        assert_eq!(parse_clock("01:02:03.500"), Some(3723.5));
        assert_eq!(parse_clock(" 00:01:00 "), Some(60.0));
    }

    #[test]
    fn test_parse_clock_rejects_junk() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("abc"), None);
        assert_eq!(parse_clock("-1.0"), None);
        assert_eq!(parse_clock("1:2:3:4"), None);
        assert_eq!(parse_clock("00::07"), None);
        assert_eq!(parse_clock("00:07:"), None);
    }

    #[test]
    fn test_parse_clock_rejects_overflowing_fields() {
        assert_eq!(parse_clock("400000000000000000:00:00"), None);
        assert_eq!(parse_clock("400000000000000000:00:00,000"), None);
        assert_eq!(parse_clock("99999999999999999999:00"), None);
    }

    #[test]
    fn test_normalize_is_format_agnostic() {
        assert_eq!(normalize("00:00:07.000").as_deref(), Some("00:07"));
        assert_eq!(normalize("00:00:07,000").as_deref(), Some("00:07"));
        assert_eq!(normalize("7.0").as_deref(), Some("00:07"));
        assert_eq!(normalize("01:30:00.000").as_deref(), Some("90:00"));
    }
}
