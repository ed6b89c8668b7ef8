//! Conversion between clock-style time text and seconds.
//!
//! Parsing is deliberately lenient: every colon-separated segment is read the
//! way a forgiving decimal reader would, unreadable segments become NaN, and
//! no range checks are applied. [`parse_time_strict`] is the opt-in variant
//! for callers that want malformed input reported.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::Category;
use crate::PaceError;

/// Parse `S`, `M:SS` or `H:MM:SS` into seconds.
///
/// Any other segment count yields `0.0`. A segment with no numeric prefix
/// turns the whole result into NaN. Out-of-range and negative segments are
/// taken at face value, so `"90:00"` is 5400 seconds.
pub fn parse_time(text: &str) -> f64 {
    let parts: Vec<f64> = text.split(':').map(parse_segment).collect();
    match parts.as_slice() {
        [secs] => *secs,
        [mins, secs] => mins * 60.0 + secs,
        [hours, mins, secs] => hours * 3600.0 + mins * 60.0 + secs,
        _ => 0.0,
    }
}

/// Longest numeric prefix of `text` after leading whitespace, NaN if none.
fn parse_segment(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse time text, rejecting anything [`parse_time`] would silently accept:
/// empty text, more than three segments, non-numeric or negative segments,
/// and minutes or seconds of 60 and above behind a larger unit.
pub fn parse_time_strict(text: &str) -> Result<f64, PaceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PaceError::EmptyTime);
    }
    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.len() > 3 {
        return Err(PaceError::SegmentCount(segments.len()));
    }

    let mut total = 0.0;
    for (idx, raw) in segments.iter().enumerate() {
        let value: f64 = raw
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| PaceError::InvalidSegment(raw.to_string()))?;
        if value < 0.0 {
            return Err(PaceError::NegativeSegment(raw.to_string()));
        }
        if idx > 0 && value >= 60.0 {
            return Err(PaceError::SegmentOutOfRange(raw.to_string()));
        }
        total = total * 60.0 + value;
    }
    Ok(total)
}

/// Join separate hour/minute/second fields into time text.
///
/// The largest non-empty field decides the shape; smaller fields are padded
/// to two characters. All fields empty gives an empty string.
pub fn compose_time_text(hours: &str, minutes: &str, seconds: &str) -> String {
    if !hours.is_empty() {
        format!("{hours}:{minutes:0>2}:{seconds:0>2}")
    } else if !minutes.is_empty() {
        format!("{minutes}:{seconds:0>2}")
    } else {
        seconds.to_string()
    }
}

/// Render seconds with the precision of `category`.
///
/// Only non-zero leading units are shown (`H:MM:SS`, `M:SS`, `SS`). Sprint
/// times keep two decimals, other categories floor to whole seconds.
/// Negative and non-finite input renders as an empty string.
pub fn format_time(seconds: f64, category: Category) -> String {
    format_seconds(seconds, category.fractional_seconds())
}

/// Render seconds floored to whole seconds, as used for pace figures.
pub fn format_whole_seconds(seconds: f64) -> String {
    format_seconds(seconds, false)
}

fn format_seconds(seconds: f64, fractional: bool) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return String::new();
    }
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = seconds % 60.0;

    match (hours > 0, minutes > 0, fractional) {
        (true, _, true) => format!("{hours}:{minutes:02}:{:0>5}", hundredths(secs)),
        (true, _, false) => format!("{hours}:{minutes:02}:{:02}", secs.floor() as u64),
        (false, true, true) => format!("{minutes}:{:0>5}", hundredths(secs)),
        (false, true, false) => format!("{minutes}:{:02}", secs.floor() as u64),
        (false, false, true) => hundredths(secs),
        (false, false, false) => format!("{}", secs.floor() as u64),
    }
}

/// Two decimals, exact ties rounded up (10.125 -> "10.13").
fn hundredths(secs: f64) -> String {
    Decimal::from_f64_retain(secs)
        .map(|d| {
            let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        })
        .unwrap_or_else(|| format!("{secs:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_segment_count() {
        assert_eq!(parse_time("9.58"), 9.58);
        assert_eq!(parse_time("6:00"), 360.0);
        assert_eq!(parse_time("1:02:03"), 3723.0);
        assert_eq!(parse_time("2:15:00.5"), 8100.5);
    }

    #[test]
    fn unsupported_segment_count_is_zero() {
        assert_eq!(parse_time("1:2:3:4"), 0.0);
    }

    #[test]
    fn non_numeric_segment_is_nan() {
        assert!(parse_time("abc").is_nan());
        assert!(parse_time("").is_nan());
        assert!(parse_time("5:xx").is_nan());
        assert!(parse_time(":30").is_nan());
    }

    #[test]
    fn segments_use_leading_numeric_prefix() {
        assert_eq!(parse_time("12abc"), 12.0);
        assert_eq!(parse_time(" 5: 07s"), 307.0);
        assert_eq!(parse_time("1e2"), 100.0);
        assert_eq!(parse_time("5."), 5.0);
        assert_eq!(parse_time(".5"), 0.5);
    }

    // The lenient parser does not range-check; these pin that behaviour.
    #[test]
    fn out_of_range_and_negative_segments_are_accepted() {
        assert_eq!(parse_time("90:00"), 5400.0);
        assert_eq!(parse_time("1:75:00"), 8100.0);
        assert_eq!(parse_time("-5"), -5.0);
        assert_eq!(parse_time("1:-30"), 30.0);
    }

    #[test]
    fn strict_parse_rejects_what_lenient_parse_accepts() {
        assert_eq!(parse_time_strict("1:02:03").unwrap(), 3723.0);
        assert_eq!(parse_time_strict(" 9.58 ").unwrap(), 9.58);
        assert!(matches!(parse_time_strict(""), Err(PaceError::EmptyTime)));
        assert!(matches!(
            parse_time_strict("1:2:3:4"),
            Err(PaceError::SegmentCount(4))
        ));
        assert!(matches!(
            parse_time_strict("12abc"),
            Err(PaceError::InvalidSegment(_))
        ));
        assert!(matches!(
            parse_time_strict("inf"),
            Err(PaceError::InvalidSegment(_))
        ));
        assert!(matches!(
            parse_time_strict("-5"),
            Err(PaceError::NegativeSegment(_))
        ));
        assert!(matches!(
            parse_time_strict("1:75:00"),
            Err(PaceError::SegmentOutOfRange(_))
        ));
        // A leading unit may exceed 60.
        assert_eq!(parse_time_strict("90:00").unwrap(), 5400.0);
    }

    #[test]
    fn compose_matches_field_layout() {
        assert_eq!(compose_time_text("1", "5", "7"), "1:05:07");
        assert_eq!(compose_time_text("", "6", "0"), "6:00");
        assert_eq!(compose_time_text("", "6", ""), "6:00");
        assert_eq!(compose_time_text("", "", "58"), "58");
        assert_eq!(compose_time_text("", "", ""), "");
    }

    #[test]
    fn formats_minimal_leading_units() {
        assert_eq!(format_time(3723.0, Category::Long), "1:02:03");
        assert_eq!(format_time(360.0, Category::Middle), "6:00");
        assert_eq!(format_time(1118.0, Category::Middle), "18:38");
        assert_eq!(format_time(42.0, Category::Middle), "42");
        assert_eq!(format_time(0.0, Category::Ultra), "0");
    }

    #[test]
    fn non_sprint_seconds_are_floored() {
        assert_eq!(format_time(59.99, Category::Middle), "59");
        assert_eq!(format_time(755.36, Category::Middle), "12:35");
        assert_eq!(format_time(8100.0, Category::Long), "2:15:00");
    }

    #[test]
    fn sprint_seconds_keep_two_decimals() {
        assert_eq!(format_time(9.58, Category::Sprint), "9.58");
        assert_eq!(format_time(43.03, Category::Sprint), "43.03");
        assert_eq!(format_time(65.3, Category::Sprint), "1:05.30");
        assert_eq!(format_time(3605.5, Category::Sprint), "1:00:05.50");
    }

    #[test]
    fn sprint_ties_round_up() {
        assert_eq!(format_time(10.125, Category::Sprint), "10.13");
        assert_eq!(format_time(65.125, Category::Sprint), "1:05.13");
        assert_eq!(format_time(3600.375, Category::Sprint), "1:00:00.38");
        assert_eq!(format_time(0.005, Category::Sprint), "0.01");
        assert_eq!(format_time(9.58, Category::Sprint), "9.58");
    }

    #[test]
    fn negative_or_nan_formats_empty() {
        assert_eq!(format_time(-1.0, Category::Middle), "");
        assert_eq!(format_time(-0.01, Category::Sprint), "");
        assert_eq!(format_time(f64::NAN, Category::Sprint), "");
        assert_eq!(format_whole_seconds(f64::INFINITY), "");
    }

    #[test]
    fn whole_second_values_survive_parse_then_format() {
        for text in ["0", "7", "59", "1:00", "9:05", "59:59", "1:00:00", "3:07:42", "12:25:12"] {
            let secs = parse_time(text);
            assert_eq!(format_time(secs, Category::Long), text);
        }
    }
}
