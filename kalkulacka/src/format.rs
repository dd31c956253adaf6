//! Number formatting for the display
//!
//! Twelve significant digits, `.` as the decimal point no matter the
//! locale. Fixed notation while the decimal exponent stays in `(-5, 12)`,
//! exponent notation (`1.5E+20`, `1E-05`) outside of it.

/// Significant digits kept on screen.
pub const SIGNIFICANT_DIGITS: usize = 12;

/// Smallest decimal exponent still shown in fixed notation.
const MIN_FIXED_EXPONENT: i32 = -4;

pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }

    // Round to the kept digits first so that the exponent reflects carries
    // (999999999999.7 becomes 1E+12, not 1000000000000).
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (MIN_FIXED_EXPONENT..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

/// Parse display text back into a number. Anything unparsable is zero.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(123456789012.0), "123456789012");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.666666666667");
        assert_eq!(format_number(-0.75), "-0.75");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00012345), "0.00012345");
    }

    #[test]
    fn test_twelve_significant_digits() {
        assert_eq!(format_number(3.14159265358979), "3.14159265359");
        assert_eq!(format_number(1234.56789012345), "1234.56789012");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(format_number(1e12), "1E+12");
        assert_eq!(format_number(1.5e20), "1.5E+20");
        assert_eq!(format_number(-2.5e15), "-2.5E+15");
        assert_eq!(format_number(0.00001), "1E-05");
        assert_eq!(format_number(0.000012345), "1.2345E-05");
        assert_eq!(format_number(0.000001), "1E-06");
        assert_eq!(format_number(1.25e-7), "1.25E-07");
        assert_eq!(format_number(1e100), "1E+100");
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(format_number(999999999999.7), "1E+12");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number("0."), 0.0);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
    }
}
