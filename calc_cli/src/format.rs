//! Display formatting for calculator results.
//!
//! Numbers are grouped by thousands with `,` the way the results are shown
//! to Korean users, currency gets a `원` suffix.

/// Group the integer digits of an already-formatted unsigned number.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Fixed decimals with thousands separators: `format_decimal(1234.5, 2)` is `1,234.50`.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    // -0.00 and friends print without a sign
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}{}", group_thousands(&formatted))
}

/// Rounded to an integer with thousands separators.
pub fn format_number(value: f64) -> String {
    format_decimal(value, 0)
}

pub fn format_currency(value: f64) -> String {
    format!("{}원", format_number(value))
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(703_000_330.0), "703,000,330");
        assert_eq!(format_number(1_347_134.06), "1,347,134");
        assert_eq!(format_number(-2_500.4), "-2,500");
        assert_eq!(format_number(-0.2), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(70_000.0), "70,000원");
        assert_eq!(format_currency(2_548_397.74845), "2,548,398원");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1_234.5, 2), "1,234.50");
        assert_eq!(format_decimal(22.4913, 1), "22.5");
        assert_eq!(format_decimal(123_456.0, 3), "123,456.000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(29.699967, 2), "29.70%");
        assert_eq!(format_percent(30.0, 1), "30.0%");
    }
}
