//! Colombian number formatting: `.` groups thousands, `,` marks decimals.

/// Format with thousands separators and a fixed number of decimals (max 3).
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", decimals.min(3) as usize, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{},{}", grouped, d),
        None => grouped,
    }
}

/// Peso amount: cents are shown only when present.
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    let body = if cents.fract() == 0.0 {
        format_number_with_decimals(cents.abs(), 0)
    } else {
        format_number_with_decimals(cents.abs(), 2)
    };
    if cents < 0.0 {
        format!("-$ {}", body)
    } else {
        format!("$ {}", body)
    }
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234567.0), "$ 1.234.567");
        assert_eq!(format_money(1234.5), "$ 1.234,50");
        assert_eq!(format_money(0.0), "$ 0");
        assert_eq!(format_money(-100000.0), "-$ 100.000");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(-1234.5, 2), "-1.234,50");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(999.0), "999");
        assert_eq!(format_number_int(-123456.0), "-123.456");
    }
}
