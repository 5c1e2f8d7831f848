//! Date formatting for tables and date inputs.
use chrono::{Local, NaiveDate};

/// `2026-10-19` -> `19/10/2026`.
pub fn format_naive(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Value for `<input type="date">`.
pub fn to_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_input_value() -> String {
    to_input_value(today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_naive() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(format_naive(d), "15/03/2026");
    }

    #[test]
    fn test_input_value() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(to_input_value(d), "2026-01-05");
        assert_eq!(format_naive(d), "05/01/2026");
    }
}
