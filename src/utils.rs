use chrono::NaiveDate;

/// Left-pads a month token with zeros to width 2 (`"3"` -> `"03"`).
///
/// Tokens that are already two or more characters wide are returned untouched,
/// and a leading sign stays in front of the padding (`"-1"` is left as is).
pub fn pad_month(token: &str) -> String {
    let width = 2;
    let len = token.chars().count();
    if len >= width {
        return token.to_string();
    }

    match token.strip_prefix(|c: char| c == '+' || c == '-') {
        Some(digits) => {
            let sign = &token[..1];
            format!("{}{:0>w$}", sign, digits, w = width - 1)
        }
        None => format!("{:0>w$}", token, w = width),
    }
}

/// First calendar day of the given month, or `None` when the month is out of
/// range or the year is outside what `NaiveDate` can represent.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_month() {
        assert_eq!(pad_month("3"), "03");
        assert_eq!(pad_month("03"), "03");
        assert_eq!(pad_month("12"), "12");
        assert_eq!(pad_month(""), "00");
        assert_eq!(pad_month("-1"), "-1");
        assert_eq!(pad_month("+"), "+0");
    }

    #[test]
    fn test_first_day_of_month() {
        assert_eq!(
            first_day_of_month(2024, 3),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            first_day_of_month(2023, 12),
            NaiveDate::from_ymd_opt(2023, 12, 1)
        );
        assert!(first_day_of_month(2024, 0).is_none());
        assert!(first_day_of_month(2024, 13).is_none());
    }
}
