//! Number formatting shared by the panels and the chat replies.

/// Groups thousands with commas and keeps at most three fraction digits,
/// trailing zeros dropped (`4500000` → `4,500,000`, `1234.5` → `1,234.5`).
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if negative && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Score display: the shortest float form, or `N/A` when the server sent null.
pub fn score(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

/// Score with a percent sign, `N/A` without one.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(4_500_000.0), "4,500,000");
        assert_eq!(group_thousands(345_000_000.0), "345,000,000");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-1_234_567.891), "-1,234,567.891");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(1.23456), "1.235");
    }

    #[test]
    fn test_score_and_percent() {
        assert_eq!(score(Some(-2.54)), "-2.54");
        assert_eq!(score(None), "N/A");
        assert_eq!(percent(Some(12.4)), "12.4%");
        assert_eq!(percent(Some(18.0)), "18%");
        assert_eq!(percent(None), "N/A");
    }
}
