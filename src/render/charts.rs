use super::{bar, heading, Palette, Tone, BAR_WIDTH};
use crate::domain::model::{AnalysisResult, BenfordDistribution};
use crate::utils::format::group_thousands;

/// Actual first-digit frequencies as bars, theoretical values alongside.
pub fn benford_panel(benford: Option<&BenfordDistribution>, palette: &Palette) -> String {
    let mut out = heading(palette, "Benford's Law: First Digit Distribution");

    let Some(benford) = benford else {
        out.push_str(&palette.paint("Benford distribution unavailable\n", Tone::Slate));
        return out;
    };

    let max = benford
        .actual
        .iter()
        .chain(benford.theoretical.iter())
        .copied()
        .fold(0.0_f64, f64::max);

    out.push_str(&format!(
        "{:>5}  {:<width$}  {:>7}  {:>11}\n",
        "Digit",
        "",
        "Actual",
        "Theoretical",
        width = BAR_WIDTH
    ));
    for (digit, actual, theoretical) in benford.rows() {
        let marker = if Some(digit) == benford.hotspot { "◀" } else { "" };
        out.push_str(&format!(
            "{:>5}  {:<width$}  {:>6.1}%  {:>10.1}% {}\n",
            digit,
            palette.paint(&bar(actual, max, BAR_WIDTH), Tone::Accent),
            actual,
            theoretical,
            marker,
            width = BAR_WIDTH
        ));
    }

    if let Some(mad) = benford.mad {
        out.push_str(&format!("MAD: {}\n", mad));
    }
    if let Some(hotspot) = benford.hotspot {
        out.push_str(&format!("Largest deviation at digit {}\n", hotspot));
    }
    out
}

/// Data explorer: the raw extracted values as a table and a bar chart.
pub fn explorer_panel(result: &AnalysisResult, palette: &Palette) -> String {
    let rows = result.explorer_rows();
    let mut out = heading(palette, "Data Explorer");

    for (label, value) in rows.iter() {
        out.push_str(&format!("{:<22} {:>20}\n", label, group_thousands(*value)));
    }

    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    out.push('\n');
    for (label, value) in rows.iter() {
        out.push_str(&format!(
            "{:<22} {}\n",
            label,
            palette.paint(&bar(*value, max, BAR_WIDTH), Tone::Accent)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benford_panel_has_nine_digit_rows() {
        let sample = AnalysisResult::sample();
        let panel = benford_panel(sample.benford.as_ref(), &Palette::plain());
        let digit_rows = panel
            .lines()
            .filter(|l| l.trim_start().chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(digit_rows, 9);
        assert!(panel.contains("30.5%"));
        assert!(panel.contains("4.6%"));
        assert!(!panel.contains("MAD"));
    }

    #[test]
    fn test_benford_panel_marks_hotspot() {
        let mut benford = AnalysisResult::sample().benford.unwrap();
        benford.mad = Some(0.0142);
        benford.hotspot = Some(3);
        let panel = benford_panel(Some(&benford), &Palette::plain());
        assert!(panel.contains("MAD: 0.0142"));
        assert!(panel.contains("Largest deviation at digit 3"));
        assert_eq!(panel.matches('◀').count(), 1);
    }

    #[test]
    fn test_benford_panel_without_distribution() {
        let panel = benford_panel(None, &Palette::plain());
        assert!(panel.contains("Benford distribution unavailable"));
    }

    #[test]
    fn test_explorer_panel_groups_values() {
        let panel = explorer_panel(&AnalysisResult::sample(), &Palette::plain());
        assert!(panel.contains("Reported Revenue"));
        assert!(panel.contains("345,000,000"));
        assert!(panel.contains("1,200,000,000"));
        assert!(panel.contains("Profit Before Tax"));
    }
}
