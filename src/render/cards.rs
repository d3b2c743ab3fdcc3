use super::{heading, Palette, Tone};
use crate::core::severity::{flag_rows, metric_cards, Verdict};
use crate::domain::model::AnalysisResult;

/// Forensic score cards, each with its audit description underneath.
pub fn metrics_panel(result: &AnalysisResult, palette: &Palette) -> String {
    let mut out = heading(palette, &format!("Forensic Scores: {}", result.name));
    for card in metric_cards(result) {
        out.push_str(&format!(
            "{:<18} {}\n",
            card.kind.label(),
            palette.paint(&card.display_value(), card.severity)
        ));
        out.push_str(&format!(
            "    {}\n",
            palette.paint(card.kind.definition(), Tone::Slate)
        ));
    }
    out
}

pub fn flags_panel(result: &AnalysisResult, palette: &Palette) -> String {
    let mut out = heading(palette, "Red Flags");
    out.push_str(&format!("{:<18} {:>12}  {}\n", "Metric", "Value", "Status"));
    for row in flag_rows(result) {
        out.push_str(&format!(
            "{:<18} {:>12}  {}\n",
            row.metric,
            row.value,
            palette.paint(row.status.as_str(), row.status)
        ));
    }
    out
}

pub fn verdict_panel(result: &AnalysisResult, palette: &Palette) -> String {
    let verdict = Verdict::from_signal(result.earnings_manipulation_signal);
    let line = palette.paint(verdict.headline(), result.earnings_manipulation_signal);
    format!("\n  {}\n\n", line)
}
