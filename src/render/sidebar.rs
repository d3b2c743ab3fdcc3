use super::{heading, Palette, Tone};
use crate::core::chat::{Sender, Transcript, QUICK_PROMPTS};
use crate::core::history::History;
use crate::domain::ports::ConfigProvider;

pub fn history_panel(history: &History, palette: &Palette) -> String {
    let mut out = heading(palette, "Recent Audits");
    if history.is_empty() {
        out.push_str(&palette.paint("No recent audits\n", Tone::Slate));
        return out;
    }
    for (i, entry) in history.entries().iter().enumerate() {
        out.push_str(&format!(
            "[{}] {:<28} {}  {}\n",
            i,
            entry.name,
            palette.paint(entry.signal.as_str(), entry.signal),
            palette.paint(&entry.recorded_at.format("%H:%M:%S").to_string(), Tone::Slate)
        ));
    }
    out
}

pub fn chat_panel(transcript: &Transcript, palette: &Palette) -> String {
    let mut out = heading(palette, "Forensic AI");
    for msg in transcript.messages() {
        let tone = match msg.sender {
            Sender::User => Tone::Bold,
            Sender::Auditor => Tone::Accent,
        };
        out.push_str(&format!(
            "{}\n  {}\n",
            palette.paint(&msg.sender.label().to_uppercase(), tone),
            msg.text
        ));
    }
    out.push_str(&palette.paint("Quick prompts:\n", Tone::Slate));
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        out.push_str(&format!("  ({}) {}\n", i, prompt));
    }
    out
}

pub fn settings_panel<C: ConfigProvider>(config: &C, palette: &Palette) -> String {
    let mut out = heading(palette, "Settings");
    out.push_str(&format!("Server:         {}\n", config.server_url()));
    out.push_str(&format!("Output path:    {}\n", config.output_path()));
    out.push_str(&format!(
        "Login:          {}\n",
        config.credentials().map(|(user, _)| user).unwrap_or("(none)")
    ));
    out.push_str(&format!("Timeout:        {:?}\n", config.request_timeout()));
    out.push_str(&format!("Chat delay:     {:?}\n", config.chat_delay()));
    out.push_str(&format!("Colors:         {}\n", config.color_enabled()));
    out
}

pub fn help_panel(palette: &Palette) -> String {
    let mut out = heading(palette, "Help");
    out.push_str(
        "analyze <file>    upload a workbook to the forensic engine\n\
         tab <name>        dashboard | explorer | ai | settings\n\
         show              repaint the active tab\n\
         ask <question>    ask the AI auditor about the loaded dataset\n\
         prompt <n>        send quick prompt number n\n\
         history           list audits from this session\n\
         open <n>          reload audit n from the history\n\
         export            download the PDF report\n\
         csv [file]        save the data explorer table as CSV\n\
         help              show this help\n\
         quit              leave the dashboard\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AnalysisResult;

    #[test]
    fn test_empty_history_placeholder() {
        let panel = history_panel(&History::new(), &Palette::plain());
        assert!(panel.contains("No recent audits"));
    }

    #[test]
    fn test_history_lists_newest_first() {
        let mut history = History::new();
        history.record(&AnalysisResult::sample());
        let mut high = AnalysisResult::sample();
        high.name = "ACME".to_string();
        high.earnings_manipulation_signal = crate::domain::model::RiskSignal::High;
        history.record(&high);

        let panel = history_panel(&history, &Palette::plain());
        let first = panel.lines().find(|l| l.starts_with("[0]")).unwrap();
        assert!(first.contains("ACME"));
        assert!(first.contains("HIGH"));
        assert!(panel.lines().any(|l| l.starts_with("[1]") && l.contains("ASIAN PAINTS")));
    }

    #[test]
    fn test_chat_panel_shows_transcript_and_prompts() {
        let mut transcript = Transcript::new();
        transcript.push(Sender::User, "risk?");
        transcript.push(Sender::Auditor, "LOW");
        let panel = chat_panel(&transcript, &Palette::plain());
        assert!(panel.contains("USER\n  risk?"));
        assert!(panel.contains("AI AUDITOR\n  LOW"));
        assert!(panel.contains("(0) What is the overall risk profile?"));
    }
}
