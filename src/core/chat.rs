use crate::domain::model::AnalysisResult;
use crate::utils::format;

pub const NO_DATA_REPLY: &str = "Please upload an Excel workbook to begin the forensic audit.";

/// Canned questions offered next to the chat input.
pub const QUICK_PROMPTS: &[&str] = &[
    "What is the overall risk profile?",
    "Explain the accruals gap",
    "Does the tax gap look suspicious?",
    "Summarize debt and cash quality",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Auditor,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Auditor => "AI Auditor",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Picks the canned reply for `query`. Keywords are checked in a fixed
/// order: risk, accruals, tax; anything else gets the debt/cash summary.
pub fn respond(query: &str, current: Option<&AnalysisResult>) -> String {
    let Some(data) = current else {
        return NO_DATA_REPLY.to_string();
    };

    let q = query.to_lowercase();
    if q.contains("risk") {
        format!(
            "Based on current data for {}, the manipulation signal is {}. The Beneish M-Score stands at {}.",
            data.name,
            data.earnings_manipulation_signal,
            format::score(data.beneish_m_score)
        )
    } else if q.contains("accruals") {
        format!(
            "The Accruals Gap is {}. Typically, values over 25% indicate aggressive accounting.",
            format::percent(data.accruals_gap)
        )
    } else if q.contains("tax") {
        format!(
            "The Tax Gap is {}. This checks if provisioned tax ({}) aligns with reported profits.",
            format::percent(data.tax_gap),
            format::group_thousands(data.tax_paid.unwrap_or(0.0))
        )
    } else {
        format!(
            "Regarding {}, we see a Debt Stress of {} and Cash Quality of {}. Which would you like to deep-dive into?",
            data.name,
            format::percent(data.debt_asset_stress),
            format::percent(data.cash_quality)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

}
