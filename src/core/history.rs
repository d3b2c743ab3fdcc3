use crate::domain::model::{AnalysisResult, RiskSignal};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub signal: RiskSignal,
    pub recorded_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

/// Audits run in this session, newest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    last_millis: i64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry and returns its id (`entry_<unix millis>`).
    pub fn record(&mut self, result: &AnalysisResult) -> String {
        let now = Utc::now();
        // two entries inside the same millisecond still need distinct ids
        let millis = now.timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;

        let id = format!("entry_{}", millis);
        self.entries.insert(
            0,
            HistoryEntry {
                id: id.clone(),
                name: result.name.clone(),
                signal: result.earnings_manipulation_signal,
                recorded_at: now,
                result: result.clone(),
            },
        );
        tracing::debug!("History entry {} recorded for {}", id, result.name);
        id
    }

    /// Entry by its position in the displayed list (0 = newest).
    pub fn nth(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
