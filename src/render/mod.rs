//! Text panels for the terminal dashboard.
//!
//! Every panel is a pure function from state to `String` so the shell can
//! print it and tests can assert on it. Colors are plain ANSI escapes and
//! can be switched off with [`Palette::plain`].

pub mod cards;
pub mod charts;
pub mod sidebar;

use crate::core::severity::{FlagStatus, Severity};
use crate::domain::model::RiskSignal;

pub const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Rose,
    Emerald,
    Slate,
    Accent,
    Bold,
}

impl Tone {
    fn code(&self) -> &'static str {
        match self {
            Tone::Rose => "31",
            Tone::Emerald => "32",
            Tone::Slate => "90",
            Tone::Accent => "1;34",
            Tone::Bold => "1",
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Elevated => Tone::Rose,
            Severity::Healthy => Tone::Emerald,
            Severity::Unknown => Tone::Slate,
        }
    }
}

impl From<FlagStatus> for Tone {
    fn from(status: FlagStatus) -> Self {
        match status {
            FlagStatus::Critical => Tone::Rose,
            FlagStatus::Optimal => Tone::Emerald,
        }
    }
}

impl From<RiskSignal> for Tone {
    fn from(signal: RiskSignal) -> Self {
        match signal {
            RiskSignal::High => Tone::Rose,
            RiskSignal::Low => Tone::Emerald,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, text: &str, tone: impl Into<Tone>) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", tone.into().code(), text)
        } else {
            text.to_string()
        }
    }
}

/// Horizontal bar of `value / max` scaled to `width` cells.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.min(width))
}

pub fn heading(palette: &Palette, title: &str) -> String {
    format!("{}\n{}\n", palette.paint(title, Tone::Accent), "─".repeat(title.chars().count()))
}
