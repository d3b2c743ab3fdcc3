use crate::domain::model::{AnalysisResult, RiskSignal};
use crate::utils::format;

const BENEISH_THRESHOLD: f64 = -1.78;
const ACCRUALS_THRESHOLD: f64 = 25.0;
const TAX_THRESHOLD: f64 = 10.0;
const DEBT_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Beneish,
    Accruals,
    Tax,
    Debt,
    Cash,
}

impl MetricKind {
    /// Card order on the dashboard.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Beneish,
        MetricKind::Accruals,
        MetricKind::Tax,
        MetricKind::Debt,
        MetricKind::Cash,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Beneish => "Beneish M-Score",
            MetricKind::Accruals => "Accruals Gap (%)",
            MetricKind::Tax => "Tax Gap (%)",
            MetricKind::Debt => "Debt Stress (%)",
            MetricKind::Cash => "Cash Quality (%)",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            MetricKind::Beneish => "Beneish M-Score: A mathematical model using 8 financial ratios to identify if a company has manipulated its earnings. A score > -1.78 suggests a high probability of manipulation.",
            MetricKind::Accruals => "Accruals Gap: Measures the difference between reported net income and actual operating cash flow. High positive accruals often signal aggressive non-cash earnings recognition.",
            MetricKind::Tax => "Tax Gap: The discrepancy between book tax (reported) and cash tax (paid). Significant gaps can indicate that paper profits are not supported by real taxable events.",
            MetricKind::Debt => "Debt Stress: Evaluates total borrowings against asset quality. Excessive leverage increases the management's incentive to window-dress financial statements.",
            MetricKind::Cash => "Cash Quality: Percentage of revenue converted into operating cash. Values below 70% suggest that sales may not be resulting in actual cash collection.",
        }
    }

    pub fn value(&self, result: &AnalysisResult) -> Option<f64> {
        match self {
            MetricKind::Beneish => result.beneish_m_score,
            MetricKind::Accruals => result.accruals_gap,
            MetricKind::Tax => result.tax_gap,
            MetricKind::Debt => result.debt_asset_stress,
            MetricKind::Cash => result.cash_quality,
        }
    }
}

/// Coloring of a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Unknown,
    Healthy,
    Elevated,
}

/// Debt and cash quality never color as elevated on the cards; debt only
/// shows up as critical in the flag table.
pub fn severity(kind: MetricKind, value: Option<f64>) -> Severity {
    let value = match value {
        Some(v) if !v.is_nan() => v,
        _ => return Severity::Unknown,
    };

    let elevated = match kind {
        MetricKind::Beneish => value > BENEISH_THRESHOLD,
        MetricKind::Accruals => value > ACCRUALS_THRESHOLD,
        MetricKind::Tax => value > TAX_THRESHOLD,
        MetricKind::Debt | MetricKind::Cash => false,
    };

    if elevated {
        Severity::Elevated
    } else {
        Severity::Healthy
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub kind: MetricKind,
    pub value: Option<f64>,
    pub severity: Severity,
}

impl MetricCard {
    pub fn display_value(&self) -> String {
        format::score(self.value)
    }
}

pub fn metric_cards(result: &AnalysisResult) -> Vec<MetricCard> {
    MetricKind::ALL
        .iter()
        .map(|&kind| {
            let value = kind.value(result);
            MetricCard {
                kind,
                value,
                severity: severity(kind, value),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStatus {
    Critical,
    Optimal,
}

impl FlagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagStatus::Critical => "CRITICAL",
            FlagStatus::Optimal => "OPTIMAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagRow {
    pub metric: &'static str,
    pub value: String,
    pub status: FlagStatus,
}

fn flag_status(value: Option<f64>, threshold: f64) -> FlagStatus {
    match value {
        Some(v) if v > threshold => FlagStatus::Critical,
        _ => FlagStatus::Optimal,
    }
}

/// Red-flag table rows. A missing score never raises a flag.
pub fn flag_rows(result: &AnalysisResult) -> Vec<FlagRow> {
    vec![
        FlagRow {
            metric: "Beneish M-Score",
            value: format::score(result.beneish_m_score),
            status: flag_status(result.beneish_m_score, BENEISH_THRESHOLD),
        },
        FlagRow {
            metric: "Accruals Gap",
            value: format::percent(result.accruals_gap),
            status: flag_status(result.accruals_gap, ACCRUALS_THRESHOLD),
        },
        FlagRow {
            metric: "Tax Gap",
            value: format::percent(result.tax_gap),
            status: flag_status(result.tax_gap, TAX_THRESHOLD),
        },
        FlagRow {
            metric: "Debt Stress",
            value: format::percent(result.debt_asset_stress),
            status: flag_status(result.debt_asset_stress, DEBT_THRESHOLD),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    HighRisk,
    LowRisk,
}

impl Verdict {
    pub fn from_signal(signal: RiskSignal) -> Self {
        if signal.is_high() {
            Verdict::HighRisk
        } else {
            Verdict::LowRisk
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::HighRisk => "⚠️ HIGH RISK DETECTED",
            Verdict::LowRisk => "✅ LOW RISK DETECTED",
        }
    }
}
