use serde::{Deserialize, Serialize};

/// Earnings manipulation signal as reported by the analysis server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskSignal {
    High,
    #[default]
    Low,
}

impl From<String> for RiskSignal {
    fn from(value: String) -> Self {
        // anything the server does not call HIGH is treated as low risk
        if value == "HIGH" {
            RiskSignal::High
        } else {
            RiskSignal::Low
        }
    }
}

impl From<RiskSignal> for String {
    fn from(value: RiskSignal) -> Self {
        value.as_str().to_string()
    }
}

impl RiskSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSignal::High => "HIGH",
            RiskSignal::Low => "LOW",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskSignal::High)
    }
}

impl std::fmt::Display for RiskSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First-digit distribution, percentages indexed by digit 1..=9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenfordDistribution {
    pub actual: Vec<f64>,
    pub theoretical: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mad: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<u8>,
}

impl BenfordDistribution {
    /// `(digit, actual, theoretical)` for the digits both series cover.
    pub fn rows(&self) -> impl Iterator<Item = (u8, f64, f64)> + '_ {
        self.actual
            .iter()
            .zip(self.theoretical.iter())
            .take(9)
            .enumerate()
            .map(|(i, (a, t))| (i as u8 + 1, *a, *t))
    }
}

/// The flat record returned by `/analyze` and echoed back to `/export-pdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,

    pub beneish_m_score: Option<f64>,
    pub accruals_gap: Option<f64>,
    pub tax_gap: Option<f64>,
    pub debt_asset_stress: Option<f64>,
    pub cash_quality: Option<f64>,

    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub ocf: Option<f64>,
    #[serde(default)]
    pub receivables: Option<f64>,
    #[serde(default)]
    pub borrowings: Option<f64>,
    #[serde(default)]
    pub tax_paid: Option<f64>,
    #[serde(default)]
    pub pbt: Option<f64>,

    #[serde(default)]
    pub earnings_manipulation_signal: RiskSignal,
    #[serde(default)]
    pub benford: Option<BenfordDistribution>,

    /// Fields this client does not know about, sent back untouched on export.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnalysisResult {
    /// Dataset painted before the first upload.
    pub fn sample() -> Self {
        Self {
            name: "ASIAN PAINTS LTD".to_string(),
            beneish_m_score: Some(-2.54),
            accruals_gap: Some(12.4),
            tax_gap: Some(4.2),
            debt_asset_stress: Some(18.1),
            cash_quality: Some(92.4),
            revenue: Some(345_000_000.0),
            total_assets: Some(1_200_000_000.0),
            ocf: Some(85_000_000.0),
            receivables: Some(42_000_000.0),
            borrowings: Some(217_000_000.0),
            tax_paid: Some(4_500_000.0),
            pbt: Some(107_000_000.0),
            earnings_manipulation_signal: RiskSignal::Low,
            benford: Some(BenfordDistribution {
                actual: vec![30.5, 17.2, 12.1, 9.4, 8.1, 6.5, 5.9, 5.2, 5.1],
                theoretical: vec![30.1, 17.6, 12.5, 9.7, 7.9, 6.7, 5.8, 5.1, 4.6],
                mad: None,
                hotspot: None,
            }),
            extra: serde_json::Map::new(),
        }
    }

    /// Raw values for the data explorer, missing ones shown as zero.
    pub fn explorer_rows(&self) -> [(&'static str, f64); 7] {
        [
            ("Reported Revenue", self.revenue.unwrap_or(0.0)),
            ("Total Assets", self.total_assets.unwrap_or(0.0)),
            ("Operating Cash Flow", self.ocf.unwrap_or(0.0)),
            ("Trade Receivables", self.receivables.unwrap_or(0.0)),
            ("Total Borrowings", self.borrowings.unwrap_or(0.0)),
            ("Tax Provision", self.tax_paid.unwrap_or(0.0)),
            ("Profit Before Tax", self.pbt.unwrap_or(0.0)),
        ]
    }

    pub fn report_file_name(&self) -> String {
        format!("Forensic_Report_{}.pdf", self.name)
    }
}
