pub mod chat;
pub mod dashboard;
pub mod history;
pub mod severity;
pub mod shell;

pub use crate::domain::model::{AnalysisResult, BenfordDistribution, RiskSignal};
pub use crate::domain::ports::{AnalysisService, ConfigProvider, Storage};
pub use crate::utils::error::Result;
