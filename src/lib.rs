pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ForensicClient, LocalStorage};
pub use core::dashboard::{Dashboard, Tab};
pub use domain::model::{AnalysisResult, BenfordDistribution, RiskSignal};
pub use utils::error::{DashError, Result};
