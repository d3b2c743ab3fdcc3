use crate::domain::model::AnalysisResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn credentials(&self) -> Option<(&str, &str)>;
    fn request_timeout(&self) -> Duration;
    fn chat_delay(&self) -> Duration;
    fn color_enabled(&self) -> bool;
}

/// The remote forensic engine: it owns every computation, the dashboard only paints.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<()>;
    async fn analyze(&self, file_name: &str, workbook: Vec<u8>) -> Result<AnalysisResult>;
    async fn export_pdf(&self, result: &AnalysisResult) -> Result<Vec<u8>>;
    async fn logout(&self) -> Result<()>;
}
