use crate::core::chat::{self, Sender, Transcript, QUICK_PROMPTS};
use crate::core::history::History;
use crate::domain::model::AnalysisResult;
use crate::domain::ports::{AnalysisService, ConfigProvider, Storage};
use crate::render::{cards, charts, sidebar, Palette, Tone};
use crate::utils::error::{DashError, Result};
use crate::utils::validation::validate_workbook_path;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Explorer,
    ForensicAi,
    Settings,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "home" => Ok(Tab::Dashboard),
            "explorer" | "data" | "data-explorer" => Ok(Tab::Explorer),
            "ai" | "chat" | "forensic-ai" => Ok(Tab::ForensicAi),
            "settings" => Ok(Tab::Settings),
            other => Err(format!(
                "unknown tab '{}': expected dashboard, explorer, ai or settings",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    AwaitingData,
    AnalysisComplete,
}

impl StatusBadge {
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::AwaitingData => "AWAITING DATA",
            StatusBadge::AnalysisComplete => "ANALYSIS COMPLETE",
        }
    }
}

/// Shown while a workbook is with the server.
pub const LOADING_TEXT: &str = "Analyzing workbook...";

/// A workbook read from disk, not yet sent.
#[derive(Debug)]
pub struct PendingUpload {
    file_name: String,
    workbook: Vec<u8>,
}

impl PendingUpload {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Volatile UI state around the one result currently on screen.
pub struct Dashboard<A: AnalysisService, S: Storage, C: ConfigProvider> {
    service: A,
    storage: S,
    config: C,
    palette: Palette,
    current: Option<AnalysisResult>,
    export_enabled: bool,
    status: StatusBadge,
    loading: bool,
    active_tab: Tab,
    help_open: bool,
    history: History,
    transcript: Transcript,
}

impl<A: AnalysisService, S: Storage, C: ConfigProvider> Dashboard<A, S, C> {
    pub fn new(service: A, storage: S, config: C) -> Self {
        let palette = Palette::new(config.color_enabled());
        Self {
            service,
            storage,
            config,
            palette,
            current: None,
            export_enabled: false,
            status: StatusBadge::AwaitingData,
            loading: false,
            active_tab: Tab::Dashboard,
            help_open: false,
            history: History::new(),
            transcript: Transcript::new(),
        }
    }

    /// Opens a server session when credentials are configured.
    pub async fn sign_in(&self) -> Result<bool> {
        match self.config.credentials() {
            Some((username, password)) => {
                self.service.login(username, password).await?;
                Ok(true)
            }
            None => {
                tracing::debug!("No credentials configured, skipping login");
                Ok(false)
            }
        }
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.service.logout().await
    }

    /// Uploads the workbook and paints the returned result.
    pub async fn run_analysis(&mut self, path: Option<&Path>) -> Result<&AnalysisResult> {
        let upload = self.begin_analysis(path).await?;
        self.finish_analysis(upload).await
    }

    /// Validates and reads the workbook, then raises the loading indicator.
    /// Nothing changes when the file is rejected.
    pub async fn begin_analysis(&mut self, path: Option<&Path>) -> Result<PendingUpload> {
        let path = path.ok_or(DashError::NoFileSelected)?;
        validate_workbook_path(path)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(DashError::NoFileSelected)?;
        let workbook = tokio::fs::read(path).await?;

        self.loading = true;
        Ok(PendingUpload {
            file_name,
            workbook,
        })
    }

    /// Sends a workbook from `begin_analysis`. The loading indicator is
    /// cleared whether or not the server accepts it.
    pub async fn finish_analysis(&mut self, upload: PendingUpload) -> Result<&AnalysisResult> {
        let PendingUpload {
            file_name,
            workbook,
        } = upload;

        tracing::info!("📤 Uploading {} ({} bytes) for analysis", file_name, workbook.len());
        let outcome = self.service.analyze(&file_name, workbook).await;
        self.loading = false;

        let result = outcome.map_err(|e| {
            tracing::warn!("Analysis of {} failed: {}", file_name, e);
            e
        })?;
        tracing::info!(
            "✅ Analysis complete for {} (signal: {})",
            result.name,
            result.earnings_manipulation_signal
        );

        Ok(self.render_all(result))
    }

    /// Makes `result` the current dataset and records it in the history.
    pub fn render_all(&mut self, result: AnalysisResult) -> &AnalysisResult {
        self.history.record(&result);
        self.show_result(result)
    }

    fn show_result(&mut self, result: AnalysisResult) -> &AnalysisResult {
        self.export_enabled = true;
        self.status = StatusBadge::AnalysisComplete;
        self.current.insert(result)
    }

    /// Re-paints history entry `index` without adding a new entry.
    pub fn open_history(&mut self, index: usize) -> Option<&AnalysisResult> {
        let result = self.history.nth(index)?.result.clone();
        Some(self.show_result(result))
    }

    /// Downloads the PDF report for the current dataset. `Ok(None)` when
    /// nothing is loaded yet.
    pub async fn export_pdf(&self) -> Result<Option<String>> {
        let Some(current) = self.current.as_ref().filter(|_| self.export_enabled) else {
            tracing::debug!("Export requested with no dataset loaded");
            return Ok(None);
        };

        let pdf = self.service.export_pdf(current).await?;
        let stored = self
            .storage
            .write_file(&current.report_file_name(), &pdf)
            .await?;
        tracing::info!("📄 PDF report saved to {}", stored);
        Ok(Some(stored))
    }

    /// Writes the data explorer table as CSV. `Ok(None)` when nothing is loaded.
    pub async fn export_explorer_csv(&self, file_name: Option<&str>) -> Result<Option<String>> {
        let Some(current) = self.current.as_ref() else {
            return Ok(None);
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Metric", "Value"])?;
        for (label, value) in current.explorer_rows() {
            writer.write_record([label.to_string(), value.to_string()])?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| DashError::IoError(e.into_error()))?;

        let default_name = format!("Data_Explorer_{}.csv", current.name);
        let stored = self
            .storage
            .write_file(file_name.unwrap_or(&default_name), &data)
            .await?;
        tracing::info!("💾 Data explorer saved to {}", stored);
        Ok(Some(stored))
    }

    /// Sends `query` to the scripted auditor and returns its reply.
    pub async fn ask(&mut self, query: &str) -> String {
        self.transcript.push(Sender::User, query);

        let delay = self.config.chat_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let reply = chat::respond(query, self.current.as_ref());
        self.transcript.push(Sender::Auditor, reply.clone());
        reply
    }

    pub async fn quick_prompt(&mut self, index: usize) -> Option<String> {
        let prompt = QUICK_PROMPTS.get(index)?;
        Some(self.ask(prompt).await)
    }

    pub fn show_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Text for the active tab.
    pub fn view(&self) -> String {
        let mut out = format!(
            "{}  [{}]\n\n",
            self.palette.paint("VIGILANCE", Tone::Bold),
            self.palette.paint(self.status.label(), Tone::Slate)
        );
        if self.loading {
            out.push_str(&format!("⏳ {}\n\n", LOADING_TEXT));
        }

        match self.active_tab {
            Tab::Dashboard => match &self.current {
                Some(result) => {
                    out.push_str(&cards::metrics_panel(result, &self.palette));
                    out.push('\n');
                    out.push_str(&charts::benford_panel(result.benford.as_ref(), &self.palette));
                    out.push('\n');
                    out.push_str(&cards::flags_panel(result, &self.palette));
                    out.push_str(&cards::verdict_panel(result, &self.palette));
                    out.push_str(&sidebar::history_panel(&self.history, &self.palette));
                }
                None => {
                    out.push_str("No analysis loaded. Upload a workbook to begin.\n\n");
                    out.push_str(&sidebar::history_panel(&self.history, &self.palette));
                }
            },
            Tab::Explorer => match &self.current {
                Some(result) => out.push_str(&charts::explorer_panel(result, &self.palette)),
                None => out.push_str("No analysis loaded.\n"),
            },
            Tab::ForensicAi => out.push_str(&sidebar::chat_panel(&self.transcript, &self.palette)),
            Tab::Settings => out.push_str(&sidebar::settings_panel(&self.config, &self.palette)),
        }

        if self.help_open {
            out.push('\n');
            out.push_str(&sidebar::help_panel(&self.palette));
        }
        out
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn export_enabled(&self) -> bool {
        self.export_enabled
    }

    pub fn status(&self) -> StatusBadge {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(format!("mock/{}", path))
        }
    }

    /// Scripted stand-in for the analysis server.
    #[derive(Clone, Default)]
    struct MockService {
        fail_with: Option<String>,
        uploads: Arc<Mutex<Vec<String>>>,
        logins: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AnalysisService for MockService {
        async fn login(&self, username: &str, _password: &str) -> Result<()> {
            self.logins.lock().await.push(username.to_string());
            Ok(())
        }

        async fn analyze(&self, file_name: &str, _workbook: Vec<u8>) -> Result<AnalysisResult> {
            self.uploads.lock().await.push(file_name.to_string());
            if let Some(message) = &self.fail_with {
                return Err(DashError::ServerError {
                    status: 400,
                    message: message.clone(),
                });
            }
            let mut result = AnalysisResult::sample();
            result.name = file_name.split('.').next().unwrap_or_default().to_uppercase();
            Ok(result)
        }

        async fn export_pdf(&self, result: &AnalysisResult) -> Result<Vec<u8>> {
            Ok(format!("%PDF {}", result.name).into_bytes())
        }

        async fn logout(&self) -> Result<()> {
            Ok(())
        }
    }

    struct MockConfig {
        credentials: Option<(String, String)>,
    }

    impl ConfigProvider for MockConfig {
        fn server_url(&self) -> &str {
            "http://test.local"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn credentials(&self) -> Option<(&str, &str)> {
            self.credentials
                .as_ref()
                .map(|(u, p)| (u.as_str(), p.as_str()))
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn chat_delay(&self) -> Duration {
            Duration::ZERO
        }

        fn color_enabled(&self) -> bool {
            false
        }
    }

    fn dashboard(
        service: MockService,
        storage: MockStorage,
    ) -> Dashboard<MockService, MockStorage, MockConfig> {
        Dashboard::new(service, storage, MockConfig { credentials: None })
    }

    fn workbook(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"PK\x03\x04").unwrap();
        path
    }

    #[test]
    fn test_initial_state() {
        let dash = dashboard(MockService::default(), MockStorage::default());
        assert!(dash.current().is_none());
        assert!(!dash.export_enabled());
        assert_eq!(dash.status(), StatusBadge::AwaitingData);
        assert_eq!(dash.active_tab(), Tab::Dashboard);
        assert!(dash.view().contains("No analysis loaded"));
        assert!(dash.view().contains("No recent audits"));
    }

    #[test]
    fn test_render_all_enables_export_and_records_history() {
        let mut dash = dashboard(MockService::default(), MockStorage::default());
        dash.render_all(AnalysisResult::sample());

        assert!(dash.export_enabled());
        assert_eq!(dash.status().label(), "ANALYSIS COMPLETE");
        assert_eq!(dash.history().len(), 1);
        let view = dash.view();
        assert!(view.contains("Forensic Scores: ASIAN PAINTS LTD"));
        assert!(view.contains("LOW RISK DETECTED"));
    }

    #[tokio::test]
    async fn test_run_analysis_without_file() {
        let mut dash = dashboard(MockService::default(), MockStorage::default());
        let err = dash.run_analysis(None).await.unwrap_err();
        assert!(matches!(err, DashError::NoFileSelected));
    }

    #[tokio::test]
    async fn test_run_analysis_renders_result() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = workbook(&dir, "acme.xlsx");
        let service = MockService::default();
        let mut dash = dashboard(service.clone(), MockStorage::default());

        let result = dash.run_analysis(Some(&path)).await.unwrap();
        assert_eq!(result.name, "ACME");
        assert!(!dash.is_loading());
        assert_eq!(dash.history().nth(0).unwrap().name, "ACME");
        assert_eq!(service.uploads.lock().await.as_slice(), ["acme.xlsx"]);
    }

    #[tokio::test]
    async fn test_loading_indicator_spans_the_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = workbook(&dir, "acme.xlsx");
        let mut dash = dashboard(MockService::default(), MockStorage::default());

        let upload = dash.begin_analysis(Some(&path)).await.unwrap();
        assert_eq!(upload.file_name(), "acme.xlsx");
        assert!(dash.is_loading());
        assert!(dash.view().contains(LOADING_TEXT));

        dash.finish_analysis(upload).await.unwrap();
        assert!(!dash.is_loading());
        assert!(!dash.view().contains(LOADING_TEXT));
    }

    #[tokio::test]
    async fn test_rejected_file_never_shows_loading() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = workbook(&dir, "notes.txt");
        let mut dash = dashboard(MockService::default(), MockStorage::default());

        assert!(dash.begin_analysis(Some(&path)).await.is_err());
        assert!(!dash.is_loading());
    }

    #[tokio::test]
    async fn test_failed_analysis_keeps_previous_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = workbook(&dir, "broken.xlsx");
        let service = MockService {
            fail_with: Some("Invalid Excel file".to_string()),
            ..Default::default()
        };
        let mut dash = dashboard(service, MockStorage::default());
        dash.render_all(AnalysisResult::sample());

        let err = dash.run_analysis(Some(&path)).await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "Invalid Excel file");
        assert!(!dash.is_loading());
        assert_eq!(dash.current().unwrap().name, "ASIAN PAINTS LTD");
        assert_eq!(dash.history().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected_before_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = workbook(&dir, "notes.txt");
        let service = MockService::default();
        let mut dash = dashboard(service.clone(), MockStorage::default());

        assert!(dash.run_analysis(Some(&path)).await.is_err());
        assert!(service.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_export_without_data_is_noop() {
        let storage = MockStorage::default();
        let dash = dashboard(MockService::default(), storage.clone());
        assert_eq!(dash.export_pdf().await.unwrap(), None);
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_export_saves_report() {
        let storage = MockStorage::default();
        let mut dash = dashboard(MockService::default(), storage.clone());
        dash.render_all(AnalysisResult::sample());

        let stored = dash.export_pdf().await.unwrap().unwrap();
        assert_eq!(stored, "mock/Forensic_Report_ASIAN PAINTS LTD.pdf");
        let bytes = storage
            .get_file("Forensic_Report_ASIAN PAINTS LTD.pdf")
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF ASIAN PAINTS LTD");
    }

    #[tokio::test]
    async fn test_explorer_csv() {
        let storage = MockStorage::default();
        let mut dash = dashboard(MockService::default(), storage.clone());
        assert_eq!(dash.export_explorer_csv(None).await.unwrap(), None);

        dash.render_all(AnalysisResult::sample());
        dash.export_explorer_csv(Some("explorer.csv")).await.unwrap();

        let csv = String::from_utf8(storage.get_file("explorer.csv").await.unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Metric,Value");
        assert_eq!(lines[1], "Reported Revenue,345000000");
        assert_eq!(lines[7], "Profit Before Tax,107000000");
    }

    #[tokio::test]
    async fn test_open_history_does_not_duplicate() {
        let mut dash = dashboard(MockService::default(), MockStorage::default());
        dash.render_all(AnalysisResult::sample());
        let mut other = AnalysisResult::sample();
        other.name = "ACME".to_string();
        dash.render_all(other);

        let reopened = dash.open_history(1).unwrap();
        assert_eq!(reopened.name, "ASIAN PAINTS LTD");
        assert_eq!(dash.history().len(), 2);
        assert!(dash.open_history(5).is_none());
    }

    #[tokio::test]
    async fn test_chat_uses_current_dataset() {
        let mut dash = dashboard(MockService::default(), MockStorage::default());
        assert_eq!(dash.ask("risk?").await, chat::NO_DATA_REPLY);

        dash.render_all(AnalysisResult::sample());
        let reply = dash.quick_prompt(0).await.unwrap();
        assert!(reply.contains("manipulation signal is LOW"));
        assert_eq!(dash.transcript().messages().len(), 4);
        assert!(dash.quick_prompt(99).await.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_only_with_credentials() {
        let service = MockService::default();
        let dash = dashboard(service.clone(), MockStorage::default());
        assert!(!dash.sign_in().await.unwrap());

        let dash = Dashboard::new(
            service.clone(),
            MockStorage::default(),
            MockConfig {
                credentials: Some(("admin".to_string(), "admin123".to_string())),
            },
        );
        assert!(dash.sign_in().await.unwrap());
        assert_eq!(service.logins.lock().await.as_slice(), ["admin"]);
    }

    #[test]
    fn test_tabs_and_help() {
        let mut dash = dashboard(MockService::default(), MockStorage::default());
        dash.render_all(AnalysisResult::sample());

        dash.show_tab("explorer".parse().unwrap());
        assert!(dash.view().contains("Data Explorer"));

        dash.show_tab(Tab::Settings);
        assert!(dash.view().contains("http://test.local"));

        dash.open_help();
        assert!(dash.view().contains("export            download the PDF report"));
        dash.close_help();
        assert!(!dash.help_open());

        assert!("nowhere".parse::<Tab>().is_err());
    }
}
