use crate::domain::model::AnalysisResult;
use crate::domain::ports::AnalysisService;
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const LOGIN_ENDPOINT: &str = "login";
const LOGOUT_ENDPOINT: &str = "logout";
const ANALYZE_ENDPOINT: &str = "analyze";
const EXPORT_PDF_ENDPOINT: &str = "export-pdf";
const WORKBOOK_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// HTTP client for the forensic analysis server.
///
/// The server keys every request on a session cookie set by `/login`, so the
/// underlying client keeps a cookie store. Redirects are not followed: a
/// successful login answers with a redirect to the dashboard, a failed one
/// re-renders the form.
#[derive(Clone)]
pub struct ForensicClient {
    base_url: Url,
    client: Client,
}

impl ForensicClient {
    pub fn new(base_url_str: &str) -> Result<Self> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    pub fn with_timeout(base_url_str: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Turns a JSON response into a value, mapping `{"error": ...}` bodies to errors.
    async fn read_json(response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        let json: Option<Value> = serde_json::from_str(&body).ok();
        let server_message = json
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|e| e.as_str())
            .map(str::to_string);

        if status == StatusCode::UNAUTHORIZED {
            return Err(DashError::Unauthorized);
        }

        if let Some(message) = server_message {
            return Err(DashError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            return Err(DashError::ServerError {
                status: status.as_u16(),
                message: format!("HTTP {} - {}", status.as_u16(), body.trim()),
            });
        }

        match json {
            Some(value) => Ok(value),
            None => Err(DashError::ServerError {
                status: status.as_u16(),
                message: "Response was not valid JSON".to_string(),
            }),
        }
    }
}

#[async_trait]
impl AnalysisService for ForensicClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.endpoint(LOGIN_ENDPOINT)?;
        tracing::debug!("Logging in to {} as {}", url, username);

        let response = self
            .client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if status.is_redirection() {
            tracing::info!("🔐 Session established for {}", username);
            return Ok(());
        }

        tracing::warn!("Login rejected with HTTP {}", status.as_u16());
        Err(DashError::AuthenticationError {
            message: "Invalid credentials".to_string(),
        })
    }

    async fn analyze(&self, file_name: &str, workbook: Vec<u8>) -> Result<AnalysisResult> {
        let url = self.endpoint(ANALYZE_ENDPOINT)?;
        tracing::debug!("Uploading {} ({} bytes) to {}", file_name, workbook.len(), url);

        let part = Part::bytes(workbook)
            .file_name(file_name.to_string())
            .mime_str(WORKBOOK_MIME)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        tracing::debug!("Analyze response status: {}", response.status());

        let json = Self::read_json(response).await?;
        let result: AnalysisResult = serde_json::from_value(json)?;
        Ok(result)
    }

    async fn export_pdf(&self, result: &AnalysisResult) -> Result<Vec<u8>> {
        let url = self.endpoint(EXPORT_PDF_ENDPOINT)?;
        tracing::debug!("Requesting PDF report for {} from {}", result.name, url);

        let response = self.client.post(url).json(result).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("PDF export rejected: no login session");
        }
        if !status.is_success() {
            tracing::warn!("PDF export failed with HTTP {}", status.as_u16());
            return Err(DashError::ExportError {
                message: "Failed to generate PDF".to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn logout(&self) -> Result<()> {
        let url = self.endpoint(LOGOUT_ENDPOINT)?;
        let response = self.client.get(url).send().await?;
        tracing::debug!("Logout response status: {}", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_json() -> Value {
        serde_json::to_value(AnalysisResult::sample()).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ForensicClient::new("http://localhost:10000/audit").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:10000/audit/");
        assert_eq!(
            client.endpoint(ANALYZE_ENDPOINT).unwrap().as_str(),
            "http://localhost:10000/audit/analyze"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ForensicClient::new("not a url"),
            Err(DashError::UrlError(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_uploads_multipart_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/analyze")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"acme.xlsx\"");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(sample_json());
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let result = client.analyze("acme.xlsx", b"PK\x03\x04".to_vec()).await.unwrap();

        mock.assert();
        assert_eq!(result, AnalysisResult::sample());
    }

    #[tokio::test]
    async fn test_analyze_error_body_becomes_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "Invalid Excel file"}));
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.analyze("bad.xlsx", vec![1, 2, 3]).await.unwrap_err();

        match err {
            DashError::ServerError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid Excel file");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_field_wins_over_ok_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "No file uploaded"}));
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.analyze("acme.xlsx", vec![0]).await.unwrap_err();

        assert!(matches!(err, DashError::ServerError { status: 200, .. }));
        assert_eq!(err.user_friendly_message(), "No file uploaded");
    }

    #[tokio::test]
    async fn test_analyze_without_session_is_unauthorized() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(401)
                .json_body(serde_json::json!({"error": "Unauthorized"}));
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.analyze("acme.xlsx", vec![0]).await.unwrap_err();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[tokio::test]
    async fn test_login_redirect_means_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/login")
                .body_contains("username=admin")
                .body_contains("password=admin123");
            then.status(302)
                .header("Location", "/")
                .header("Set-Cookie", "session=abc123; Path=/");
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        client.login("admin", "admin123").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_login_form_rerender_means_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(200).body("<p>Invalid credentials</p>");
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, DashError::AuthenticationError { .. }));
    }

    #[tokio::test]
    async fn test_session_cookie_is_replayed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(302)
                .header("Location", "/")
                .header("Set-Cookie", "session=abc123; Path=/");
        });
        let analyze = server.mock(|when, then| {
            when.method(POST)
                .path("/analyze")
                .header("cookie", "session=abc123");
            then.status(200).json_body(sample_json());
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        client.login("admin", "admin123").await.unwrap();
        client.analyze("acme.xlsx", vec![0]).await.unwrap();
        analyze.assert();
    }

    #[tokio::test]
    async fn test_export_pdf_returns_bytes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/export-pdf")
                .header("content-type", "application/json")
                .body_contains("ASIAN PAINTS LTD");
            then.status(200)
                .header("Content-Type", "application/pdf")
                .body("%PDF-1.4 fake");
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let bytes = client.export_pdf(&AnalysisResult::sample()).await.unwrap();

        mock.assert();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_pdf_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/export-pdf");
            then.status(500);
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.export_pdf(&AnalysisResult::sample()).await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "Failed to generate PDF");
    }

    #[tokio::test]
    async fn test_export_pdf_without_session_is_export_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/export-pdf");
            then.status(401)
                .json_body(serde_json::json!({"error": "Unauthorized"}));
        });

        let client = ForensicClient::new(&server.base_url()).unwrap();
        let err = client.export_pdf(&AnalysisResult::sample()).await.unwrap_err();
        assert!(matches!(err, DashError::ExportError { .. }));
        assert_eq!(err.user_friendly_message(), "Failed to generate PDF");
    }
}
