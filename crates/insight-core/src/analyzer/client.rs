//! HTTP client for the analysis backend.
//!
//! Every operation resolves to an [`ApiResponse`]; transport failures and
//! non-2xx statuses become `success: false` with a message, never `Err`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::form::{AnalyzeRequest, ResourceSource};
use crate::error::CoreError;

/// Uniform result envelope returned by every backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    fn from_result(result: Result<T, String>, endpoint: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(message) => {
                tracing::error!(endpoint, error = %message, "API error");
                Self::failure(message)
            }
        }
    }
}

impl ApiResponse<()> {
    /// Success with no payload, serialized as `{"success": true}`.
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Learning plan returned by `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub learning_plan: String,
    pub estimated_time: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    http_client: Client,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            http_client: Client::new(),
        }
    }

    /// Client with a whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization).
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> crate::error::Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Custom(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: normalize_base(base_url.into()),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/analyze` with a multipart body.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> ApiResponse<AnalysisResult> {
        ApiResponse::from_result(self.try_analyze(request).await, "/api/analyze")
    }

    /// `GET /api/history`.
    pub async fn history(&self) -> ApiResponse<Vec<serde_json::Value>> {
        ApiResponse::from_result(self.try_history().await, "/api/history")
    }

    /// `POST /api/auth/logout`.
    pub async fn sign_out(&self) -> ApiResponse<()> {
        match self.try_sign_out().await {
            Ok(()) => ApiResponse::ok_empty(),
            Err(message) => {
                tracing::error!(endpoint = "/api/auth/logout", error = %message, "API error");
                ApiResponse::failure(message)
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn try_analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, String> {
        let mut form = Form::new()
            .text("resource_type", request.resource_type.as_str())
            .text("learning_answers", request.learning_answers.clone());

        form = match &request.source {
            ResourceSource::File(file) => {
                let bytes = tokio::fs::read(&file.path)
                    .await
                    .map_err(|e| format!("Failed to read {}: {e}", file.path.display()))?;
                form.part("file", Part::bytes(bytes).file_name(file.file_name.clone()))
            }
            ResourceSource::Url(url) => form.text("url", url.clone()),
        };

        tracing::debug!(resource_type = %request.resource_type, "submitting analysis");
        let resp = self
            .http_client
            .post(self.url("/api/analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !resp.status().is_success() {
            return Err(detail_or_status(resp).await);
        }
        resp.json::<AnalysisResult>()
            .await
            .map_err(|e| e.to_string())
    }

    async fn try_history(&self) -> Result<Vec<serde_json::Value>, String> {
        let resp = self
            .http_client
            .get(self.url("/api/history"))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(status_message(resp.status().as_u16()));
        }
        resp.json().await.map_err(|e| e.to_string())
    }

    async fn try_sign_out(&self) -> Result<(), String> {
        let resp = self
            .http_client
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(status_message(resp.status().as_u16()));
        }
        Ok(())
    }
}

fn normalize_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

fn status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

/// Prefer a string `detail` from a JSON error body; otherwise the status line.
async fn detail_or_status(resp: Response) -> String {
    let status = resp.status().as_u16();
    let detail = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });
    detail.unwrap_or_else(|| status_message(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ResourceType, UploadFile};
    use mockito::Matcher;

    fn url_request() -> AnalyzeRequest {
        AnalyzeRequest {
            resource_type: ResourceType::Youtube,
            source: ResourceSource::Url("https://youtube.com/watch?v=abc".into()),
            learning_answers: "Linear algebra, intuition first, one month".into(),
        }
    }

    #[tokio::test]
    async fn analyze_success_wraps_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="resource_type"\r\n\r\nyoutube"#.into()),
                Matcher::Regex(r#"name="url""#.into()),
                Matcher::Regex(r#"name="learning_answers""#.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"summary":"S","keyPoints":["a","b"],"learningPlan":"P","estimatedTime":"3h"}"#,
            )
            .create_async()
            .await;

        let client = AnalysisClient::new(server.url());
        let resp = client.analyze(&url_request()).await;

        mock.assert_async().await;
        assert!(resp.success);
        assert!(resp.error.is_none());
        let data = resp.data.unwrap();
        assert_eq!(data.key_points, vec!["a", "b"]);
        assert_eq!(data.estimated_time, "3h");
    }

    #[tokio::test]
    async fn analyze_uploads_file_part() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "borrow checker notes").unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"filename="notes.txt""#.into()),
                Matcher::Regex("borrow checker notes".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"summary":"","keyPoints":[],"learningPlan":"","estimatedTime":""}"#)
            .create_async()
            .await;

        let request = AnalyzeRequest {
            resource_type: ResourceType::File,
            source: ResourceSource::File(UploadFile::from_path(&path)),
            learning_answers: "Rust".into(),
        };
        let resp = AnalysisClient::new(server.url()).analyze(&request).await;

        mock.assert_async().await;
        assert!(resp.success);
    }

    #[tokio::test]
    async fn analyze_error_uses_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/analyze")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"bad file"}"#)
            .create_async()
            .await;

        let resp = AnalysisClient::new(server.url()).analyze(&url_request()).await;
        assert_eq!(resp, ApiResponse::failure("bad file"));
    }

    #[tokio::test]
    async fn analyze_error_without_detail_uses_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/analyze")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let resp = AnalysisClient::new(server.url()).analyze(&url_request()).await;
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("HTTP error! status: 502"));
    }

    #[tokio::test]
    async fn missing_upload_file_is_a_failure_response() {
        let request = AnalyzeRequest {
            resource_type: ResourceType::File,
            source: ResourceSource::File(UploadFile::from_path("/nonexistent/insight/paper.pdf")),
            learning_answers: "x".into(),
        };
        let resp = AnalysisClient::new("http://127.0.0.1:9").analyze(&request).await;
        assert!(!resp.success);
        assert!(resp.error.unwrap().starts_with("Failed to read"));
    }

    #[tokio::test]
    async fn transport_failure_is_a_failure_response() {
        let client =
            AnalysisClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let resp = client.analyze(&url_request()).await;
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert!(!resp.error.unwrap().is_empty());
    }

    #[tokio::test]
    async fn configured_timeout_bounds_a_stalled_backend() {
        // Accepted by the kernel backlog, never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let client = AnalysisClient::with_timeout(base, Duration::from_millis(300)).unwrap();
        let started = std::time::Instant::now();
        let resp = client.history().await;

        assert!(!resp.success);
        assert!(resp.error.is_some());
        assert!(started.elapsed() < Duration::from_secs(10));
        drop(listener);
    }

    #[tokio::test]
    async fn history_returns_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/history")
            .with_status(200)
            .with_body(r#"[{"id":1},{"id":2}]"#)
            .create_async()
            .await;

        let resp = AnalysisClient::new(format!("{}/", server.url())).history().await;
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn history_error_ignores_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/history")
            .with_status(401)
            .with_body(r#"{"detail":"not signed in"}"#)
            .create_async()
            .await;

        let resp = AnalysisClient::new(server.url()).history().await;
        assert_eq!(resp.error.as_deref(), Some("HTTP error! status: 401"));
    }

    #[tokio::test]
    async fn sign_out_serializes_bare_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/logout")
            .with_status(204)
            .create_async()
            .await;

        let resp = AnalysisClient::new(server.url()).sign_out().await;
        assert_eq!(resp, ApiResponse::ok_empty());
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"success":true}"#);
    }
}
