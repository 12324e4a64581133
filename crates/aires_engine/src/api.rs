use std::path::Path;
use std::time::Duration;

use aires_logging::{aires_debug, aires_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::{ApiError, FailureKind, ResumeId, StoredResume, ValidationReport};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_pdf_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_pdf_bytes: 20 * 1024 * 1024,
        }
    }
}

/// A file ready to be sent as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, format!("{}: {err}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        Ok(Self { file_name, bytes })
    }
}

#[async_trait::async_trait]
pub trait ResumeApi: Send + Sync {
    /// Classify the file without storing it.
    async fn validate(&self, file: &UploadFile) -> Result<ValidationReport, ApiError>;
    async fn upload(&self, file: &UploadFile) -> Result<StoredResume, ApiError>;
    async fn rewrite(&self, resume_id: ResumeId) -> Result<String, ApiError>;
    async fn revise(
        &self,
        resume_id: ResumeId,
        feedback: &str,
        current_version: &str,
    ) -> Result<String, ApiError>;
    async fn generate_pdf(&self, resume_id: ResumeId, content: &str) -> Result<Vec<u8>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    is_resume: bool,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    top_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    id: ResumeId,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RewriteBody {
    rewritten_content: String,
}

#[derive(Debug, Deserialize)]
struct ReviseBody {
    revised_content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RewriteRequest {
    resume_id: ResumeId,
}

#[derive(Debug, Serialize)]
struct ReviseRequest<'a> {
    resume_id: ResumeId,
    feedback: &'a str,
    current_version: &'a str,
}

#[derive(Debug, Serialize)]
struct PdfRequest<'a> {
    resume_id: ResumeId,
    content: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestResumeApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestResumeApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let mut base = self.settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        reqwest::Url::parse(&base)
            .and_then(|url| url.join(path))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error payloads are best effort; an unreadable body still yields the status.
        let body = response.text().await.unwrap_or_default();
        let server_message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error);
        aires_warn!(
            "request rejected: status={} error={:?}",
            status.as_u16(),
            server_message
        );
        Err(ApiError::rejected(status.as_u16(), server_message))
    }

    fn file_form(file: &UploadFile, validate_only: bool) -> Result<Form, ApiError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;
        let form = Form::new().part("file", part);
        Ok(if validate_only {
            form.text("validate_only", "true")
        } else {
            form
        })
    }
}

#[async_trait::async_trait]
impl ResumeApi for ReqwestResumeApi {
    async fn validate(&self, file: &UploadFile) -> Result<ValidationReport, ApiError> {
        aires_debug!("validate {} ({} bytes)", file.file_name, file.bytes.len());
        let url = self.endpoint("upload_resume/")?;
        let form = Self::file_form(file, true)?;
        let response = self.send(self.client.post(url).multipart(form)).await?;
        let body: ValidationBody = response.json().await.map_err(map_reqwest_error)?;
        Ok(ValidationReport {
            is_resume: body.is_resume,
            confidence: body.confidence.clamp(0.0, 1.0),
            top_label: body.top_label,
        })
    }

    async fn upload(&self, file: &UploadFile) -> Result<StoredResume, ApiError> {
        aires_debug!("upload {} ({} bytes)", file.file_name, file.bytes.len());
        let url = self.endpoint("upload_resume/")?;
        let form = Self::file_form(file, false)?;
        let response = self.send(self.client.post(url).multipart(form)).await?;
        let body: UploadBody = response.json().await.map_err(map_reqwest_error)?;
        Ok(StoredResume {
            id: body.id,
            text: body.text,
        })
    }

    async fn rewrite(&self, resume_id: ResumeId) -> Result<String, ApiError> {
        aires_debug!("rewrite resume {resume_id}");
        let url = self.endpoint("rewrite_resume/")?;
        let request = self.client.post(url).json(&RewriteRequest { resume_id });
        let body: RewriteBody = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(body.rewritten_content)
    }

    async fn revise(
        &self,
        resume_id: ResumeId,
        feedback: &str,
        current_version: &str,
    ) -> Result<String, ApiError> {
        aires_debug!("revise resume {resume_id} feedback_len={}", feedback.len());
        let url = self.endpoint("revise_resume/")?;
        let request = self.client.post(url).json(&ReviseRequest {
            resume_id,
            feedback,
            current_version,
        });
        let body: ReviseBody = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(body.revised_content)
    }

    async fn generate_pdf(&self, resume_id: ResumeId, content: &str) -> Result<Vec<u8>, ApiError> {
        aires_debug!("generate pdf for resume {resume_id}");
        let url = self.endpoint("generate_pdf/")?;
        let request = self
            .client
            .post(url)
            .json(&PdfRequest { resume_id, content });
        let response = self.send(request).await?;

        let max_bytes = self.settings.max_pdf_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "pdf too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "pdf too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
