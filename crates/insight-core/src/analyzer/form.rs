//! Analyzer form state and request packaging.
//!
//! The form validates presence and URL shape, then hands back an
//! [`AnalyzeRequest`]. It knows nothing about HTTP.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Onboarding questions the learning answers should address.
pub const QUESTIONS: [&str; 3] = [
    "What are you learning today?",
    "How much depth are you planning to learn?",
    "How much time do you have to achieve this?",
];

/// File extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "md"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Url,
    Youtube,
    File,
}

impl ResourceType {
    /// Value sent as the `resource_type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Url => "url",
            ResourceType::Youtube => "youtube",
            ResourceType::File => "file",
        }
    }

    pub fn input_label(self) -> &'static str {
        match self {
            ResourceType::Url => "Web Page URL",
            ResourceType::Youtube => "YouTube Video URL",
            ResourceType::File => "Upload File",
        }
    }

    /// Example input. `None` for a file upload.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            ResourceType::Url => Some("https://example.com/article"),
            ResourceType::Youtube => Some("https://youtube.com/watch?v=..."),
            ResourceType::File => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "url" => Ok(ResourceType::Url),
            "youtube" => Ok(ResourceType::Youtube),
            "file" => Ok(ResourceType::File),
            other => Err(ValidationError::InvalidValue {
                field: "resource_type".into(),
                message: format!("expected url, youtube or file, got '{other}'"),
            }),
        }
    }
}

/// A file chosen for upload. Contents are read when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub file_name: String,
    pub path: PathBuf,
}

impl UploadFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { file_name, path }
    }

    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// Whether the picker's extension filter would list this file.
    /// Drag-and-drop bypasses the filter.
    pub fn is_accepted(&self) -> bool {
        self.extension()
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// Exactly one resource reference per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceSource {
    Url(String),
    File(UploadFile),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub resource_type: ResourceType,
    pub source: ResourceSource,
    pub learning_answers: String,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzerForm {
    resource_type: ResourceType,
    url: String,
    file: Option<UploadFile>,
    learning_answers: String,
    loading: bool,
}

impl AnalyzerForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn learning_answers(&self) -> &str {
        &self.learning_answers
    }

    /// True while a submission is in flight; the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ── Edits ────────────────────────────────────────────────────────

    pub fn select_type(&mut self, resource_type: ResourceType) {
        self.resource_type = resource_type;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Picker selection. Replaces any earlier file.
    pub fn select_file(&mut self, file: UploadFile) {
        self.file = Some(file);
    }

    /// Drop target. Only the first dropped file is kept; an empty drop
    /// leaves the current selection alone.
    pub fn drop_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = UploadFile>,
    {
        if let Some(first) = files.into_iter().next() {
            self.file = Some(first);
        }
    }

    pub fn set_learning_answers(&mut self, text: impl Into<String>) {
        self.learning_answers = text.into();
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Check required fields for the selected resource type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.resource_type {
            ResourceType::Url | ResourceType::Youtube => validate_url(&self.url)?,
            ResourceType::File => {
                if self.file.is_none() {
                    return Err(ValidationError::Required("file".into()));
                }
            }
        }
        if self.learning_answers.trim().is_empty() {
            return Err(ValidationError::Required("learning_answers".into()));
        }
        Ok(())
    }

    /// Validate and package the chosen fields. Only the field that matches
    /// the resource type is included.
    pub fn to_request(&self) -> Result<AnalyzeRequest, ValidationError> {
        self.validate()?;
        let source = match (self.resource_type, &self.file) {
            (ResourceType::File, Some(file)) => ResourceSource::File(file.clone()),
            (ResourceType::File, None) => return Err(ValidationError::Required("file".into())),
            _ => ResourceSource::Url(self.url.trim().to_string()),
        };
        Ok(AnalyzeRequest {
            resource_type: self.resource_type,
            source,
            learning_answers: self.learning_answers.clone(),
        })
    }

    /// Package the request and mark the form as loading.
    ///
    /// # Errors
    ///
    /// Fails while another submission is in flight, or when validation fails.
    pub fn begin_submit(&mut self) -> Result<AnalyzeRequest, ValidationError> {
        if self.loading {
            return Err(ValidationError::InvalidValue {
                field: "form".into(),
                message: "a submission is already in progress".into(),
            });
        }
        let request = self.to_request()?;
        self.loading = true;
        Ok(request)
    }

    /// Re-enable the submit control once the request settles.
    pub fn finish_submit(&mut self) {
        self.loading = false;
    }
}

fn validate_url(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("url".into()));
    }
    url::Url::parse(trimmed)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidUrl {
            value: trimmed.to_string(),
            message: e.to_string(),
        })
}
