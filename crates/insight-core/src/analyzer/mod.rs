//! Learning-resource analyzer: form state and the backend client.

mod client;
mod form;

pub use client::{AnalysisClient, AnalysisResult, ApiResponse};
pub use form::{
    AnalyzeRequest, AnalyzerForm, ResourceSource, ResourceType, UploadFile, ACCEPTED_EXTENSIONS,
    QUESTIONS,
};
