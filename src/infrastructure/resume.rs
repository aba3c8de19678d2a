//! Resume text extraction

/// Extraction failure; collapsed into the generic request failure upstream.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ResumeParseError(pub String);

/// Pulls review-ready text out of an uploaded resume.
pub trait ResumeParser: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ResumeParseError>;
}

/// PDF-backed parser used in production.
pub struct PdfResumeParser;

impl ResumeParser for PdfResumeParser {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ResumeParseError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ResumeParseError(e.to_string()))
    }
}
