//! Response bodies of the document-intake service
//!
//! Every field is optional so a missing field and a `null` field both
//! surface as `None` and can be reported by the schema checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful process call
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub response: Option<ProcessedDocument>,
}

/// The processed document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub file_type: Option<String>,
    pub document_metadata: Option<DocumentMetadata>,
    pub processing_metadata: Option<ProcessingMetadata>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub parsed_at: Option<String>,
    pub parser: Option<String>,
    pub page_count: Option<u64>,
    /// Seconds spent processing, when reported
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub additional_metadata: AdditionalMetadata,
}

impl DocumentMetadata {
    /// Names of required metadata fields that are missing or null
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file_name.is_none() {
            missing.push("file_name");
        }
        if self.file_type.is_none() {
            missing.push("file_type");
        }
        if self.parsed_at.is_none() {
            missing.push("parsed_at");
        }
        if self.parser.is_none() {
            missing.push("parser");
        }
        if self.page_count.is_none() {
            missing.push("page_count");
        }
        missing
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdditionalMetadata {
    #[serde(default)]
    pub derived_fields: Map<String, Value>,
}

impl AdditionalMetadata {
    /// A derived field rendered as text, if present and non-empty
    pub fn derived_text(&self, name: &str) -> Option<String> {
        match self.derived_fields.get(name)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub parser: Option<String>,
    pub extraction_mode: Option<String>,
}

/// One page of the processed document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Page {
    pub page_number: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a 422 validation error
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub detail: Value,
}
