//! Query parameter builder for the intake endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::catalog::{Catalog, TestCase};

/// Payload construction errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Test case not found for file_id: {0}")]
    UnknownFileId(String),
}

/// The five query parameters the intake endpoint expects
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub file_url: String,
    pub file_type: String,
    pub file_id: String,
    pub builder_id: String,
    pub entity_id: String,
}

impl QueryParams {
    /// Parameter names, in the order they are sent
    pub const KEYS: [&'static str; 5] =
        ["file_url", "file_type", "file_id", "builder_id", "entity_id"];

    /// Key/value pairs in `KEYS` order
    pub fn pairs(&self) -> Vec<(String, String)> {
        let values = [
            &self.file_url,
            &self.file_type,
            &self.file_id,
            &self.builder_id,
            &self.entity_id,
        ];
        Self::KEYS
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Pairs with one key dropped, for missing-parameter requests
    pub fn pairs_without(&self, key: &str) -> Vec<(String, String)> {
        self.pairs().into_iter().filter(|(k, _)| k != key).collect()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&TestCase> for QueryParams {
    fn from(case: &TestCase) -> Self {
        Self {
            file_url: case.file_url.to_string(),
            file_type: case.file_type.to_string(),
            file_id: case.file_id.to_string(),
            builder_id: case.builder_id.to_string(),
            entity_id: case.entity_id.to_string(),
        }
    }
}

/// Builds intake payloads from the catalog or explicit values
#[derive(Clone, Copy, Debug, Default)]
pub struct PayloadBuilder {
    catalog: Catalog,
}

impl PayloadBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Build parameters for a catalog file id
    pub fn build_query_params(&self, file_id: &str) -> Result<QueryParams, ValidationError> {
        self.catalog
            .get(file_id)
            .map(QueryParams::from)
            .ok_or_else(|| ValidationError::UnknownFileId(file_id.to_string()))
    }

    /// Build parameters from explicit values, bypassing the catalog
    pub fn build_query_params_custom(
        file_url: impl Into<String>,
        file_type: impl Into<String>,
        file_id: impl Into<String>,
        builder_id: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> QueryParams {
        QueryParams {
            file_url: file_url.into(),
            file_type: file_type.into(),
            file_id: file_id.into(),
            builder_id: builder_id.into(),
            entity_id: entity_id.into(),
        }
    }
}
