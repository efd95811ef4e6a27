//! The registry HTTP client.
//!
//! Two concerns live behind the registry API: the field-type vocabulary
//! (`GET /v1/field-types`) consumed by schema validation, and package
//! publishing (`POST /v1/packages`). Publishing is a collaborator contract
//! only - no CLI command drives it - but the client speaks the full
//! interface so downstream tooling can.

use crate::constants::{FIELD_TYPES_PATH, PACKAGES_PATH};
use crate::core::BlocksmithError;
use anyhow::Result;
use serde::Deserialize;

/// Client for the Blocksmith registry API.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldTypesResponse {
    field_types: Vec<String>,
}

/// Input to a publish call.
#[derive(Debug, Clone)]
pub struct PublishInput {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// The packaged archive bytes.
    pub archive: Vec<u8>,
}

/// Registry response to a publish call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    /// Whether the registry accepted the package.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Registry-assigned package identifier, on success.
    #[serde(default)]
    pub package_id: Option<String>,
    /// Processing status (e.g. pending review).
    #[serde(default)]
    pub status: Option<String>,
}

impl RegistryClient {
    /// Create a client for the registry at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn error(operation: &str, reason: impl ToString) -> BlocksmithError {
        BlocksmithError::RegistryError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Fetch the authoritative field-type vocabulary.
    pub async fn fetch_field_types(&self) -> Result<Vec<String>> {
        let url = self.endpoint(FIELD_TYPES_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Self::error("field-type fetch", e))?;
        let body: FieldTypesResponse =
            response.json().await.map_err(|e| Self::error("field-type fetch", e))?;
        Ok(body.field_types)
    }

    /// Publish a packaged resource archive.
    pub async fn publish(&self, token: &str, input: PublishInput) -> Result<PublishResponse> {
        let url = self.endpoint(PACKAGES_PATH);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("name", input.name.as_str()), ("version", input.version.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .body(input.archive)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Self::error("publish", e))?;
        let body: PublishResponse =
            response.json().await.map_err(|e| Self::error("publish", e))?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = RegistryClient::new("https://registry.blocksmith.dev/");
        assert_eq!(
            client.endpoint(FIELD_TYPES_PATH),
            "https://registry.blocksmith.dev/v1/field-types"
        );
    }

    #[test]
    fn publish_response_decodes_optional_fields() {
        let body = r#"{"success": true, "message": "ok"}"#;
        let response: PublishResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        assert_eq!(response.package_id, None);
    }
}
