//! Response envelope shared by every upstream endpoint.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

// == Page Info ==
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

// == Envelope ==
/// `{ success, data, message, pagination? }` as returned by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> Envelope<T> {
    /// Successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: String::new(),
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    // == Decode ==
    /// Decodes a raw upstream body and turns `success: false` into an
    /// application failure carrying the upstream message, or `fallback` when
    /// the upstream sent none.
    pub fn decode(body: Value, fallback: &str) -> Result<Self> {
        let envelope: Envelope<T> = serde_json::from_value(body)
            .map_err(|e| ClientError::Network(format!("malformed response envelope: {}", e)))?;

        if envelope.success {
            Ok(envelope)
        } else if envelope.message.trim().is_empty() {
            Err(ClientError::Application(fallback.to_string()))
        } else {
            Err(ClientError::Application(envelope.message))
        }
    }
}

impl Envelope<Value> {
    /// Reads `data` as `T`, keeping the rest of the envelope.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Envelope<T>> {
        let data = self
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ClientError::Network(format!("malformed response data: {}", e)))?;

        Ok(Envelope {
            success: self.success,
            data,
            message: self.message,
            pagination: self.pagination,
        })
    }
}
