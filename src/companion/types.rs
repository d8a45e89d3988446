use serde::{Deserialize, Serialize};

use crate::prompts::MessageKind;

use super::error::CompanionError;

pub const DEFAULT_STUDENT_NAME: &str = "Student";

/// Inbound body. `null` and missing fields are both treated as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRequest {
    pub student_name: Option<String>,
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl CompanionRequest {
    pub fn student_name(&self) -> &str {
        self.student_name.as_deref().unwrap_or(DEFAULT_STUDENT_NAME)
    }

    pub fn context(&self) -> &str {
        self.context.as_deref().unwrap_or_default()
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::from_label(self.kind.as_deref())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompanionResponse {
    pub fn generated(message: String, student_name: &str) -> Self {
        Self {
            message,
            student_name: Some(student_name.to_string()),
            error: None,
        }
    }

    pub fn degraded(err: &CompanionError, student_name: &str) -> Self {
        Self {
            message: err.fallback_message(student_name),
            student_name: None,
            error: Some(err.to_string()),
        }
    }
}
