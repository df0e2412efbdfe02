//! Core types shared across upload front-end components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UploadError;
use crate::constants::DEFAULT_WIDGET_SLOT;

/// Verification mode: which widget variant initiated the submission.
///
/// Sent in the `captcha_type` field so the remote API knows which
/// secret and semantics to validate the token against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptchaType {
    /// Explicit checkbox widget, token delivered through a callback
    Checkbox,
    /// Invisible widget, triggered programmatically
    Invisible,
    /// Score-based (v3) widget, triggered programmatically
    V3,
}

impl CaptchaType {
    pub const ALL: [CaptchaType; 3] = [Self::Checkbox, Self::Invisible, Self::V3];

    /// Wire label sent as `captcha_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Invisible => "invisible",
            Self::V3 => "v3",
        }
    }

    /// Whether the token comes from the stored widget callback
    pub fn uses_stored_token(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for CaptchaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptchaType {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checkbox" => Ok(Self::Checkbox),
            "invisible" => Ok(Self::Invisible),
            "v3" => Ok(Self::V3),
            other => Err(UploadError::InvalidInput(format!(
                "unknown captcha type '{other}' (expected checkbox, invisible or v3)"
            ))),
        }
    }
}

/// Opaque verification token issued by the widget.
///
/// The value is never inspected locally; expiry and reuse are for the
/// remote API to reject.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for VerificationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VerificationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// Tokens end up in logs through Debug; keep only a prefix.
impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "VerificationToken({prefix}…)")
    }
}

/// Settings handed to the verification widget when it renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Page slot (element id) the widget renders into
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Public site key registered with the verification provider
    pub site_key: String,
}

fn default_slot() -> String {
    DEFAULT_WIDGET_SLOT.to_string()
}

impl WidgetConfig {
    pub fn new(site_key: impl Into<String>) -> Self {
        Self {
            slot: default_slot(),
            site_key: site_key.into(),
        }
    }
}

/// Response envelope returned by the remote upload API.
///
/// Rendering uses the raw JSON body; this is only for typed access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Uploaded file URL, when the API reports one
    pub fn file_url(&self) -> Option<&str> {
        self.data.as_ref()?.get("file_url")?.as_str()
    }

    /// Number of files removed by a cleanup call
    pub fn deleted_files_count(&self) -> Option<u64> {
        self.data.as_ref()?.get("deleted_files_count")?.as_u64()
    }

    pub fn is_error(&self) -> bool {
        self.error.as_ref().is_some_and(|e| !e.is_null())
    }
}
