//! Registration and verification request/response models.

use crate::domain::{PhoneNumber, VerificationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-reported state of a phone or email verification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    CodeSent,
    Confirmed,
    Expired,
    Rejected,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl VerificationStatus {
    /// Whether no further send/confirm calls can change the outcome.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Expired | Self::Rejected)
    }
}

/// Body of `POST /identity/phone`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPhoneRequest<'a> {
    pub phone_number: &'a PhoneNumber,
}

/// Body of `POST /identity/email`. The address is sent exactly as given.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterEmailRequest<'a> {
    pub address: &'a str,
}

/// Body of `POST /identity/verifications/{id}/confirm`.
#[derive(Serialize)]
pub struct ConfirmCodeRequest<'a> {
    pub code: &'a str,
}

// Keep codes out of debug output.
impl std::fmt::Debug for ConfirmCodeRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmCodeRequest")
            .field("code", &"<redacted>")
            .finish()
    }
}

/// Result of registering a phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegisterPhoneResponse {
    /// Id to use for the follow-up send/confirm calls
    pub verification_id: VerificationId,
    pub phone_number: String,
    pub status: VerificationStatus,
}

/// Result of registering an email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegisterEmailResponse {
    /// Id to use for the follow-up send/confirm calls
    pub verification_id: VerificationId,
    pub address: String,
    pub status: VerificationStatus,
}

/// Result of asking the server to (re)send a verification code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SendCodeResponse {
    pub verification_id: VerificationId,
    pub status: VerificationStatus,

    /// When the sent code stops being accepted (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    /// Seconds to wait before another send is allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

impl SendCodeResponse {
    /// Parse `expires_at`, returning `None` when absent or malformed.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the code has expired at `now`. Unknown expiry counts as live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().is_some_and(|expires| now >= expires)
    }
}

/// Result of confirming a verification code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ConfirmCodeResponse {
    pub verification_id: VerificationId,
    pub confirmed: bool,
    pub status: VerificationStatus,

    /// Attempts left before the verification is rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,
}
