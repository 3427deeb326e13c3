//! Clients for the identity API.
//!
//! [`IdentityHttpClient`] is a synchronous HTTP client. It is exposed to async
//! code through [`AsyncIdentityClient`], which runs each call on tokio's
//! blocking pool, and can be wrapped in [`CachedIdentityClient`] to avoid
//! refetching the profile. All of them implement [`IdentityClient`].

mod async_wrapper;
mod cached;
mod traits;

pub use async_wrapper::AsyncIdentityClient;
pub use cached::CachedIdentityClient;
pub use traits::IdentityClient;

use crate::config::Config;
use crate::domain::{PhoneNumber, VerificationId};
use crate::error::{IdentityApiError, IdentityApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{
    ConfirmCodeRequest, ConfirmCodeResponse, Profile, RegisterEmailRequest,
    RegisterEmailResponse, RegisterPhoneRequest, RegisterPhoneResponse, SendCodeResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the identity API.
///
/// Uses `ureq` for blocking requests; call it from async code through
/// [`AsyncIdentityClient`].
#[derive(Clone)]
pub struct IdentityHttpClient {
    base_url: String,
    api_token: String,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl IdentityHttpClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_url.clone(),
            config.api_token.clone(),
            config.request_timeout(),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        Self::build(base_url, api_token, DEFAULT_TIMEOUT)
    }

    fn build(base_url: String, api_token: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of the client's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> IdentityApiResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let request = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization())
            .set("Accept", "application/json");

        self.timed(&url, || request.call())
    }

    /// Execute a POST request with authentication and a JSON body.
    fn post<B: Serialize>(&self, path: &str, body: &B) -> IdentityApiResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let request = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        self.timed(&url, || request.send_json(body))
    }

    /// Run a request, recording its duration and mapping failures.
    fn timed<F>(&self, url: &str, send: F) -> IdentityApiResult<ureq::Response>
    where
        F: FnOnce() -> Result<ureq::Response, ureq::Error>,
    {
        let timer = HttpTimer::new(self.metrics.clone());

        match send() {
            Ok(response) => {
                tracing::debug!("{} - Success (status: {})", url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                let error = Self::map_error(e);
                tracing::error!("{} - Error: {}", url, error);
                timer.complete_with_error();
                Err(error)
            }
        }
    }

    /// Decode a JSON response body.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> IdentityApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| IdentityApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(IdentityApiError::JsonError)
    }

    /// Map a ureq error to an IdentityApiError.
    fn map_error(error: ureq::Error) -> IdentityApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let retry_after = response
                    .header("Retry-After")
                    .and_then(|v| v.trim().parse::<u64>().ok());
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => IdentityApiError::Unauthorized,
                    404 => IdentityApiError::NotFound(message),
                    429 => IdentityApiError::RateLimitExceeded { retry_after },
                    _ => IdentityApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    IdentityApiError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io => IdentityApiError::Timeout,
                _ => IdentityApiError::HttpError(transport.to_string()),
            },
        }
    }

    // ========================= Profile =========================

    /// Fetch the authenticated caller's profile.
    pub fn get_profile(&self) -> IdentityApiResult<Profile> {
        let response = self.get("/identity/profile")?;
        let profile: Profile = Self::read_json(response)?;

        self.metrics.record_profile_fetched();
        Ok(profile)
    }

    // ========================= Registration =========================

    /// Register a phone number for the caller.
    pub fn register_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> IdentityApiResult<RegisterPhoneResponse> {
        let request = RegisterPhoneRequest { phone_number };
        let response = self.post("/identity/phone", &request)?;
        let registered: RegisterPhoneResponse = Self::read_json(response)?;

        tracing::info!(
            verification_id = %registered.verification_id,
            "Phone number registered"
        );
        self.metrics.record_registration();
        Ok(registered)
    }

    /// Register an email address for the caller, exactly as given.
    pub fn register_email_address(
        &self,
        address: &str,
    ) -> IdentityApiResult<RegisterEmailResponse> {
        let request = RegisterEmailRequest { address };
        let response = self.post("/identity/email", &request)?;
        let registered: RegisterEmailResponse = Self::read_json(response)?;

        tracing::info!(
            verification_id = %registered.verification_id,
            "Email address registered"
        );
        self.metrics.record_registration();
        Ok(registered)
    }

    // ========================= Verification =========================

    /// Ask the server to (re)send the verification code for `id`.
    pub fn send_verification_code(
        &self,
        id: VerificationId,
    ) -> IdentityApiResult<SendCodeResponse> {
        let path = format!("/identity/verifications/{}/send", id);
        let response = self.post(&path, &serde_json::json!({}))?;
        let sent: SendCodeResponse = Self::read_json(response)?;

        tracing::debug!(verification_id = %id, status = ?sent.status, "Verification code sent");
        self.metrics.record_code_sent();
        Ok(sent)
    }

    /// Confirm a verification code. The code itself is never logged.
    pub fn confirm_verification_code(
        &self,
        id: VerificationId,
        code: &str,
    ) -> IdentityApiResult<ConfirmCodeResponse> {
        let path = format!("/identity/verifications/{}/confirm", id);
        let response = self.post(&path, &ConfirmCodeRequest { code })?;
        let outcome: ConfirmCodeResponse = Self::read_json(response)?;

        if outcome.confirmed {
            tracing::info!(verification_id = %id, "Verification confirmed");
        } else {
            tracing::warn!(
                verification_id = %id,
                attempts_remaining = ?outcome.attempts_remaining,
                "Verification code rejected"
            );
        }
        self.metrics.record_code_confirmation(outcome.confirmed);
        Ok(outcome)
    }
}
