//! Async adapter around the synchronous [`IdentityHttpClient`].
//!
//! Each call runs on tokio's blocking pool through
//! `tokio::task::spawn_blocking`, so HTTP I/O never stalls the async runtime.

use crate::client::{IdentityClient, IdentityHttpClient};
use crate::domain::{PhoneNumber, VerificationId};
use crate::error::{IdentityApiError, IdentityApiResult};
use crate::models::{
    ConfirmCodeResponse, Profile, RegisterEmailResponse, RegisterPhoneResponse, SendCodeResponse,
};
use async_trait::async_trait;
use std::sync::Arc;

/// [`IdentityClient`] backed by the HTTP API.
#[derive(Clone)]
pub struct AsyncIdentityClient {
    client: Arc<IdentityHttpClient>,
}

impl AsyncIdentityClient {
    pub fn new(client: IdentityHttpClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Access the underlying blocking client (for metrics).
    pub fn inner(&self) -> &IdentityHttpClient {
        &self.client
    }

    async fn run<T, F>(&self, call: F) -> IdentityApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&IdentityHttpClient) -> IdentityApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| IdentityApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl IdentityClient for AsyncIdentityClient {
    async fn get_profile(&self) -> IdentityApiResult<Profile> {
        self.run(|client| client.get_profile()).await
    }

    async fn register_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> IdentityApiResult<RegisterPhoneResponse> {
        let phone_number = phone_number.clone();

        self.run(move |client| client.register_phone_number(&phone_number))
            .await
    }

    async fn register_email_address(
        &self,
        address: &str,
    ) -> IdentityApiResult<RegisterEmailResponse> {
        let address = address.to_string();

        self.run(move |client| client.register_email_address(&address))
            .await
    }

    async fn send_verification_code(
        &self,
        id: VerificationId,
    ) -> IdentityApiResult<SendCodeResponse> {
        self.run(move |client| client.send_verification_code(id))
            .await
    }

    async fn confirm_verification_code(
        &self,
        id: VerificationId,
        code: &str,
    ) -> IdentityApiResult<ConfirmCodeResponse> {
        let code = code.to_string();

        self.run(move |client| client.confirm_verification_code(id, &code))
            .await
    }
}
