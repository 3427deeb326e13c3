use crate::domain::{PhoneNumber, VerificationId};
use crate::error::IdentityApiResult;
use crate::models::{
    ConfirmCodeResponse, Profile, RegisterEmailResponse, RegisterPhoneResponse, SendCodeResponse,
};
use async_trait::async_trait;

/// Identity and profile operations available to application code.
///
/// Implementations are interchangeable: the HTTP-backed
/// [`AsyncIdentityClient`](super::AsyncIdentityClient), the profile-caching
/// [`CachedIdentityClient`](super::CachedIdentityClient), or a test double.
/// Every call is independent; the trait does not enforce that a code is sent
/// before it is confirmed, and it does not retry.
///
/// Returned futures are inert until polled.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Fetch the authenticated caller's profile.
    async fn get_profile(&self) -> IdentityApiResult<Profile>;

    /// Submit an already validated phone number for registration.
    async fn register_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> IdentityApiResult<RegisterPhoneResponse>;

    /// Submit an email address for registration.
    ///
    /// The address is passed through untouched; rejecting malformed input is
    /// the server's job.
    async fn register_email_address(&self, address: &str)
        -> IdentityApiResult<RegisterEmailResponse>;

    /// Ask for a verification code to be (re)sent for `id`.
    async fn send_verification_code(&self, id: VerificationId)
        -> IdentityApiResult<SendCodeResponse>;

    /// Confirm `code` against the verification identified by `id`.
    async fn confirm_verification_code(
        &self,
        id: VerificationId,
        code: &str,
    ) -> IdentityApiResult<ConfirmCodeResponse>;
}
