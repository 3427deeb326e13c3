//! Data models for the identity API.
//!
//! This module contains the profile record, the request bodies the HTTP
//! client sends, and the responses returned by registration and
//! verification calls.

pub mod profile;
pub mod verification;

pub use profile::Profile;
pub use verification::{
    ConfirmCodeRequest, ConfirmCodeResponse, RegisterEmailRequest, RegisterEmailResponse,
    RegisterPhoneRequest, RegisterPhoneResponse, SendCodeResponse, VerificationStatus,
};
