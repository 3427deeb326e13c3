//! Identity Client - async identity and profile management for Rust applications.
//!
//! The crate is organised around the [`IdentityClient`] trait: fetch the
//! caller's profile, register a phone number or email address, and send or
//! confirm verification codes. Application code holds an
//! `Arc<dyn IdentityClient>` and never depends on the transport.
//!
//! # Architecture
//!
//! - **client**: the `IdentityClient` contract, the HTTP implementation, and
//!   a profile-caching decorator
//! - **domain**: validated value objects (phone numbers, verification ids)
//! - **models**: profile and registration/verification payloads
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **cache**: generic TTL cache
//! - **metrics**: request and operation counters

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;

pub use cache::TimedCache;
pub use client::{AsyncIdentityClient, CachedIdentityClient, IdentityClient, IdentityHttpClient};
pub use config::Config;
pub use domain::{PhoneNumber, ValidationError, VerificationId};
pub use error::{ConfigError, IdentityApiError, IdentityApiResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    ConfirmCodeResponse, Profile, RegisterEmailResponse, RegisterPhoneResponse, SendCodeResponse,
    VerificationStatus,
};
