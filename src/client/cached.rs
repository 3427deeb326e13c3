//! Profile-caching decorator for any [`IdentityClient`].

use crate::cache::TimedCache;
use crate::client::IdentityClient;
use crate::domain::{PhoneNumber, VerificationId};
use crate::error::IdentityApiResult;
use crate::metrics::Metrics;
use crate::models::{
    ConfirmCodeResponse, Profile, RegisterEmailResponse, RegisterPhoneResponse, SendCodeResponse,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves `get_profile` from a TTL cache and delegates everything else.
///
/// Registrations and successful confirmations change what the profile
/// reports, so they drop the cached copy. Failed calls are never cached.
///
/// A fetch that was in flight across an invalidation still returns its
/// profile to the caller, but does not store it.
pub struct CachedIdentityClient {
    inner: Arc<dyn IdentityClient>,
    profile: TimedCache<(), Profile>,
    // Bumped by every invalidation.
    generation: Mutex<u64>,
    metrics: Metrics,
}

impl CachedIdentityClient {
    pub fn new(inner: Arc<dyn IdentityClient>, ttl: Duration) -> Self {
        Self {
            inner,
            profile: TimedCache::new(ttl),
            generation: Mutex::new(0),
            metrics: Metrics::new(),
        }
    }

    /// Count cache hits and misses in an existing collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Forget the cached profile so the next `get_profile` goes to the inner client.
    pub fn invalidate(&self) {
        if let Ok(mut generation) = self.generation.lock() {
            *generation = generation.wrapping_add(1);
        }
        self.profile.clear();
    }

    fn generation(&self) -> Option<u64> {
        self.generation.lock().ok().map(|generation| *generation)
    }

    /// Store `profile` unless an invalidation happened since `seen` was read.
    fn store_if_current(&self, seen: Option<u64>, profile: &Profile) {
        let Ok(generation) = self.generation.lock() else {
            return;
        };

        if seen == Some(*generation) {
            self.profile.insert((), profile.clone());
        } else {
            tracing::debug!("Profile changed while fetching, not caching");
        }
    }
}

#[async_trait]
impl IdentityClient for CachedIdentityClient {
    async fn get_profile(&self) -> IdentityApiResult<Profile> {
        if let Some(profile) = self.profile.get(&()) {
            self.metrics.record_cache_access(true);
            tracing::trace!("Profile cache hit");
            return Ok(profile);
        }

        self.metrics.record_cache_access(false);
        tracing::trace!("Profile cache miss");

        let seen = self.generation();
        let profile = self.inner.get_profile().await?;
        self.store_if_current(seen, &profile);
        Ok(profile)
    }

    async fn register_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> IdentityApiResult<RegisterPhoneResponse> {
        let result = self.inner.register_phone_number(phone_number).await;
        self.invalidate();
        result
    }

    async fn register_email_address(
        &self,
        address: &str,
    ) -> IdentityApiResult<RegisterEmailResponse> {
        let result = self.inner.register_email_address(address).await;
        self.invalidate();
        result
    }

    async fn send_verification_code(
        &self,
        id: VerificationId,
    ) -> IdentityApiResult<SendCodeResponse> {
        self.inner.send_verification_code(id).await
    }

    async fn confirm_verification_code(
        &self,
        id: VerificationId,
        code: &str,
    ) -> IdentityApiResult<ConfirmCodeResponse> {
        let outcome = self.inner.confirm_verification_code(id, code).await?;
        if outcome.confirmed {
            tracing::debug!(verification_id = %id, "Dropping cached profile after confirmation");
            self.invalidate();
        }
        Ok(outcome)
    }
}
