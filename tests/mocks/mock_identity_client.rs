use async_trait::async_trait;
use identity_client::error::{IdentityApiError, IdentityApiResult};
use identity_client::models::{
    ConfirmCodeResponse, Profile, RegisterEmailResponse, RegisterPhoneResponse, SendCodeResponse,
    VerificationStatus,
};
use identity_client::{IdentityClient, PhoneNumber, VerificationId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Code the mock accepts in `confirm_verification_code`.
#[allow(dead_code)]
pub const ACCEPTED_CODE: &str = "123456";

/// In-memory identity client that records every call it receives.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockIdentityClient {
    profile: Arc<Mutex<Option<Profile>>>,
    next_id: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    phones: Arc<Mutex<Vec<String>>>,
    addresses: Arc<Mutex<Vec<String>>>,
    ids: Arc<Mutex<Vec<VerificationId>>>,
    codes: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockIdentityClient {
    pub fn new() -> Self {
        Self {
            profile: Arc::new(Mutex::new(None)),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            phones: Arc::new(Mutex::new(Vec::new())),
            addresses: Arc::new(Mutex::new(Vec::new())),
            ids: Arc::new(Mutex::new(Vec::new())),
            codes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Profile returned by `get_profile`; without one the call fails with `Unauthorized`.
    pub fn set_profile(&self, profile: Profile) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    pub fn clear_profile(&self) {
        *self.profile.lock().unwrap() = None;
    }

    /// Id handed out by the next registration.
    pub fn set_next_id(&self, id: u64) {
        *self.next_id.lock().unwrap() = id;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn received_phones(&self) -> Vec<String> {
        self.phones.lock().unwrap().clone()
    }

    pub fn received_addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }

    pub fn received_ids(&self) -> Vec<VerificationId> {
        self.ids.lock().unwrap().clone()
    }

    pub fn received_codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn take_id(&self) -> VerificationId {
        let mut next = self.next_id.lock().unwrap();
        let id = VerificationId::new(*next);
        *next = next.wrapping_add(1);
        id
    }
}

impl Default for MockIdentityClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityClient for MockIdentityClient {
    async fn get_profile(&self) -> IdentityApiResult<Profile> {
        self.track_call("get_profile");

        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or(IdentityApiError::Unauthorized)
    }

    async fn register_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> IdentityApiResult<RegisterPhoneResponse> {
        self.track_call("register_phone_number");
        self.phones
            .lock()
            .unwrap()
            .push(phone_number.as_str().to_string());

        Ok(RegisterPhoneResponse {
            verification_id: self.take_id(),
            phone_number: phone_number.as_str().to_string(),
            status: VerificationStatus::Pending,
        })
    }

    async fn register_email_address(
        &self,
        address: &str,
    ) -> IdentityApiResult<RegisterEmailResponse> {
        self.track_call("register_email_address");
        self.addresses.lock().unwrap().push(address.to_string());

        Ok(RegisterEmailResponse {
            verification_id: self.take_id(),
            address: address.to_string(),
            status: VerificationStatus::Pending,
        })
    }

    async fn send_verification_code(
        &self,
        id: VerificationId,
    ) -> IdentityApiResult<SendCodeResponse> {
        self.track_call("send_verification_code");
        self.ids.lock().unwrap().push(id);

        Ok(SendCodeResponse {
            verification_id: id,
            status: VerificationStatus::CodeSent,
            ..Default::default()
        })
    }

    async fn confirm_verification_code(
        &self,
        id: VerificationId,
        code: &str,
    ) -> IdentityApiResult<ConfirmCodeResponse> {
        self.track_call("confirm_verification_code");
        self.ids.lock().unwrap().push(id);
        self.codes.lock().unwrap().push(code.to_string());

        let confirmed = code == ACCEPTED_CODE;
        Ok(ConfirmCodeResponse {
            verification_id: id,
            confirmed,
            status: if confirmed {
                VerificationStatus::Confirmed
            } else {
                VerificationStatus::CodeSent
            },
            attempts_remaining: if confirmed { None } else { Some(2) },
        })
    }
}
