mod mock_identity_client;

#[allow(unused_imports)]
pub use mock_identity_client::{MockIdentityClient, ACCEPTED_CODE};
