//! Domain value objects.
//!
//! Type-safe wrappers for the values the identity contract accepts. Phone
//! numbers are validated at construction time; verification ids keep the
//! full 64-bit range the backend hands out.

pub mod errors;
pub mod phone;
pub mod verification_id;

pub use errors::ValidationError;
pub use phone::PhoneNumber;
pub use verification_id::VerificationId;
