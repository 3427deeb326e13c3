//! VerificationId value object.

use super::errors::ValidationError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier correlating a verification code send with its confirmation.
///
/// Ids use the whole `u64` range. On the wire they are written as decimal
/// strings so that peers whose numbers are IEEE doubles keep every digit;
/// both strings and integers are accepted when reading.
///
/// # Example
///
/// ```
/// use identity_client::domain::VerificationId;
///
/// let id = VerificationId::new(9_007_199_254_740_993);
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"9007199254740993\"");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerificationId(u64);

impl VerificationId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for VerificationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<VerificationId> for u64 {
    fn from(id: VerificationId) -> Self {
        id.0
    }
}

impl FromStr for VerificationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidVerificationId(s.to_string()))
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for VerificationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

struct VerificationIdVisitor;

impl<'de> Visitor<'de> for VerificationIdVisitor {
    type Value = VerificationId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an unsigned 64-bit integer or its decimal string form")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(VerificationId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(VerificationId)
            .map_err(|_| E::custom(ValidationError::InvalidVerificationId(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for VerificationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VerificationIdVisitor)
    }
}
