//! Claimant identity newtype.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size in bytes of a claimant identity (a raw ed25519 public key).
pub const USER_ID_SIZE: usize = 32;

/// Raw public-key bytes of a claimant identity.
///
/// Displayed and serialized as a base58 string, the encoding wallets and
/// explorers use for account keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId([u8; USER_ID_SIZE]);

/// Error parsing a base58 user identity string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserIdParseError {
    /// The string is not valid base58.
    #[error("user identity is not valid base58")]
    Encoding,
    /// The decoded bytes are not exactly 32 bytes.
    #[error("user identity must decode to exactly {USER_ID_SIZE} bytes, got {0}")]
    Length(usize),
}

impl UserId {
    /// Wrap raw identity bytes.
    #[must_use]
    pub const fn new(bytes: [u8; USER_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw identity bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; USER_ID_SIZE] {
        &self.0
    }

    /// Parse a base58-encoded identity string.
    ///
    /// # Errors
    /// Returns an error if the string is not base58 or does not decode to
    /// exactly 32 bytes.
    pub fn from_base58(s: &str) -> Result<Self, UserIdParseError> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|_| UserIdParseError::Encoding)?;
        let bytes: [u8; USER_ID_SIZE] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| UserIdParseError::Length(decoded.len()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; USER_ID_SIZE]> for UserId {
    fn from(bytes: [u8; USER_ID_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<UserId> for [u8; USER_ID_SIZE] {
    fn from(user: UserId) -> Self {
        user.0
    }
}

impl Deref for UserId {
    type Target = [u8; USER_ID_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({self})")
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
