//! Per-claim replay-scoping nonce.

use std::fmt;
use std::ops::Deref;

use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size in bytes of a claim nonce.
pub const NONCE_SIZE: usize = 16;

/// Caller-chosen random value scoping replay protection for one claim.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

/// Error parsing a hex nonce string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NonceParseError {
    /// The string is not valid hex or has the wrong length.
    #[error("nonce must be {NONCE_SIZE} hex-encoded bytes")]
    Encoding,
}

impl Nonce {
    /// Wrap raw nonce bytes.
    #[must_use]
    pub const fn new(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh random nonce from the operating system CSPRNG.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0_u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Borrow the raw nonce bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

impl From<[u8; NONCE_SIZE]> for Nonce {
    fn from(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Nonce> for [u8; NONCE_SIZE] {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl Deref for Nonce {
    type Target = [u8; NONCE_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({self})")
    }
}

impl Serialize for Nonce {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decoded = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let bytes: [u8; NONCE_SIZE] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| serde::de::Error::custom(NonceParseError::Encoding))?;
        Ok(Self(bytes))
    }
}
