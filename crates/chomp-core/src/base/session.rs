//! Detection-session commitment bound to a claimant identity.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use super::user_id::UserId;

/// Size in bytes of a session hash.
pub const SESSION_HASH_SIZE: usize = 32;

/// Domain marker prepended to session-binding preimages.
pub const SESSION_BINDING_TAG: &[u8; 16] = b"CHOMP_SESSION_V1";

/// Opaque commitment to an external detection proof.
///
/// The commitment is computed client-side over the claimant identity and the
/// detector's proof document, so a proof captured for one wallet cannot be
/// replayed under another. The oracle and the ledger treat the value as
/// opaque bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionHash([u8; SESSION_HASH_SIZE]);

impl SessionHash {
    /// Wrap raw commitment bytes.
    #[must_use]
    pub const fn new(bytes: [u8; SESSION_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Bind a detection proof document to a claimant identity.
    ///
    /// Preimage layout: `CHOMP_SESSION_V1 || user || proof_bytes`, hashed
    /// with SHA-256. `proof_bytes` is the detector's JSON exactly as
    /// received; the commitment makes no attempt to canonicalize it.
    #[must_use]
    pub fn bind(user: &UserId, proof_bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(SESSION_BINDING_TAG);
        hasher.update(user.as_bytes());
        hasher.update(proof_bytes);
        Self(hasher.finalize().into())
    }

    /// Borrow the raw commitment bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; SESSION_HASH_SIZE]> for SessionHash {
    fn from(bytes: [u8; SESSION_HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<SessionHash> for [u8; SESSION_HASH_SIZE] {
    fn from(hash: SessionHash) -> Self {
        hash.0
    }
}

impl Deref for SessionHash {
    type Target = [u8; SESSION_HASH_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for SessionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SessionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionHash({self})")
    }
}

impl Serialize for SessionHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SessionHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decoded = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let bytes: [u8; SESSION_HASH_SIZE] = decoded.as_slice().try_into().map_err(|_| {
            serde::de::Error::custom(format!(
                "session hash must be {SESSION_HASH_SIZE} hex-encoded bytes"
            ))
        })?;
        Ok(Self(bytes))
    }
}
