//! Replay-record addressing.
//!
//! A replay record's address is a deterministic function of (user, nonce);
//! its mere existence marks the nonce as consumed. Records are created
//! exactly once and never updated or deleted.

use chomp_core::base::{Nonce, UserId};
use sha2::{Digest as _, Sha256};

/// Domain marker prepended to replay-address preimages.
pub const REPLAY_ADDRESS_TAG: &[u8; 15] = b"CHOMP_REPLAY_V1";

/// Derive the storage address of the replay record for (user, nonce).
#[must_use]
pub fn replay_address(user: &UserId, nonce: &Nonce) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(REPLAY_ADDRESS_TAG);
    hasher.update(user.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use test_utils::{b16, b32};

    use super::*;

    #[test]
    fn address_is_deterministic() {
        let user: UserId = b32!(1);
        let nonce: Nonce = b16!(2);
        assert_eq!(replay_address(&user, &nonce), replay_address(&user, &nonce));
    }

    #[test]
    fn address_scopes_user_and_nonce() {
        let alice: UserId = b32!(1);
        let bob: UserId = b32!(2);
        let n0: Nonce = b16!(1);
        let n1: Nonce = b16!(2);
        assert_ne!(replay_address(&alice, &n0), replay_address(&bob, &n0));
        assert_ne!(replay_address(&alice, &n0), replay_address(&alice, &n1));
    }
}
