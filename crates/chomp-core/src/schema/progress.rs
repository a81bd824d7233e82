//! Per-user progress record model.

use serde::{Deserialize, Serialize};

use crate::base::{NEVER_CLAIMED, UserId};

/// Durable per-user claim progress.
///
/// One record per user, addressed by the user identity. Mutated only by the
/// claim transition; never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Identity the record belongs to; set once at creation.
    pub owner: UserId,
    /// Count of consecutive UTC days with an accepted claim.
    pub streak: u64,
    /// UTC day number of the last accepted claim, or [`NEVER_CLAIMED`].
    pub last_day_claimed: i64,
    /// Total accepted claims over the record's lifetime.
    pub total_claims: u64,
}

impl UserProgress {
    /// Fresh record for a user who has never claimed.
    #[must_use]
    pub const fn new(owner: UserId) -> Self {
        Self {
            owner,
            streak: 0,
            last_day_claimed: NEVER_CLAIMED,
            total_claims: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_utils::b32;

    use super::*;

    #[test]
    fn fresh_record_uses_never_claimed_sentinel() {
        let progress = UserProgress::new(b32!(5));
        assert_eq!(progress.streak, 0);
        assert_eq!(progress.last_day_claimed, NEVER_CLAIMED);
        assert_eq!(progress.total_claims, 0);
    }

    #[test]
    fn serde_round_trip() {
        let progress = UserProgress {
            owner: b32!(5),
            streak: 3,
            last_day_claimed: 102,
            total_claims: 7,
        };
        let json = serde_json::to_string(&progress).expect("serialize progress");
        let back: UserProgress = serde_json::from_str(&json).expect("deserialize progress");
        assert_eq!(back, progress);
    }
}
