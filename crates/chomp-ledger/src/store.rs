//! Sled-backed ledger store.
//!
//! Realizes the authoritative-ledger semantics the protocol needs: replay
//! marker creation and progress mutation commit in one sled transaction over
//! both trees, so a claim either fully happens or leaves no trace. The
//! replay check is a create-if-absent inside that transaction, not a
//! read-then-write race.

use std::path::Path;

use chomp_core::base::{Nonce, UserId};
use chomp_core::payload::ClaimPayload;
use chomp_core::schema::progress::UserProgress;
use ed25519_dalek::{Signature, VerifyingKey};
use sled::Transactional as _;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::instruction::{ClaimEntryPoint, ClaimInstruction};
use crate::progress::{advance, advance_dev};
use crate::record::{decode_record, encode_record};
use crate::replay::replay_address;

const PROGRESS_TREE: &str = "progress";
const REPLAY_TREE: &str = "replay";

/// The authoritative claim ledger.
///
/// Holds the statically-known oracle public key; a claim that does not carry
/// a valid oracle signature over its exact payload bytes never touches
/// state.
pub struct Ledger {
    db: sled::Db,
    progress: sled::Tree,
    replay: sled::Tree,
    oracle_key: VerifyingKey,
}

impl Ledger {
    /// Open (or create) a ledger at `path`, trusting `oracle_pubkey`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened or the oracle key
    /// bytes are not a valid ed25519 public key.
    pub fn open(path: &Path, oracle_pubkey: &[u8; 32]) -> Result<Self, LedgerError> {
        let oracle_key = VerifyingKey::from_bytes(oracle_pubkey)
            .map_err(|_| LedgerError::InvalidOracleKey)?;
        let db = sled::open(path)?;
        let progress = db.open_tree(PROGRESS_TREE)?;
        let replay = db.open_tree(REPLAY_TREE)?;
        Ok(Self {
            db,
            progress,
            replay,
            oracle_key,
        })
    }

    /// Idempotently create a progress record for `user`.
    ///
    /// "Already exists" is not an error; the existing record is returned
    /// unchanged.
    ///
    /// # Errors
    /// Returns an error on storage failure or a corrupt stored record.
    pub fn init_user(&self, user: &UserId) -> Result<UserProgress, LedgerError> {
        if let Some(bytes) = self.progress.get(user.as_bytes())? {
            debug!(user = %user, "progress record already exists");
            return Ok(decode_record(&bytes)?);
        }
        let fresh = UserProgress::new(*user);
        self.progress
            .insert(user.as_bytes(), encode_record(&fresh).to_vec())?;
        info!(user = %user, "progress record created");
        Ok(fresh)
    }

    /// Read the progress record for `user`, if any.
    ///
    /// # Errors
    /// Returns an error on storage failure or a corrupt stored record.
    pub fn progress_of(&self, user: &UserId) -> Result<Option<UserProgress>, LedgerError> {
        match self.progress.get(user.as_bytes())? {
            Some(bytes) => Ok(Some(decode_record(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Execute raw claim instruction data submitted by `caller`.
    ///
    /// Decodes the instruction, reconstructs the payload from its fields and
    /// the authenticated caller, and dispatches to the selected entry point.
    ///
    /// # Errors
    /// Returns an error if the instruction does not decode or the dispatched
    /// claim rejects.
    pub fn execute(
        &self,
        caller: &UserId,
        instruction_data: &[u8],
        now: i64,
    ) -> Result<UserProgress, LedgerError> {
        let instruction = ClaimInstruction::decode(instruction_data)?;
        let payload = ClaimPayload {
            user: *caller,
            day: instruction.day,
            session_hash: instruction.session_hash,
            nonce: instruction.nonce,
            expires_at: instruction.expires_at,
        };
        let payload_bytes = payload.encode();
        match instruction.entry_point {
            ClaimEntryPoint::Claim => {
                self.claim(caller, &payload_bytes, &instruction.signature, now)
            }
            ClaimEntryPoint::ClaimDev => {
                self.claim_dev(caller, &payload_bytes, &instruction.signature, now)
            }
        }
    }

    /// Accept or reject a claim, atomically.
    ///
    /// Ordered checks: oracle signature over the exact bytes, payload
    /// decode, caller cross-check, expiry, replay-record creation, progress
    /// transition. The last two commit together or not at all.
    ///
    /// # Errors
    /// Returns the matching [`LedgerError`] for the first failed check; no
    /// state changes on any error.
    pub fn claim(
        &self,
        caller: &UserId,
        payload_bytes: &[u8],
        signature: &[u8; 64],
        now: i64,
    ) -> Result<UserProgress, LedgerError> {
        self.apply_claim(caller, payload_bytes, signature, now, false)
    }

    /// Development entry point: same verification, no day sequencing.
    ///
    /// Exists so the signature/replay path can be exercised repeatedly
    /// without waiting a real day. Must not feed production trust decisions.
    ///
    /// # Errors
    /// Returns the matching [`LedgerError`] for the first failed check.
    pub fn claim_dev(
        &self,
        caller: &UserId,
        payload_bytes: &[u8],
        signature: &[u8; 64],
        now: i64,
    ) -> Result<UserProgress, LedgerError> {
        self.apply_claim(caller, payload_bytes, signature, now, true)
    }

    fn apply_claim(
        &self,
        caller: &UserId,
        payload_bytes: &[u8],
        signature: &[u8; 64],
        now: i64,
        dev: bool,
    ) -> Result<UserProgress, LedgerError> {
        self.oracle_key
            .verify_strict(payload_bytes, &Signature::from_bytes(signature))
            .map_err(|_| LedgerError::InvalidSignature)?;

        let payload = ClaimPayload::decode(payload_bytes)?;

        if payload.user != *caller {
            return Err(LedgerError::UserMismatch);
        }

        if payload.expires_at < now {
            return Err(LedgerError::AttestationExpired {
                expires_at: payload.expires_at,
                now,
            });
        }

        let updated = self.commit_claim(caller, &payload.nonce, payload.day, dev)?;
        info!(
            user = %caller,
            day = payload.day,
            streak = updated.streak,
            total_claims = updated.total_claims,
            dev,
            "claim accepted"
        );
        self.db.flush()?;
        Ok(updated)
    }

    /// Replay-marker creation and progress transition as one atomic unit.
    fn commit_claim(
        &self,
        user: &UserId,
        nonce: &Nonce,
        day: i64,
        dev: bool,
    ) -> Result<UserProgress, LedgerError> {
        let marker = replay_address(user, nonce);

        let result = (&self.replay, &self.progress).transaction(|(replay, progress)| {
            if replay.get(marker.as_slice())?.is_some() {
                return Err(ConflictableTransactionError::Abort(
                    LedgerError::NonceAlreadyUsed,
                ));
            }
            replay.insert(marker.to_vec(), Vec::<u8>::new())?;

            let mut record = match progress.get(user.as_bytes())? {
                Some(bytes) => decode_record(&bytes).map_err(|e| {
                    ConflictableTransactionError::Abort(LedgerError::CorruptRecord(e))
                })?,
                None => UserProgress::new(*user),
            };
            if dev {
                advance_dev(&mut record, day);
            } else {
                advance(&mut record, day).map_err(ConflictableTransactionError::Abort)?;
            }
            progress.insert(user.as_bytes().to_vec(), encode_record(&record).to_vec())?;
            Ok(record)
        });

        match result {
            Ok(record) => Ok(record),
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(LedgerError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chomp_core::base::{NEVER_CLAIMED, SessionHash};
    use ed25519_dalek::{Signer as _, SigningKey};
    use tempfile::TempDir;
    use test_utils::{b16, b32};

    use super::*;

    const NOW: i64 = 8_640_000;

    struct Harness {
        _dir: TempDir,
        ledger: Ledger,
        oracle: SigningKey,
        user: UserId,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().expect("tempdir");
        let oracle = SigningKey::from_bytes(&[7_u8; 32]);
        let user_key = SigningKey::from_bytes(&[1_u8; 32]);
        let user = UserId::new(user_key.verifying_key().to_bytes());
        let ledger = Ledger::open(&dir.path().join("ledger"), &oracle.verifying_key().to_bytes())
            .expect("open ledger");
        Harness {
            _dir: dir,
            ledger,
            oracle,
            user,
        }
    }

    fn payload_for(user: UserId, day: i64, nonce: Nonce) -> ClaimPayload {
        ClaimPayload {
            user,
            day,
            session_hash: SessionHash::new([0_u8; 32]),
            nonce,
            expires_at: NOW + 60,
        }
    }

    fn sign(oracle: &SigningKey, payload: &ClaimPayload) -> ([u8; 100], [u8; 64]) {
        let bytes = payload.encode();
        let signature = oracle.sign(&bytes).to_bytes();
        (bytes, signature)
    }

    #[test]
    fn init_user_is_idempotent() {
        let h = harness();
        let first = h.ledger.init_user(&h.user).expect("first init");
        let second = h.ledger.init_user(&h.user).expect("second init");
        assert_eq!(first, second);
        assert_eq!(first.last_day_claimed, NEVER_CLAIMED);
    }

    #[test]
    fn end_to_end_streak_scenario() {
        let h = harness();

        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));
        let progress = h.ledger.claim(&h.user, &bytes, &sig, NOW).expect("day 100");
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.total_claims, 1);
        assert_eq!(progress.last_day_claimed, 100);

        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 101, b16!(2)));
        let progress = h.ledger.claim(&h.user, &bytes, &sig, NOW).expect("day 101");
        assert_eq!(progress.streak, 2);
        assert_eq!(progress.total_claims, 2);

        // third nonce, same day: policy-rejected, nothing mutated
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 101, b16!(3)));
        let err = h
            .ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect_err("same day must reject");
        assert!(matches!(err, LedgerError::DaySequenceRejected { day: 101 }));
        let stored = h
            .ledger
            .progress_of(&h.user)
            .expect("read progress")
            .expect("record exists");
        assert_eq!(stored.streak, 2);
        assert_eq!(stored.total_claims, 2);

        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 106, b16!(4)));
        let progress = h.ledger.claim(&h.user, &bytes, &sig, NOW).expect("day 106");
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.total_claims, 3);
    }

    #[test]
    fn replay_is_rejected_exactly_once_semantics() {
        let h = harness();
        let payload = payload_for(h.user, 100, b16!(9));
        let (bytes, sig) = sign(&h.oracle, &payload);

        h.ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect("first submission");
        let err = h
            .ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect_err("second submission must reject");
        assert!(matches!(err, LedgerError::NonceAlreadyUsed));

        let stored = h
            .ledger
            .progress_of(&h.user)
            .expect("read progress")
            .expect("record exists");
        assert_eq!(stored.total_claims, 1, "progress must not mutate twice");
    }

    #[test]
    fn replayed_nonce_rejects_even_for_a_different_day() {
        let h = harness();
        let nonce: Nonce = b16!(9);

        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, nonce));
        h.ledger.claim(&h.user, &bytes, &sig, NOW).expect("day 100");

        // replay guard fires before day sequencing
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 101, nonce));
        let err = h
            .ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect_err("reused nonce must reject");
        assert!(matches!(err, LedgerError::NonceAlreadyUsed));
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let h = harness();
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));

        for byte_index in [0_usize, 4, 36, 44, 76, 92, 99] {
            let mut tampered = bytes;
            if let Some(byte) = tampered.get_mut(byte_index) {
                *byte ^= 0x01;
            }
            let err = h
                .ledger
                .claim(&h.user, &tampered, &sig, NOW)
                .expect_err("flipped payload bit must reject");
            assert!(matches!(err, LedgerError::InvalidSignature));
        }
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let h = harness();
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));

        for byte_index in [0_usize, 31, 32, 63] {
            let mut tampered = sig;
            if let Some(byte) = tampered.get_mut(byte_index) {
                *byte ^= 0x01;
            }
            let err = h
                .ledger
                .claim(&h.user, &bytes, &tampered, NOW)
                .expect_err("flipped signature bit must reject");
            assert!(matches!(err, LedgerError::InvalidSignature));
        }
    }

    #[test]
    fn wrong_oracle_key_fails_verification() {
        let h = harness();
        let rogue = SigningKey::from_bytes(&[9_u8; 32]);
        let (bytes, sig) = sign(&rogue, &payload_for(h.user, 100, b16!(1)));
        let err = h
            .ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect_err("foreign signer must reject");
        assert!(matches!(err, LedgerError::InvalidSignature));
    }

    #[test]
    fn caller_mismatch_is_rejected() {
        let h = harness();
        let mallory: UserId = b32!(66);
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));
        let err = h
            .ledger
            .claim(&mallory, &bytes, &sig, NOW)
            .expect_err("caller mismatch must reject");
        assert!(matches!(err, LedgerError::UserMismatch));
    }

    #[test]
    fn expired_attestation_is_rejected() {
        let h = harness();
        let payload = ClaimPayload {
            expires_at: NOW - 1,
            ..payload_for(h.user, 100, b16!(1))
        };
        let (bytes, sig) = sign(&h.oracle, &payload);
        let err = h
            .ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect_err("expired attestation must reject");
        assert!(matches!(err, LedgerError::AttestationExpired { .. }));
        assert!(
            h.ledger.progress_of(&h.user).expect("read").is_none(),
            "no record may appear on rejection"
        );
    }

    #[test]
    fn attestation_valid_exactly_at_deadline() {
        let h = harness();
        let payload = ClaimPayload {
            expires_at: NOW,
            ..payload_for(h.user, 100, b16!(1))
        };
        let (bytes, sig) = sign(&h.oracle, &payload);
        h.ledger
            .claim(&h.user, &bytes, &sig, NOW)
            .expect("deadline-boundary attestation is still valid");
    }

    #[test]
    fn malformed_payload_rejects_after_signature_check() {
        let h = harness();
        let garbage = [0_u8; 99];
        let sig = h.oracle.sign(&garbage).to_bytes();
        let err = h
            .ledger
            .claim(&h.user, &garbage, &sig, NOW)
            .expect_err("malformed payload must reject");
        assert!(matches!(err, LedgerError::MalformedPayload(_)));
    }

    #[test]
    fn dev_entry_point_accepts_repeated_days() {
        let h = harness();
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));
        h.ledger
            .claim_dev(&h.user, &bytes, &sig, NOW)
            .expect("first dev claim");
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(2)));
        let progress = h
            .ledger
            .claim_dev(&h.user, &bytes, &sig, NOW)
            .expect("same-day dev claim");
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.total_claims, 2);
    }

    #[test]
    fn dev_entry_point_still_enforces_replay_guard() {
        let h = harness();
        let (bytes, sig) = sign(&h.oracle, &payload_for(h.user, 100, b16!(1)));
        h.ledger
            .claim_dev(&h.user, &bytes, &sig, NOW)
            .expect("first dev claim");
        let err = h
            .ledger
            .claim_dev(&h.user, &bytes, &sig, NOW)
            .expect_err("dev replay must reject");
        assert!(matches!(err, LedgerError::NonceAlreadyUsed));
    }

    #[test]
    fn execute_dispatches_raw_instruction_data() {
        let h = harness();
        let payload = payload_for(h.user, 100, b16!(1));
        let (_, sig) = sign(&h.oracle, &payload);
        let instruction = ClaimInstruction {
            entry_point: ClaimEntryPoint::Claim,
            day: payload.day,
            session_hash: payload.session_hash,
            nonce: payload.nonce,
            expires_at: payload.expires_at,
            signature: sig,
        };
        let progress = h
            .ledger
            .execute(&h.user, &instruction.encode(), NOW)
            .expect("instruction executes");
        assert_eq!(progress.streak, 1);

        let err = h
            .ledger
            .execute(&h.user, &[0_u8; 10], NOW)
            .expect_err("short instruction must reject");
        assert!(matches!(err, LedgerError::MalformedInstruction(_)));
    }
}
