//! Reference ledger-side logic for the chomp attestation protocol.
//!
//! Everything an authoritative ledger must do to accept a claim exactly once
//! per nonce: verify the oracle signature over the exact payload bytes,
//! cross-check the caller, enforce the expiry, create the replay marker and
//! advance the per-user progress record, all in one atomic unit. The store
//! here realizes those semantics over `sled`; any ledger offering atomic,
//! ordered account mutation can implement the same transition.

/// Ledger error taxonomy.
pub mod error;
/// Raw claim instruction data codec.
pub mod instruction;
/// Progress state-machine transition.
pub mod progress;
/// Versioned binary progress record codec.
pub mod record;
/// Replay-record addressing.
pub mod replay;
/// Sled-backed ledger store.
pub mod store;

pub use error::LedgerError;
pub use store::Ledger;
