//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod bind_session;
mod claim_run;
mod progress;
mod request_attestation;
mod submit_claim;
mod verify_attestation;

pub use bind_session::bind_session;
pub use claim_run::{ClaimRunArgs, claim_run};
pub use progress::{init_progress, show_progress};
pub use request_attestation::{attest_claim, request_attestation};
pub use submit_claim::{submit_attestation, submit_claim};
pub use verify_attestation::verify_attestation_file;
