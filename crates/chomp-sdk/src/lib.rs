//! Client workflow logic for the chomp attestation protocol.
//!
//! A claim is a linear, cancelable pipeline: bind the detection proof to the
//! wallet identity, request an oracle attestation, re-derive the payload
//! locally to detect tampering, then submit one atomic claim. Any step may
//! fail and the whole flow is abandoned with no partial ledger effects;
//! retries are caller-driven, never automatic.

/// Application command implementations.
pub mod commands;
/// CLI-independent shared helpers.
pub mod common;
/// Wallet identity seed handling.
pub mod identity;
/// HTTP client for the attestation oracle.
pub mod oracle_client;
