//! Chomp base primitives and schemas.
//!
//! The single source of truth for what a claim attestation *is*: the 100-byte
//! [`payload::ClaimPayload`] binding a user, a UTC day, a detection-session
//! commitment, a nonce and an expiry into the only value the oracle ever
//! signs and the ledger ever verifies.

/// Foundational primitive types and helpers shared across crates.
pub mod base;
/// Hex/base64 parsing helpers for transport-level byte fields.
pub mod bytes;
/// The fixed-layout claim payload codec.
pub mod payload;
/// Serialized/public schema models used across the workspace.
pub mod schema;
