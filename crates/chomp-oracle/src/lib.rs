//! Attestation oracle for the chomp protocol.
//!
//! A stateless signing service holding one long-lived ed25519 key. It
//! validates the *shape and freshness* of a claim-signing request and
//! produces a detached signature over the codec-encoded payload. It does not
//! verify that the session commitment corresponds to a genuine detection
//! event; that binding is established client-side before the oracle is ever
//! consulted, and the signature certifies only "this exact tuple was
//! requested within the freshness window".

/// Request validation and signing.
pub mod attest;
/// HTTP surface.
pub mod http;
/// Signing-key resource.
pub mod keys;
