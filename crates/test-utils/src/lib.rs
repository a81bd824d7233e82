//! Shared test utilities for the workspace.

/// Helper macro to create a 32-byte identity/hash array with a specific last byte.
///
/// Returns `[u8; 32]` which can be converted to `UserId` or `SessionHash` via `.into()`.
#[macro_export]
macro_rules! b32 {
    ($v:expr) => {{
        let mut arr = [0_u8; 32];
        arr[31] = $v;
        arr.into()
    }};
}

/// Helper macro to create a 16-byte nonce array with a specific last byte.
///
/// Returns `[u8; 16]` which can be converted to `Nonce` via `.into()`.
#[macro_export]
macro_rules! b16 {
    ($v:expr) => {{
        let mut arr = [0_u8; 16];
        arr[15] = $v;
        arr.into()
    }};
}
