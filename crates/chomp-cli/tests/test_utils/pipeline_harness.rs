#![allow(
    dead_code,
    clippy::indexing_slicing,
    reason = "Test helpers intentionally use direct indexing for concise assertions"
)]

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chomp_oracle::attest::MAX_EXPIRY_WINDOW_SECS;
use chomp_oracle::http::{AppState, app_router};
use chomp_oracle::keys::OracleKeypair;
use serde_json::Value;

/// Deterministic oracle seed shared by all pipeline tests.
const ORACLE_SEED: [u8; 32] = [7_u8; 32];

/// A detached in-process oracle serving on an ephemeral port.
pub struct OracleHandle {
    /// Base URL of the running oracle.
    pub url: String,
    /// Base58 signer identity of the running oracle.
    pub pubkey: String,
}

/// Spawn the oracle router on an ephemeral port for the process lifetime.
pub fn spawn_oracle() -> OracleHandle {
    let keypair = OracleKeypair::from_seed(&ORACLE_SEED);
    let pubkey = keypair.public_key_base58();
    let state = AppState::new(keypair, MAX_EXPIRY_WINDOW_SECS);

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    listener.set_nonblocking(true).expect("nonblocking listener");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("oracle runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app_router(state)).await.expect("serve");
        });
    });

    OracleHandle {
        url: format!("http://{addr}"),
        pubkey,
    }
}

pub fn chomp() -> assert_cmd::Command {
    cargo_bin_cmd!("chomp")
}

pub fn s(path: &Path) -> &str {
    path.to_str().expect("path is valid UTF-8")
}

/// Write a plausible completed detection proof document.
pub fn write_proof(dir: &Path) -> PathBuf {
    let path = dir.join("proof.json");
    let proof = serde_json::json!({
        "event": "brush_complete",
        "required_sec": 20.0,
        "accumulated_sec": 20.7,
        "completed_at": "2026-08-07T08:12:44",
        "model": "yolov8n.pt",
        "classes": ["person", "toothbrush"],
        "conf_thres": 0.4,
    });
    fs::write(&path, serde_json::to_string_pretty(&proof).expect("serialize proof"))
        .expect("write proof.json");
    path
}

/// Generate an identity seed file through the CLI and return its path.
pub fn generate_seed(dir: &Path) -> PathBuf {
    let path = dir.join("seed.txt");
    chomp()
        .args(["key", "generate", "--output", s(&path)])
        .assert()
        .success();
    path
}

pub fn load_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read json")).expect("parse json")
}

/// Combined stdout+stderr of a finished command assertion.
pub fn combined_output(assert: &assert_cmd::assert::Assert) -> String {
    let output = assert.get_output();
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Flip one byte inside a base64-encoded JSON string field.
pub fn flip_base64_byte(value: &mut Value, byte_index: usize) {
    let encoded = value
        .as_str()
        .expect("expected JSON base64 field as string")
        .to_owned();
    let mut bytes = STANDARD.decode(&encoded).expect("expected valid base64 string");
    assert!(
        byte_index < bytes.len(),
        "byte_index {byte_index} out of range for {}-byte base64 value",
        bytes.len()
    );
    bytes[byte_index] ^= 0xff;
    *value = Value::String(STANDARD.encode(bytes));
}

/// Write a tampered attestation document next to the original.
pub fn write_tampered(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    let body = serde_json::to_string_pretty(value).expect("serialize tampered json");
    fs::write(&path, body).expect("write tampered json");
    path
}
