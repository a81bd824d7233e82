//! Detection-session proof document model.
//!
//! The vision detector emits this JSON when a brushing session completes.
//! The protocol treats the document as opaque bytes when hashing; this typed
//! model exists for client-side sanity checks and operator display only.

use serde::{Deserialize, Serialize};

/// Event name the detector uses for a completed brushing session.
pub const BRUSH_COMPLETE_EVENT: &str = "brush_complete";

/// Proof document produced by the external vision detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionProof {
    /// Event kind; [`BRUSH_COMPLETE_EVENT`] for a finished session.
    pub event: String,
    /// Seconds of detected brushing required for completion.
    pub required_sec: f64,
    /// Seconds of detected brushing actually accumulated.
    pub accumulated_sec: f64,
    /// Detector-local completion timestamp (ISO 8601).
    pub completed_at: String,
    /// Vision model identifier used for detection.
    pub model: String,
    /// Object classes the detector tracked.
    pub classes: Vec<String>,
    /// Confidence threshold applied to detections.
    pub conf_thres: f64,
}

impl DetectionProof {
    /// Whether the document describes a completed brushing session.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.event == BRUSH_COMPLETE_EVENT
    }
}
