//! Collaborator Traits
//!
//! The engine treats everything outside the core as a narrow interface:
//! outbound text notifications, track-point persistence, and durable storage
//! of the safe-zone coordinate. Hosts implement these against whatever
//! transport or store they have; tests implement them with buffers.
//!
//! All three are fire-and-forget from the engine's perspective: failures are
//! the collaborator's problem and never come back as errors.

use crate::time::Timestamp;

/// Why a track point was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackKind {
    /// Ordinary point of the session's position trace
    Track,
    /// The fix that left the safe zone
    GeofenceExit,
}

/// One timestamped position record for the persistence sink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Fix time in milliseconds
    pub timestamp: Timestamp,
    /// What this record represents
    pub kind: TrackKind,
}

/// Outbound text notification delivery, fire-and-forget
pub trait Notifier {
    /// Deliver one message; completion and failure are the host's concern
    fn notify(&mut self, text: &str);
}

/// Append-only sink for track points (most-recent-first presentation is
/// the sink's concern, not the engine's)
pub trait TrackSink {
    /// Record one point
    fn record(&mut self, point: TrackPoint);
}

/// Durable storage of the saved safe-zone center
pub trait ZoneStore {
    /// Load the saved coordinate, if one was ever saved
    fn load(&self) -> Option<(f64, f64)>;
    /// Overwrite the saved coordinate
    fn save(&mut self, lat: f64, lon: f64);
}
