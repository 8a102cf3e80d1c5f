//! Constants for Crossguard Core
//!
//! Centralized, documented constants used throughout the engine. All tuning
//! values live here with their purpose and source; the rest of the crate
//! never carries magic numbers.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Motion**: smoothing, hysteresis and step-detection tuning
//! - **Link**: beacon identity, channel identifiers, timeouts, wire text
//! - **Geofence**: safe-zone radius and geodesic constants

/// Smoothing, hysteresis and step-detection tuning values.
pub mod motion;

/// Beacon identity, channel identifiers, timeouts and wire strings.
pub mod link;

/// Safe-zone radius and geodesic constants.
pub mod geofence;

// Re-export commonly used constants for convenience
pub use motion::{
    HYSTERESIS_THRESHOLD, SMOOTHING_WINDOW, STEP_MAGNITUDE_THRESHOLD, STEP_MIN_INTERVAL_MS,
};

pub use link::{
    BEACON_DEVICE_NAME, INBOUND_CHANNEL_ID, OUTBOUND_CHANNEL_ID, SCAN_TIMEOUT_MS, SERVICE_ID,
};

pub use geofence::SAFE_ZONE_RADIUS_M;
