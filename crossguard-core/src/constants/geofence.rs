//! Geofence Constants

/// Default safe-zone radius around the saved home coordinate (meters).
pub const SAFE_ZONE_RADIUS_M: f64 = 50.0;

/// Mean Earth radius used by the haversine distance (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Interval between periodic position reports to the notifier (milliseconds).
///
/// 15 minutes: frequent enough for a caregiver to follow a walk, sparse
/// enough not to flood the notification channel.
pub const POSITION_REPORT_INTERVAL_MS: u64 = 15 * 60 * 1000;
