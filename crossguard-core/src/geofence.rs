//! Geofence Monitor
//!
//! Compares externally supplied position fixes against a saved safe zone: a
//! center coordinate plus a fixed radius. Purely a threshold comparison with
//! no state beyond the zone itself - a fix outside the radius produces one
//! event, and a user lingering at the boundary will produce one per fix
//! (debouncing, if wanted, belongs to the caller; see DESIGN.md).
//!
//! Distance is great-circle (haversine), good to well under a meter at
//! safe-zone scales.

use crate::{
    constants::geofence::{EARTH_RADIUS_M, SAFE_ZONE_RADIUS_M},
    time::Timestamp,
};

/// Saved safe-zone center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeZone {
    /// Center latitude in degrees
    pub lat: f64,
    /// Center longitude in degrees
    pub lon: f64,
    /// Radius in meters
    pub radius_m: f64,
}

impl SafeZone {
    /// Zone around a center with the default 50 m radius
    pub fn around(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            radius_m: SAFE_ZONE_RADIUS_M,
        }
    }
}

/// One absolute position fix from the host location provider
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Fix time in milliseconds
    pub timestamp: Timestamp,
}

/// Emitted when a fix falls outside the safe zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceEvent {
    /// Distance from the zone center in meters
    pub distance_m: f64,
    /// The fix that triggered the event
    pub fix: PositionFix,
}

/// Threshold comparison of fixes against the optional safe zone
#[derive(Debug, Clone, Copy, Default)]
pub struct GeofenceMonitor {
    zone: Option<SafeZone>,
}

impl GeofenceMonitor {
    /// Monitor with no zone; `check` is a no-op until one is set
    pub const fn new() -> Self {
        Self { zone: None }
    }

    /// Monitor around a loaded zone
    pub const fn with_zone(zone: SafeZone) -> Self {
        Self { zone: Some(zone) }
    }

    /// The active zone, if any
    pub fn zone(&self) -> Option<SafeZone> {
        self.zone
    }

    /// Replace the active zone
    pub fn set_zone(&mut self, zone: SafeZone) {
        self.zone = Some(zone);
    }

    /// Compare one fix against the zone; an event per over-radius fix
    pub fn check(&self, fix: PositionFix) -> Option<GeofenceEvent> {
        let zone = self.zone?;
        let distance_m = haversine_m(fix.lat, fix.lon, zone.lat, zone.lon);

        (distance_m > zone.radius_m).then_some(GeofenceEvent { distance_m, fix })
    }
}

/// Great-circle distance between two coordinates in meters
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = libm::sin(d_lat / 2.0) * libm::sin(d_lat / 2.0)
        + libm::cos(lat1.to_radians())
            * libm::cos(lat2.to_radians())
            * libm::sin(d_lon / 2.0)
            * libm::sin(d_lon / 2.0);
    let c = 2.0 * libm::atan2(libm::sqrt(a), libm::sqrt(1.0 - a));

    EARTH_RADIUS_M * c
}
