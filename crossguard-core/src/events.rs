//! Event Types for the Single Control Thread
//!
//! ## Overview
//!
//! The host platform delivers sensor samples, link callbacks and position
//! fixes asynchronously. Instead of letting each callback mutate shared
//! state, everything is reified as an [`Event`] and fed to
//! [`SafetyMonitor::dispatch`](crate::monitor::SafetyMonitor::dispatch) in
//! arrival order. Ordering and the no-reentrancy assumption become
//! structural: there is exactly one consumer and it owns all mutable state.
//!
//! ```text
//! accel/mag ISR ─┐
//! link callback ─┼─> Event ─> SafetyMonitor ─> LinkCommands to the radio
//! position fix ──┤
//! host timer ────┘ (Tick)
//! ```
//!
//! Events carry their arrival timestamp so the engine never reads a clock;
//! deadlines (scan timeout, step spacing, periodic reports) are comparisons
//! against these stamps.

use crate::geofence::PositionFix;
use crate::link::LinkEvent;
use crate::time::Timestamp;

/// 3-axis sensor vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X axis component
    pub x: f32,
    /// Y axis component
    pub y: f32,
    /// Z axis component
    pub z: f32,
}

impl Vec3 {
    /// Construct from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Squared length (cheaper when only compared against a threshold)
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Cross product `self x other`
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Scale every component by `factor`
    pub fn scaled(&self, factor: f32) -> Vec3 {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

/// Which on-board sensor produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// 3-axis accelerometer (gravity plus motion)
    Accelerometer,
    /// 3-axis magnetometer (geomagnetic field)
    Magnetometer,
}

/// One unit of work for the dispatcher
#[derive(Debug, Clone)]
pub enum Event {
    /// Calibrated sample from one of the motion sensors
    SensorSample {
        /// Which sensor produced the sample
        kind: SensorKind,
        /// The 3-axis reading
        sample: Vec3,
        /// Arrival time in milliseconds
        timestamp: Timestamp,
    },

    /// Callback from the host wireless capability
    Link {
        /// What the radio reported
        event: LinkEvent,
        /// Arrival time in milliseconds
        timestamp: Timestamp,
    },

    /// Absolute position fix from the host location provider
    Position(PositionFix),

    /// Periodic timer tick; drives deadlines without blocking waits
    Tick {
        /// Tick time in milliseconds
        timestamp: Timestamp,
    },
}

impl Event {
    /// Arrival timestamp of the event
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Event::SensorSample { timestamp, .. } => *timestamp,
            Event::Link { timestamp, .. } => *timestamp,
            Event::Position(fix) => fix.timestamp,
            Event::Tick { timestamp } => *timestamp,
        }
    }
}
