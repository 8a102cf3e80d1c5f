//! Core engine for Crossguard
//!
//! Pairs a handheld device with a wireless beacon embedded in a pedestrian
//! traffic signal. The engine turns noisy accelerometer/magnetometer samples
//! into a debounced facing quadrant and step events, drives the beacon link
//! through its connection lifecycle, and fuses both into haptic actuator
//! commands. A geofence monitor watches position fixes against a saved
//! safe zone on the side.
//!
//! Key constraints:
//! - Single control thread; all host callbacks become [`events::Event`]s
//!   consumed in arrival order by [`monitor::SafetyMonitor`]
//! - No heap allocation in the event path (heapless buffers throughout)
//! - No blocking: timeouts are deadlines checked against event timestamps
//! - Cross-thread reads go through an atomic [`status::StatusSnapshot`]
//!
//! ```no_run
//! use crossguard_core::{
//!     events::Event,
//!     monitor::SafetyMonitor,
//!     traits::{Notifier, TrackSink, ZoneStore},
//! };
//!
//! # fn run<N: Notifier, S: TrackSink, Z: ZoneStore>(notifier: N, sink: S, store: Z) {
//! let mut monitor = SafetyMonitor::new(notifier, sink, store);
//! monitor.begin_session(0, true);
//!
//! // Host delivers sensor, link and position callbacks as events:
//! // for cmd in monitor.dispatch(event) { radio.execute(cmd); }
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Optional logging shims. Every link error goes through these; with the
// `log` feature off they compile to nothing.
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
}

pub mod buffer;
pub mod constants;
pub mod decision;
pub mod errors;
pub mod events;
pub mod geofence;
pub mod link;
pub mod monitor;
pub mod motion;
pub mod orientation;
pub mod status;
pub mod time;
pub mod traits;
pub mod wire;

// Public API
pub use errors::{LinkError, LinkResult};
pub use events::{Event, SensorKind, Vec3};
pub use link::{ConnectionState, LinkCommand, LinkEvent, PeripheralLink};
pub use monitor::SafetyMonitor;
pub use motion::{MotionClassifier, Quadrant, StepEvent};
pub use wire::{OutboundCommand, TrafficLightAlert};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
