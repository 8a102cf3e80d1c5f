//! Atomically Published Status Snapshot
//!
//! ## Overview
//!
//! The dispatcher owns all mutable state, but UI/observer threads want to
//! read the confirmed quadrant, the connection state and the last alert
//! outcome at any time. Publishing each field separately would let a reader
//! see a quadrant from one dispatch paired with a connection state from
//! another. Instead the whole snapshot is packed into one `AtomicU32`:
//! single writer (the dispatcher), any number of readers, and every read is
//! internally consistent by construction.
//!
//! ## Packing
//!
//! ```text
//! bits 31..16   session step count (saturating u16)
//! bits 15..8    connection state   (ConnectionState as u8)
//! bits  7..4    last alert outcome (AlertOutcome as u8)
//! bits  3..0    confirmed quadrant (1-4)
//! ```
//!
//! `Release` on publish / `Acquire` on load pair the snapshot with the
//! dispatch that produced it.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::{decision::AlertOutcome, link::ConnectionState, motion::Quadrant};

/// One consistent view of the cross-thread-visible state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Last confirmed facing quadrant
    pub quadrant: Quadrant,
    /// Current link lifecycle state
    pub connection: ConnectionState,
    /// Outcome of the most recent beacon alert
    pub last_outcome: AlertOutcome,
    /// Steps counted this session (saturates at u16::MAX)
    pub steps: u16,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            quadrant: Quadrant::Q4,
            connection: ConnectionState::Idle,
            last_outcome: AlertOutcome::None,
            steps: 0,
        }
    }
}

impl StatusSnapshot {
    fn pack(&self) -> u32 {
        (self.steps as u32) << 16
            | (connection_to_u8(self.connection) as u32) << 8
            | (self.last_outcome as u32) << 4
            | self.quadrant.to_byte() as u32
    }

    fn unpack(raw: u32) -> Self {
        Self {
            steps: (raw >> 16) as u16,
            connection: connection_from_u8((raw >> 8) as u8),
            last_outcome: match (raw >> 4) & 0xf {
                1 => AlertOutcome::VibrationStarted,
                2 => AlertOutcome::VibrationStopped,
                _ => AlertOutcome::None,
            },
            quadrant: match raw & 0xf {
                1 => Quadrant::Q1,
                2 => Quadrant::Q2,
                3 => Quadrant::Q3,
                _ => Quadrant::Q4,
            },
        }
    }
}

fn connection_to_u8(state: ConnectionState) -> u8 {
    match state {
        ConnectionState::Idle => 0,
        ConnectionState::Scanning => 1,
        ConnectionState::Connecting => 2,
        ConnectionState::DiscoveringServices => 3,
        ConnectionState::Ready => 4,
        ConnectionState::Disconnected => 5,
    }
}

fn connection_from_u8(raw: u8) -> ConnectionState {
    match raw {
        1 => ConnectionState::Scanning,
        2 => ConnectionState::Connecting,
        3 => ConnectionState::DiscoveringServices,
        4 => ConnectionState::Ready,
        5 => ConnectionState::Disconnected,
        _ => ConnectionState::Idle,
    }
}

/// Single-writer, multi-reader cell holding the packed snapshot
#[derive(Debug)]
pub struct StatusCell {
    packed: AtomicU32,
}

impl StatusCell {
    /// Cell holding the default (pre-session) snapshot
    pub const fn new() -> Self {
        // Default snapshot: Q4, Idle, no outcome, zero steps
        Self {
            packed: AtomicU32::new(4),
        }
    }

    /// Publish a new snapshot; dispatcher only
    pub fn publish(&self, snapshot: StatusSnapshot) {
        self.packed.store(snapshot.pack(), Ordering::Release);
    }

    /// Read the current snapshot from any thread
    pub fn load(&self) -> StatusSnapshot {
        StatusSnapshot::unpack(self.packed.load(Ordering::Acquire))
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_matches_default_snapshot() {
        let cell = StatusCell::new();
        assert_eq!(cell.load(), StatusSnapshot::default());
    }

    #[test]
    fn pack_round_trip() {
        let snapshot = StatusSnapshot {
            quadrant: Quadrant::Q2,
            connection: ConnectionState::Ready,
            last_outcome: AlertOutcome::VibrationStarted,
            steps: 1234,
        };

        let cell = StatusCell::new();
        cell.publish(snapshot);
        assert_eq!(cell.load(), snapshot);
    }

    #[test]
    fn every_connection_state_round_trips() {
        for state in [
            ConnectionState::Idle,
            ConnectionState::Scanning,
            ConnectionState::Connecting,
            ConnectionState::DiscoveringServices,
            ConnectionState::Ready,
            ConnectionState::Disconnected,
        ] {
            assert_eq!(connection_from_u8(connection_to_u8(state)), state);
        }
    }
}
