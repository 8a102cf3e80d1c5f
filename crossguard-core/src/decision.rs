//! Safety Decision Engine
//!
//! ## Overview
//!
//! Fuses two independent signals into actuator commands for the beacon:
//! the pedestrian's confirmed facing quadrant (from the motion classifier)
//! and the beacon's signal-state alert (from the link). Each alert is
//! processed exactly once, synchronously, in arrival order.
//!
//! ## Alignment Rule
//!
//! The pedestrian's crossing direction is orthogonal to the beacon's facing
//! direction: a beacon facing east/west (Q1/Q3) governs a north/south
//! crossing, so the user must face Q2 or Q4, and vice versa.
//!
//! ```text
//! beacon Q1 or Q3  ->  user must be in Q2 or Q4
//! beacon Q2 or Q4  ->  user must be in Q1 or Q3
//! ```
//!
//! Vibration starts only when the signal says safe (state 1) AND the user is
//! aligned; every other combination stops it. The quadrant report always
//! follows, regardless of the vibration outcome - the beacon wants the
//! latest quadrant independent of alert content.

use heapless::Vec;

use crate::{
    motion::Quadrant,
    wire::{OutboundCommand, TrafficLightAlert},
};

/// Signal-state value meaning "safe to cross"
const SIGNAL_SAFE: i32 = 1;

/// What the last alert resolved to; published in the status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlertOutcome {
    /// No alert processed yet this session
    #[default]
    None = 0,
    /// Signal safe and user aligned; vibration started
    VibrationStarted = 1,
    /// Signal unsafe or user misaligned; vibration stopped
    VibrationStopped = 2,
}

/// Stateless fusion of quadrant and signal state into beacon commands
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyDecisionEngine;

impl SafetyDecisionEngine {
    /// Create the engine
    pub const fn new() -> Self {
        Self
    }

    /// Process one alert against the user's confirmed quadrant.
    ///
    /// Returns the commands to send, in order: the vibration decision
    /// first, then the unconditional quadrant report.
    pub fn on_alert(
        &self,
        alert: TrafficLightAlert,
        user_quadrant: Quadrant,
    ) -> (AlertOutcome, Vec<OutboundCommand, 2>) {
        let beacon_quadrant = Quadrant::from_angle(alert.beacon_angle as f32);
        let aligned = Self::is_crossing_aligned(beacon_quadrant, user_quadrant);

        let (outcome, vibration) = if alert.signal_state == SIGNAL_SAFE && aligned {
            (AlertOutcome::VibrationStarted, OutboundCommand::VibrationStart)
        } else {
            (AlertOutcome::VibrationStopped, OutboundCommand::VibrationStop)
        };

        let mut commands: Vec<OutboundCommand, 2> = Vec::new();
        // Capacity is exactly two; both pushes always fit
        let _ = commands.push(vibration);
        let _ = commands.push(OutboundCommand::QuadrantReport(user_quadrant));

        (outcome, commands)
    }

    /// Orthogonality rule relating the beacon's facing to the user's
    fn is_crossing_aligned(beacon: Quadrant, user: Quadrant) -> bool {
        match beacon {
            Quadrant::Q1 | Quadrant::Q3 => matches!(user, Quadrant::Q2 | Quadrant::Q4),
            Quadrant::Q2 | Quadrant::Q4 => matches!(user, Quadrant::Q1 | Quadrant::Q3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(signal_state: i32, beacon_angle: i32) -> TrafficLightAlert {
        TrafficLightAlert {
            signal_state,
            beacon_angle,
        }
    }

    #[test]
    fn safe_and_aligned_starts_vibration() {
        // Beacon at 100 degrees is Q1; user in Q2 is orthogonal
        let engine = SafetyDecisionEngine::new();
        let (outcome, commands) = engine.on_alert(alert(1, 100), Quadrant::Q2);

        assert_eq!(outcome, AlertOutcome::VibrationStarted);
        assert_eq!(
            commands.as_slice(),
            &[
                OutboundCommand::VibrationStart,
                OutboundCommand::QuadrantReport(Quadrant::Q2),
            ]
        );
    }

    #[test]
    fn unsafe_signal_overrides_alignment() {
        let engine = SafetyDecisionEngine::new();
        let (outcome, commands) = engine.on_alert(alert(0, 100), Quadrant::Q2);

        assert_eq!(outcome, AlertOutcome::VibrationStopped);
        assert_eq!(
            commands.as_slice(),
            &[
                OutboundCommand::VibrationStop,
                OutboundCommand::QuadrantReport(Quadrant::Q2),
            ]
        );
    }

    #[test]
    fn misaligned_user_stops_vibration() {
        // Beacon at 10 degrees is Q4; Q4 requires the user in Q1 or Q3
        let engine = SafetyDecisionEngine::new();
        let (outcome, commands) = engine.on_alert(alert(1, 10), Quadrant::Q2);

        assert_eq!(outcome, AlertOutcome::VibrationStopped);
        assert_eq!(commands[0], OutboundCommand::VibrationStop);
    }

    #[test]
    fn quadrant_report_always_sent() {
        let engine = SafetyDecisionEngine::new();
        for (state, angle, user) in [
            (1, 100, Quadrant::Q2),
            (0, 100, Quadrant::Q2),
            (1, 10, Quadrant::Q2),
            (1, 200, Quadrant::Q1),
        ] {
            let (_, commands) = engine.on_alert(alert(state, angle), user);
            assert_eq!(commands.len(), 2);
            assert_eq!(commands[1], OutboundCommand::QuadrantReport(user));
        }
    }

    #[test]
    fn alignment_table() {
        use Quadrant::*;
        let aligned = SafetyDecisionEngine::is_crossing_aligned;

        for beacon in [Q1, Q3] {
            assert!(aligned(beacon, Q2));
            assert!(aligned(beacon, Q4));
            assert!(!aligned(beacon, Q1));
            assert!(!aligned(beacon, Q3));
        }
        for beacon in [Q2, Q4] {
            assert!(aligned(beacon, Q1));
            assert!(aligned(beacon, Q3));
            assert!(!aligned(beacon, Q2));
            assert!(!aligned(beacon, Q4));
        }
    }
}
