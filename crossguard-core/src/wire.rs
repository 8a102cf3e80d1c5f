//! Wire Formats for the Beacon Channels
//!
//! ## Outbound (handheld -> beacon, write channel)
//!
//! Two command shapes share the channel:
//! - **Quadrant report**: a single byte with value 1-4.
//! - **Vibration control**: the ASCII string `VIBRATE_START` or
//!   `VIBRATE_STOP`.
//!
//! ## Inbound (beacon -> handheld, notify channel)
//!
//! ASCII `"<state>,<angle>"`, both decimal integers: state 0/1 (1 = safe to
//! cross for the pedestrian's road), angle the beacon's facing in degrees.
//! Parsing is total: anything that is not exactly two integer fields is
//! reported as [`LinkError::MalformedMessage`] and dropped. A hostile or
//! glitching beacon can never crash the parser.

use heapless::Vec;

use crate::{
    constants::link::{MAX_FRAME_LEN, VIBRATE_START, VIBRATE_STOP},
    errors::{LinkError, LinkResult},
    motion::Quadrant,
};

/// Byte frame ready for the outbound channel
pub type OutboundFrame = Vec<u8, MAX_FRAME_LEN>;

/// Command sent to the beacon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundCommand {
    /// Report the pedestrian's confirmed facing quadrant
    QuadrantReport(Quadrant),
    /// Start the haptic actuator
    VibrationStart,
    /// Stop the haptic actuator
    VibrationStop,
}

impl OutboundCommand {
    /// Encode the command for the write channel
    pub fn encode(&self) -> OutboundFrame {
        let mut frame = OutboundFrame::new();
        let bytes: &[u8] = match self {
            OutboundCommand::QuadrantReport(q) => &[q.to_byte()],
            OutboundCommand::VibrationStart => VIBRATE_START.as_bytes(),
            OutboundCommand::VibrationStop => VIBRATE_STOP.as_bytes(),
        };
        // Frame capacity is sized to the largest command
        let _ = frame.extend_from_slice(bytes);
        frame
    }
}

/// Signal-state message from the beacon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficLightAlert {
    /// 1 = safe to cross, 0 = not safe
    pub signal_state: i32,
    /// Beacon's facing direction in degrees
    pub beacon_angle: i32,
}

/// Parse an inbound payload as `"<state>,<angle>"`
///
/// Never panics; every deviation from the format maps to
/// [`LinkError::MalformedMessage`].
pub fn parse_alert(payload: &[u8]) -> LinkResult<TrafficLightAlert> {
    let text = core::str::from_utf8(payload).map_err(|_| LinkError::MalformedMessage)?;

    let mut fields = text.split(',');
    let state = fields.next().ok_or(LinkError::MalformedMessage)?;
    let angle = fields.next().ok_or(LinkError::MalformedMessage)?;
    if fields.next().is_some() {
        return Err(LinkError::MalformedMessage);
    }

    let signal_state: i32 = state.trim().parse().map_err(|_| LinkError::MalformedMessage)?;
    let beacon_angle: i32 = angle.trim().parse().map_err(|_| LinkError::MalformedMessage)?;

    Ok(TrafficLightAlert {
        signal_state,
        beacon_angle,
    })
}
