//! Beacon-Link Constants
//!
//! Identity of the traffic-signal beacon, the logical channel identifiers of
//! its message service, and the wire-level text the two sides exchange.
//! These values are fixed by the beacon firmware; they are configuration in
//! name only.

/// Advertised name the scanner matches exactly. First match wins.
pub const BEACON_DEVICE_NAME: &str = "ESP32_Cerebro_IoT";

/// Logical service identifier on the beacon.
pub const SERVICE_ID: &str = "12345678-1234-1234-1234-123456789abc";

/// Inbound (notify) channel: beacon -> handheld signal-state alerts.
pub const INBOUND_CHANNEL_ID: &str = "87654321-4321-4321-4321-cba987654321";

/// Outbound (write) channel: handheld -> beacon commands.
pub const OUTBOUND_CHANNEL_ID: &str = "11111111-2222-3333-4444-555555555555";

/// How long a scan runs before giving up (milliseconds).
pub const SCAN_TIMEOUT_MS: u64 = 15_000;

/// ASCII command that starts the beacon's haptic actuator.
pub const VIBRATE_START: &str = "VIBRATE_START";

/// ASCII command that stops the beacon's haptic actuator.
pub const VIBRATE_STOP: &str = "VIBRATE_STOP";

/// Largest outbound frame: the longer of the two vibration commands.
pub const MAX_FRAME_LEN: usize = VIBRATE_START.len();

/// Largest inbound payload we accept ("<state>,<angle>" plus slack).
pub const MAX_PAYLOAD_LEN: usize = 16;
