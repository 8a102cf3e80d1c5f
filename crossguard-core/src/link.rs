//! Peripheral Link: Beacon Connection State Machine
//!
//! ## Overview
//!
//! Drives the discover -> connect -> negotiate -> exchange lifecycle of the
//! beacon link over an abstract wireless capability. The host platform owns
//! the actual radio; this module owns only the state. Every input is an
//! explicit [`LinkEvent`], every output an explicit [`LinkCommand`] for the
//! host to execute, so the whole lifecycle is a pure transition function
//! with no hidden callbacks capturing the link object.
//!
//! ## State Machine
//!
//! ```text
//!            start() [radio on]           DeviceFound (name match)
//!   Idle ───────────────────────> Scanning ─────────────────────> Connecting
//!    ^                               │                                │
//!    │  ScanTimeout / ScanFailed /   │                    Connected   │   ConnectFailed
//!    └────────── stop() ─────────────┘                        │       └──────────┐
//!                                                             v                  v
//!                    NotificationsEnabled          DiscoveringServices ──> Disconnected
//!          Ready <─────────────────────────────────────┘     │                  ^
//!            │                                 service/channel missing          │
//!            └── ConnectionLost / disconnect() ──────────────┴──────────────────┘
//! ```
//!
//! `Disconnected` and `Idle` are terminal until the caller invokes `start()`
//! again; nothing in here retries on its own.
//!
//! ## Timeouts Without Timers
//!
//! The scan timeout is a deadline compared against event timestamps in
//! [`PeripheralLink::poll`]. `stop()` and `disconnect()` clear the deadline,
//! so a tick that was already in flight when the caller tore the link down
//! observes the cleared state and does nothing.

use heapless::Vec;

use crate::{
    constants::link::{BEACON_DEVICE_NAME, MAX_PAYLOAD_LEN, SCAN_TIMEOUT_MS},
    errors::LinkError,
    time::Timestamp,
    wire::{self, OutboundCommand, OutboundFrame, TrafficLightAlert},
};

/// Maximum commands a single transition can emit
const MAX_STEP_COMMANDS: usize = 2;

/// Connection lifecycle state; owned by exactly one [`PeripheralLink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not scanning, not connected; `start()` begins a scan
    #[default]
    Idle,
    /// Scanning for the configured device name
    Scanning,
    /// Low-level connect in flight
    Connecting,
    /// Connected, locating the service and its two channels
    DiscoveringServices,
    /// Channels located, notifications enabled; `send()` works
    Ready,
    /// Torn down after a connected state; restart via `start()`
    Disconnected,
}

/// Input to the state machine, delivered by the host radio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// Scan result; `name` is the advertised device name
    DeviceFound {
        /// Advertised name of the discovered device
        name: heapless::String<32>,
    },
    /// Host scanner failed with a platform error code
    ScanFailed {
        /// Platform error code
        code: i32,
    },
    /// Low-level connect succeeded
    Connected,
    /// Low-level connect failed
    ConnectFailed {
        /// Platform status code
        status: i32,
    },
    /// Service discovery finished; flags say what was found
    ServicesDiscovered {
        /// Expected service present
        service: bool,
        /// Inbound (notify) channel present
        inbound: bool,
        /// Outbound (write) channel present
        outbound: bool,
    },
    /// Notification delivery is active on the inbound channel
    NotificationsEnabled,
    /// The connection dropped at a lower level
    ConnectionLost,
    /// Framed payload arrived on the inbound channel
    InboundPayload {
        /// Raw payload bytes
        payload: Vec<u8, MAX_PAYLOAD_LEN>,
    },
}

/// Side effect for the host radio to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCommand {
    /// Begin scanning, filtered to the configured device name
    StartScan,
    /// Stop an active scan
    StopScan,
    /// Connect to the device that matched the scan filter
    Connect,
    /// Enumerate services and channels on the connected device
    DiscoverServices,
    /// Enable notification delivery on the inbound channel
    SubscribeInbound,
    /// Write one frame to the outbound channel, fire-and-forget
    WriteOutbound(OutboundFrame),
    /// Release the connection and all channel handles
    Teardown,
}

/// Result of one transition: commands for the radio plus an optional
/// parsed inbound alert for the decision layer
#[derive(Debug, Default)]
pub struct LinkStep {
    /// Side effects to execute, in order
    pub commands: Vec<LinkCommand, MAX_STEP_COMMANDS>,
    /// Alert parsed from an inbound payload, if this event carried one
    pub alert: Option<TrafficLightAlert>,
}

impl LinkStep {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    fn with(commands: &[LinkCommand]) -> Self {
        let mut step = Self::default();
        for cmd in commands {
            // Capacity is sized to the largest transition (two commands)
            let _ = step.commands.push(cmd.clone());
        }
        step
    }
}

/// The beacon connection state machine
#[derive(Debug)]
pub struct PeripheralLink {
    state: ConnectionState,
    device_name: &'static str,
    scan_deadline: Option<Timestamp>,
    last_error: Option<LinkError>,
}

impl Default for PeripheralLink {
    fn default() -> Self {
        Self::new()
    }
}

impl PeripheralLink {
    /// Create a link for the default beacon name, starting Idle
    pub const fn new() -> Self {
        Self::with_device_name(BEACON_DEVICE_NAME)
    }

    /// Create a link matching a specific advertised name
    pub const fn with_device_name(device_name: &'static str) -> Self {
        Self {
            state: ConnectionState::Idle,
            device_name,
            scan_deadline: None,
            last_error: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Most recent error, kept for diagnostics; cleared on `start()`
    pub fn last_error(&self) -> Option<LinkError> {
        self.last_error
    }

    /// Begin scanning. Fails silently (logs, stays Idle) when the radio is
    /// unavailable; a start while not Idle is a logged no-op.
    pub fn start(&mut self, now: Timestamp, radio_enabled: bool) -> LinkStep {
        if self.state != ConnectionState::Idle && self.state != ConnectionState::Disconnected {
            log_info!("link start ignored in state {:?}", self.state);
            return LinkStep::none();
        }

        if !radio_enabled {
            self.fail(LinkError::ScanUnavailable);
            self.state = ConnectionState::Idle;
            return LinkStep::none();
        }

        self.last_error = None;
        self.state = ConnectionState::Scanning;
        self.scan_deadline = Some(now + SCAN_TIMEOUT_MS);
        log_info!("scanning for '{}'", self.device_name);
        LinkStep::with(&[LinkCommand::StartScan])
    }

    /// Stop an active scan; no-op in every other state
    pub fn stop(&mut self) -> LinkStep {
        if self.state != ConnectionState::Scanning {
            return LinkStep::none();
        }

        self.state = ConnectionState::Idle;
        self.scan_deadline = None;
        log_info!("scan stopped");
        LinkStep::with(&[LinkCommand::StopScan])
    }

    /// Tear the connection down. Idempotent: repeated calls and calls in
    /// Idle are safe no-ops; an active scan is treated as `stop()`.
    pub fn disconnect(&mut self) -> LinkStep {
        match self.state {
            ConnectionState::Idle | ConnectionState::Disconnected => LinkStep::none(),
            ConnectionState::Scanning => self.stop(),
            ConnectionState::Connecting
            | ConnectionState::DiscoveringServices
            | ConnectionState::Ready => {
                self.state = ConnectionState::Disconnected;
                self.scan_deadline = None;
                log_info!("link disconnected");
                LinkStep::with(&[LinkCommand::Teardown])
            }
        }
    }

    /// Fire the scan timeout when its deadline has passed. Deadlines are
    /// cleared on stop/match/teardown, so a late tick is harmless.
    pub fn poll(&mut self, now: Timestamp) -> LinkStep {
        match self.scan_deadline {
            Some(deadline) if self.state == ConnectionState::Scanning && now >= deadline => {
                self.fail(LinkError::ScanTimeout);
                self.state = ConnectionState::Idle;
                self.scan_deadline = None;
                LinkStep::with(&[LinkCommand::StopScan])
            }
            _ => LinkStep::none(),
        }
    }

    /// Feed one radio event through the transition function
    pub fn handle(&mut self, event: LinkEvent) -> LinkStep {
        match (self.state, event) {
            (ConnectionState::Scanning, LinkEvent::DeviceFound { name }) => {
                if name.as_str() != self.device_name {
                    return LinkStep::none();
                }
                // First match wins; no signal-strength ranking
                log_info!("device '{}' found", self.device_name);
                self.state = ConnectionState::Connecting;
                self.scan_deadline = None;
                LinkStep::with(&[LinkCommand::StopScan, LinkCommand::Connect])
            }

            (ConnectionState::Scanning, LinkEvent::ScanFailed { code }) => {
                self.fail(LinkError::ScanFailure { code });
                self.state = ConnectionState::Idle;
                self.scan_deadline = None;
                LinkStep::none()
            }

            (ConnectionState::Connecting, LinkEvent::Connected) => {
                log_info!("connected, discovering services");
                self.state = ConnectionState::DiscoveringServices;
                LinkStep::with(&[LinkCommand::DiscoverServices])
            }

            (ConnectionState::Connecting, LinkEvent::ConnectFailed { status }) => {
                self.fail(LinkError::ConnectFailure { status });
                self.state = ConnectionState::Disconnected;
                LinkStep::with(&[LinkCommand::Teardown])
            }

            (
                ConnectionState::DiscoveringServices,
                LinkEvent::ServicesDiscovered {
                    service,
                    inbound,
                    outbound,
                },
            ) => {
                let missing = if !service {
                    Some("service not found")
                } else if !inbound {
                    Some("inbound channel not found")
                } else if !outbound {
                    Some("outbound channel not found")
                } else {
                    None
                };

                match missing {
                    Some(reason) => {
                        self.fail(LinkError::ServiceDiscoveryFailure { reason });
                        self.state = ConnectionState::Disconnected;
                        LinkStep::with(&[LinkCommand::Teardown])
                    }
                    None => LinkStep::with(&[LinkCommand::SubscribeInbound]),
                }
            }

            (ConnectionState::DiscoveringServices, LinkEvent::NotificationsEnabled) => {
                log_info!("subscribed to notifications, link ready");
                self.state = ConnectionState::Ready;
                LinkStep::none()
            }

            (
                ConnectionState::Connecting
                | ConnectionState::DiscoveringServices
                | ConnectionState::Ready,
                LinkEvent::ConnectionLost,
            ) => {
                log_warn!("connection lost");
                self.state = ConnectionState::Disconnected;
                LinkStep::none()
            }

            (ConnectionState::Ready, LinkEvent::InboundPayload { payload }) => {
                match wire::parse_alert(&payload) {
                    Ok(alert) => {
                        let mut step = LinkStep::none();
                        step.alert = Some(alert);
                        step
                    }
                    Err(err) => {
                        // Absorbed at the parse boundary: logged, dropped,
                        // and the link stays up
                        self.fail(err);
                        LinkStep::none()
                    }
                }
            }

            (state, event) => {
                log_info!("link event {:?} ignored in state {:?}", event, state);
                LinkStep::none()
            }
        }
    }

    /// Send a command to the beacon. Dropped (logged, no write attempted)
    /// unless the link is Ready; delivery is fire-and-forget.
    pub fn send(&mut self, command: OutboundCommand) -> LinkStep {
        if self.state != ConnectionState::Ready {
            self.fail(LinkError::SendFailure);
            return LinkStep::none();
        }

        LinkStep::with(&[LinkCommand::WriteOutbound(command.encode())])
    }

    fn fail(&mut self, error: LinkError) {
        log_warn!("link error: {}", error);
        self.last_error = Some(error);
    }
}
