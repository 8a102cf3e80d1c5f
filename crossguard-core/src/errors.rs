//! Error Types for the Beacon Link
//!
//! ## Design Philosophy
//!
//! Link errors follow three rules:
//!
//! 1. **Small and Copy**: every variant is a couple of machine words; errors
//!    travel through the event path and must not allocate.
//!
//! 2. **Logged, not thrown**: each error is written to the log sink and,
//!    where applicable, surfaced as a connection-state transition. None is
//!    fatal to the process; the link can always be restarted with `start()`.
//!
//! 3. **No automatic retry**: a failed connect or discovery ends in
//!    `Disconnected` and stays there until the caller re-invokes `start()`.
//!
//! ## Taxonomy
//!
//! | Variant                   | Raised when                            | State effect       |
//! |---------------------------|----------------------------------------|--------------------|
//! | `ScanUnavailable`         | radio disabled at `start()`            | stays Idle         |
//! | `ScanTimeout`             | no matching device within the deadline | Scanning -> Idle   |
//! | `ScanFailure(code)`       | host scanner reported an error         | Scanning -> Idle   |
//! | `ConnectFailure(status)`  | low-level connect rejected             | -> Disconnected    |
//! | `ServiceDiscoveryFailure` | service or a channel missing           | -> Disconnected    |
//! | `MalformedMessage`        | inbound payload failed to parse        | none (dropped)     |
//! | `SendFailure`             | `send()` outside the Ready state       | none (dropped)     |

use thiserror_no_std::Error;

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Beacon-link errors - kept small, never fatal
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Radio capability is disabled or absent; scan not started
    #[error("radio unavailable, scan not started")]
    ScanUnavailable,

    /// Scan deadline elapsed without a matching device
    #[error("scan timed out, device not found")]
    ScanTimeout,

    /// Host scanner reported a failure code
    #[error("scan failed with code {code}")]
    ScanFailure {
        /// Error code forwarded from the host scanner
        code: i32,
    },

    /// Low-level connect was rejected
    #[error("connect failed with status {status}")]
    ConnectFailure {
        /// Status forwarded from the host connect attempt
        status: i32,
    },

    /// Expected service or one of its channels is missing on the peer
    #[error("service discovery failed: {reason}")]
    ServiceDiscoveryFailure {
        /// Which part of the service layout was missing
        reason: &'static str,
    },

    /// Inbound payload did not parse as "<state>,<angle>"
    #[error("malformed inbound message")]
    MalformedMessage,

    /// Outbound command dropped because the link is not ready
    #[error("send rejected: link not ready")]
    SendFailure,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LinkError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ScanUnavailable => defmt::write!(fmt, "radio unavailable"),
            Self::ScanTimeout => defmt::write!(fmt, "scan timeout"),
            Self::ScanFailure { code } => defmt::write!(fmt, "scan failed: {}", code),
            Self::ConnectFailure { status } => defmt::write!(fmt, "connect failed: {}", status),
            Self::ServiceDiscoveryFailure { reason } => {
                defmt::write!(fmt, "discovery failed: {}", reason)
            }
            Self::MalformedMessage => defmt::write!(fmt, "malformed message"),
            Self::SendFailure => defmt::write!(fmt, "send rejected"),
        }
    }
}
