//! Full connection lifecycle walked through the public API: scan, connect,
//! negotiate, exchange, drop, restart.

use crossguard_core::{
    constants::link::{BEACON_DEVICE_NAME, SCAN_TIMEOUT_MS, VIBRATE_START},
    motion::Quadrant,
    wire::OutboundCommand,
    ConnectionState, LinkCommand, LinkEvent, LinkError, PeripheralLink,
};

fn found(name: &str) -> LinkEvent {
    LinkEvent::DeviceFound {
        name: heapless::String::try_from(name).unwrap(),
    }
}

fn all_discovered() -> LinkEvent {
    LinkEvent::ServicesDiscovered {
        service: true,
        inbound: true,
        outbound: true,
    }
}

fn payload(bytes: &[u8]) -> LinkEvent {
    LinkEvent::InboundPayload {
        payload: heapless::Vec::from_slice(bytes).unwrap(),
    }
}

#[test]
fn lifecycle_scan_to_exchange() {
    let mut link = PeripheralLink::new();

    let step = link.start(0, true);
    assert_eq!(step.commands.as_slice(), &[LinkCommand::StartScan]);

    // Foreign advertisements do not interrupt the scan
    let step = link.handle(found("KitchenScale"));
    assert!(step.commands.is_empty());
    assert_eq!(link.state(), ConnectionState::Scanning);

    let step = link.handle(found(BEACON_DEVICE_NAME));
    assert_eq!(
        step.commands.as_slice(),
        &[LinkCommand::StopScan, LinkCommand::Connect]
    );

    link.handle(LinkEvent::Connected);
    link.handle(all_discovered());
    link.handle(LinkEvent::NotificationsEnabled);
    assert_eq!(link.state(), ConnectionState::Ready);
    assert_eq!(link.last_error(), None);

    // Inbound alert surfaces parsed; outbound write goes through
    let step = link.handle(payload(b"1,90"));
    let alert = step.alert.expect("alert expected");
    assert_eq!((alert.signal_state, alert.beacon_angle), (1, 90));

    let step = link.send(OutboundCommand::VibrationStart);
    assert!(matches!(
        step.commands[0],
        LinkCommand::WriteOutbound(ref frame) if frame.as_slice() == VIBRATE_START.as_bytes()
    ));

    let step = link.send(OutboundCommand::QuadrantReport(Quadrant::Q3));
    assert!(matches!(
        step.commands[0],
        LinkCommand::WriteOutbound(ref frame) if frame.as_slice() == [3u8]
    ));
}

#[test]
fn timeout_then_successful_restart() {
    let mut link = PeripheralLink::new();
    link.start(1_000, true);

    let step = link.poll(1_000 + SCAN_TIMEOUT_MS);
    assert_eq!(step.commands.as_slice(), &[LinkCommand::StopScan]);
    assert_eq!(link.state(), ConnectionState::Idle);
    assert_eq!(link.last_error(), Some(LinkError::ScanTimeout));

    // Restart clears the recorded error and arms a fresh deadline
    let step = link.start(20_000, true);
    assert_eq!(step.commands.as_slice(), &[LinkCommand::StartScan]);
    assert_eq!(link.last_error(), None);

    // The fresh deadline is relative to the restart, not the first scan
    assert!(link.poll(20_000 + SCAN_TIMEOUT_MS - 1).commands.is_empty());
    assert_eq!(link.state(), ConnectionState::Scanning);
}

#[test]
fn drop_mid_session_and_reconnect() {
    let mut link = PeripheralLink::new();
    link.start(0, true);
    link.handle(found(BEACON_DEVICE_NAME));
    link.handle(LinkEvent::Connected);
    link.handle(all_discovered());
    link.handle(LinkEvent::NotificationsEnabled);

    link.handle(LinkEvent::ConnectionLost);
    assert_eq!(link.state(), ConnectionState::Disconnected);

    // Sends are dropped while down
    let step = link.send(OutboundCommand::VibrationStop);
    assert!(step.commands.is_empty());
    assert_eq!(link.last_error(), Some(LinkError::SendFailure));

    // A full second pass works from Disconnected
    link.start(60_000, true);
    link.handle(found(BEACON_DEVICE_NAME));
    link.handle(LinkEvent::Connected);
    link.handle(all_discovered());
    link.handle(LinkEvent::NotificationsEnabled);
    assert_eq!(link.state(), ConnectionState::Ready);
}

#[test]
fn stale_events_after_teardown_are_ignored() {
    let mut link = PeripheralLink::new();
    link.start(0, true);
    link.handle(found(BEACON_DEVICE_NAME));
    link.handle(LinkEvent::Connected);
    link.disconnect();

    // Late callbacks from the torn-down attempt change nothing
    for stale in [
        LinkEvent::Connected,
        all_discovered(),
        LinkEvent::NotificationsEnabled,
        payload(b"1,90"),
    ] {
        let step = link.handle(stale);
        assert!(step.commands.is_empty());
        assert!(step.alert.is_none());
        assert_eq!(link.state(), ConnectionState::Disconnected);
    }
}
