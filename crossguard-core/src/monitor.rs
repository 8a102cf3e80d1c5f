//! Safety Monitor: Single-Threaded Event Dispatcher
//!
//! ## Overview
//!
//! Owns every mutable component - motion classifier, peripheral link,
//! decision engine, geofence monitor - and is the only place their state
//! changes. The host funnels all of its callbacks (sensor samples, radio
//! events, position fixes, periodic ticks) into [`SafetyMonitor::dispatch`]
//! as [`Event`]s, consumed strictly in arrival order on one thread. Other
//! threads observe progress only through the atomic status snapshot.
//!
//! ## Event Routing
//!
//! ```text
//! Event::SensorSample ──> MotionClassifier ──> step count, quadrant
//! Event::Link ──────────> PeripheralLink ───> alert? ──> SafetyDecisionEngine
//! Event::Position ──────> GeofenceMonitor ──> Notifier + TrackSink
//! Event::Tick ──────────> scan timeout, periodic position report
//! ```
//!
//! Every dispatch returns the radio commands it produced and republishes
//! the status snapshot, so readers never see a half-applied transition.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::{
    constants::geofence::POSITION_REPORT_INTERVAL_MS,
    decision::{AlertOutcome, SafetyDecisionEngine},
    events::Event,
    geofence::{GeofenceMonitor, PositionFix, SafeZone},
    link::{LinkCommand, LinkStep, PeripheralLink},
    motion::MotionClassifier,
    status::{StatusCell, StatusSnapshot},
    time::Timestamp,
    traits::{Notifier, TrackKind, TrackPoint, TrackSink, ZoneStore},
    wire::OutboundCommand,
};

/// Most commands one dispatch can produce (alert: two beacon writes;
/// lifecycle transitions top out at two)
pub const MAX_DISPATCH_COMMANDS: usize = 4;

/// Commands emitted by one dispatch, for the host radio to execute in order
pub type DispatchCommands = Vec<LinkCommand, MAX_DISPATCH_COMMANDS>;

/// The top-level engine: one instance, one control thread
pub struct SafetyMonitor<N: Notifier, S: TrackSink, Z: ZoneStore> {
    classifier: MotionClassifier,
    link: PeripheralLink,
    decision: SafetyDecisionEngine,
    geofence: GeofenceMonitor,
    status: StatusCell,
    notifier: N,
    sink: S,
    store: Z,
    steps: u16,
    last_outcome: AlertOutcome,
    last_fix: Option<PositionFix>,
    report_deadline: Option<Timestamp>,
}

impl<N: Notifier, S: TrackSink, Z: ZoneStore> SafetyMonitor<N, S, Z> {
    /// Build the monitor, restoring the safe zone from the store if one
    /// was previously saved
    pub fn new(notifier: N, sink: S, store: Z) -> Self {
        let geofence = match store.load() {
            Some((lat, lon)) => GeofenceMonitor::with_zone(SafeZone::around(lat, lon)),
            None => GeofenceMonitor::new(),
        };

        Self {
            classifier: MotionClassifier::new(),
            link: PeripheralLink::new(),
            decision: SafetyDecisionEngine::new(),
            geofence,
            status: StatusCell::new(),
            notifier,
            sink,
            store,
            steps: 0,
            last_outcome: AlertOutcome::None,
            last_fix: None,
            report_deadline: None,
        }
    }

    /// Read-side handle for observer threads
    pub fn status(&self) -> &StatusCell {
        &self.status
    }

    /// The current snapshot, for same-thread convenience
    pub fn snapshot(&self) -> StatusSnapshot {
        self.status.load()
    }

    /// Steps counted since the session began
    pub fn steps(&self) -> u16 {
        self.steps
    }

    /// The notification collaborator
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The track-point collaborator
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The zone-store collaborator
    pub fn store(&self) -> &Z {
        &self.store
    }

    /// Save a new safe-zone center and start monitoring against it
    pub fn save_zone(&mut self, lat: f64, lon: f64) {
        self.store.save(lat, lon);
        self.geofence.set_zone(SafeZone::around(lat, lon));
        log_info!("safe zone saved at ({}, {})", lat, lon);
    }

    /// Begin a monitoring session: reset the step counter, schedule the
    /// periodic position report and start scanning for the beacon
    pub fn begin_session(&mut self, now: Timestamp, radio_enabled: bool) -> DispatchCommands {
        self.steps = 0;
        self.last_outcome = AlertOutcome::None;
        self.report_deadline = Some(now + POSITION_REPORT_INTERVAL_MS);

        let step = self.link.start(now, radio_enabled);
        self.finish(step)
    }

    /// End the session: tell the beacon to stop vibrating, then tear the
    /// link down. Safe to call however far the link actually got.
    pub fn end_session(&mut self) -> DispatchCommands {
        self.report_deadline = None;

        // The stop write only goes out if the link is Ready; otherwise the
        // beacon was never told to vibrate in the first place
        let mut commands = DispatchCommands::new();
        extend(
            &mut commands,
            self.link.send(OutboundCommand::VibrationStop),
        );
        extend(&mut commands, self.link.disconnect());

        self.publish();
        commands
    }

    /// Consume one event and return the radio commands it produced
    pub fn dispatch(&mut self, event: Event) -> DispatchCommands {
        match event {
            Event::SensorSample {
                kind,
                sample,
                timestamp,
            } => {
                if self.classifier.ingest(kind, sample, timestamp).is_some() {
                    self.steps = self.steps.saturating_add(1);
                }
                self.finish(LinkStep::none())
            }

            Event::Link { event, .. } => {
                let step = self.link.handle(event);
                self.on_link_step(step)
            }

            Event::Position(fix) => {
                self.on_position(fix);
                self.finish(LinkStep::none())
            }

            Event::Tick { timestamp } => {
                let step = self.link.poll(timestamp);
                self.maybe_report_position(timestamp);
                self.finish(step)
            }
        }
    }

    /// Route a link transition: execute its commands and, if it surfaced a
    /// beacon alert, run the decision engine and send its verdict back
    fn on_link_step(&mut self, step: LinkStep) -> DispatchCommands {
        let mut commands = DispatchCommands::new();
        let alert = step.alert;
        extend(&mut commands, step);

        if let Some(alert) = alert {
            let quadrant = self.classifier.current_quadrant();
            let (outcome, outbound) = self.decision.on_alert(alert, quadrant);
            self.last_outcome = outcome;

            for cmd in outbound {
                extend(&mut commands, self.link.send(cmd));
            }
        }

        self.publish();
        commands
    }

    /// Check a fix against the geofence and append it to the track
    fn on_position(&mut self, fix: PositionFix) {
        if let Some(event) = self.geofence.check(fix) {
            let mut text: String<96> = String::new();
            let _ = write!(
                text,
                "Safe zone exit: {:.0} m from center ({:.5}, {:.5})",
                event.distance_m, fix.lat, fix.lon
            );
            self.notifier.notify(&text);

            self.sink.record(TrackPoint {
                lat: fix.lat,
                lon: fix.lon,
                timestamp: fix.timestamp,
                kind: TrackKind::GeofenceExit,
            });
            log_warn!("geofence exit at {} m", event.distance_m as i64);
        }

        self.sink.record(TrackPoint {
            lat: fix.lat,
            lon: fix.lon,
            timestamp: fix.timestamp,
            kind: TrackKind::Track,
        });
        self.last_fix = Some(fix);
    }

    /// Send the periodic position report once its deadline passes. Needs a
    /// fix to report; without one the deadline stays armed.
    fn maybe_report_position(&mut self, now: Timestamp) {
        let due = matches!(self.report_deadline, Some(deadline) if now >= deadline);
        if !due {
            return;
        }

        if let Some(fix) = self.last_fix {
            let mut text: String<96> = String::new();
            let _ = write!(
                text,
                "Position report: ({:.5}, {:.5}), {} steps",
                fix.lat, fix.lon, self.steps
            );
            self.notifier.notify(&text);
            self.report_deadline = Some(now + POSITION_REPORT_INTERVAL_MS);
        }
    }

    fn finish(&mut self, step: LinkStep) -> DispatchCommands {
        let mut commands = DispatchCommands::new();
        extend(&mut commands, step);
        self.publish();
        commands
    }

    fn publish(&self) {
        self.status.publish(StatusSnapshot {
            quadrant: self.classifier.current_quadrant(),
            connection: self.link.state(),
            last_outcome: self.last_outcome,
            steps: self.steps,
        });
    }
}

fn extend(commands: &mut DispatchCommands, step: LinkStep) {
    for cmd in step.commands {
        // Capacity covers the largest transition; a full vec would mean a
        // dispatch produced more commands than any path can
        let _ = commands.push(cmd);
    }
}
