//! Motion Classifier: Facing Quadrant and Step Events
//!
//! ## Overview
//!
//! Consumes smoothed orientation data and produces the two signals the
//! safety decision needs:
//!
//! 1. **Confirmed facing quadrant** - the heading collapsed into four
//!    90-degree bins, debounced with a consecutive-match hysteresis so that
//!    sensor noise near a bin boundary cannot flicker the value.
//! 2. **Step events** - threshold crossings of the smoothed acceleration
//!    magnitude, rate-limited to one per 300 ms, each carrying the *current*
//!    heading (not the confirmed quadrant) and an 8-sector direction label.
//!
//! ## Quadrant Bins
//!
//! ```text
//!        [315,360) + [0,45)
//!              Q4 (north)
//!    Q3 (west)        Q1 (east)
//!    [225,315)        [45,135)
//!              Q2 (south)
//!              [135,225)
//! ```
//!
//! ## Why Hysteresis
//!
//! The instantaneous classification changes on every sample. A user standing
//! still at 44.9 degrees would oscillate Q4/Q1 with every breath of noise and
//! drive the actuator decision with it. The hysteresis counter only commits a
//! quadrant after five identical classifications in a row; shorter runs never
//! surface.
//!
//! ## Direction Labels
//!
//! Step events carry one of eight compass labels with deliberately uneven
//! widths: the cardinal sectors span 60 degrees centered on 0/90/180/270 and
//! the intercardinals fill the remaining 30-degree gaps. Ambiguous headings
//! therefore bias toward the cardinal names, which reads steadier on a
//! display.

use crate::{
    constants::motion::{HYSTERESIS_THRESHOLD, STEP_MAGNITUDE_THRESHOLD, STEP_MIN_INTERVAL_MS},
    events::{SensorKind, Vec3},
    orientation::OrientationFilter,
    time::{elapsed_ms, Timestamp},
};

/// Facing-direction bin, used for both the pedestrian and the beacon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Quadrant {
    /// East, heading in [45, 135)
    Q1 = 1,
    /// South, heading in [135, 225)
    Q2 = 2,
    /// West, heading in [225, 315)
    Q3 = 3,
    /// North, heading in [315, 360) or [0, 45)
    Q4 = 4,
}

impl Quadrant {
    /// Classify a heading angle in degrees; total over all inputs
    pub fn from_angle(angle: f32) -> Self {
        if (45.0..135.0).contains(&angle) {
            Quadrant::Q1
        } else if (135.0..225.0).contains(&angle) {
            Quadrant::Q2
        } else if (225.0..315.0).contains(&angle) {
            Quadrant::Q3
        } else {
            Quadrant::Q4
        }
    }

    /// Wire encoding: a single byte with value 1-4
    pub const fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Eight-sector compass label for step events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassSector {
    /// [330, 360) and [0, 30)
    North,
    /// [30, 60)
    Northeast,
    /// [60, 120)
    East,
    /// [120, 150)
    Southeast,
    /// [150, 210)
    South,
    /// [210, 240)
    Southwest,
    /// [240, 300)
    West,
    /// [300, 330)
    Northwest,
}

impl CompassSector {
    /// Map a heading angle to its sector. Cardinal sectors are 60 degrees
    /// wide, intercardinals 30; out-of-range input falls back to North.
    pub fn from_angle(angle: f32) -> Self {
        match angle {
            a if (330.0..360.0).contains(&a) || (0.0..30.0).contains(&a) => CompassSector::North,
            a if (30.0..60.0).contains(&a) => CompassSector::Northeast,
            a if (60.0..120.0).contains(&a) => CompassSector::East,
            a if (120.0..150.0).contains(&a) => CompassSector::Southeast,
            a if (150.0..210.0).contains(&a) => CompassSector::South,
            a if (210.0..240.0).contains(&a) => CompassSector::Southwest,
            a if (240.0..300.0).contains(&a) => CompassSector::West,
            a if (300.0..330.0).contains(&a) => CompassSector::Northwest,
            _ => CompassSector::North,
        }
    }

    /// Human-readable label
    pub const fn name(&self) -> &'static str {
        match self {
            CompassSector::North => "north",
            CompassSector::Northeast => "northeast",
            CompassSector::East => "east",
            CompassSector::Southeast => "southeast",
            CompassSector::South => "south",
            CompassSector::Southwest => "southwest",
            CompassSector::West => "west",
            CompassSector::Northwest => "northwest",
        }
    }
}

/// Emitted once per detected step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Heading at the moment of the step, degrees in [0, 360)
    pub heading_deg: f32,
    /// Direction label for display
    pub sector: CompassSector,
    /// When the step was counted
    pub timestamp: Timestamp,
}

/// Candidate quadrant with its consecutive-match count
#[derive(Debug, Clone, Copy, Default)]
struct HysteresisCounter {
    candidate: Option<Quadrant>,
    count: u8,
}

impl HysteresisCounter {
    /// Feed one instantaneous classification; returns the quadrant to
    /// commit once the candidate has matched `HYSTERESIS_THRESHOLD` times.
    fn observe(&mut self, instantaneous: Quadrant) -> Option<Quadrant> {
        if self.candidate == Some(instantaneous) {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = Some(instantaneous);
            self.count = 1;
        }

        (self.count >= HYSTERESIS_THRESHOLD).then_some(instantaneous)
    }
}

/// Facing-quadrant and step-event classifier over the orientation filter
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    filter: OrientationFilter,
    heading_deg: Option<f32>,
    confirmed: Quadrant,
    hysteresis: HysteresisCounter,
    last_step: Option<Timestamp>,
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionClassifier {
    /// Create a classifier with no sensor data yet
    pub const fn new() -> Self {
        Self {
            filter: OrientationFilter::new(),
            heading_deg: None,
            // Unknown-safe default before any data has arrived
            confirmed: Quadrant::Q4,
            hysteresis: HysteresisCounter {
                candidate: None,
                count: 0,
            },
            last_step: None,
        }
    }

    /// Feed one raw sample; returns a step event when one is detected
    pub fn ingest(&mut self, kind: SensorKind, sample: Vec3, now: Timestamp) -> Option<StepEvent> {
        self.filter.ingest(kind, sample);

        // Heading and quadrant update whenever either smoothed vector moved;
        // a degenerate reading keeps the last known values.
        if let Some(heading) = self.filter.heading_deg() {
            self.heading_deg = Some(heading);
            if let Some(confirmed) = self.hysteresis.observe(Quadrant::from_angle(heading)) {
                self.confirmed = confirmed;
            }
        }

        match kind {
            SensorKind::Accelerometer => self.detect_step(now),
            SensorKind::Magnetometer => None,
        }
    }

    /// Last confirmed quadrant; `Q4` (unknown-safe) before any commitment
    pub fn current_quadrant(&self) -> Quadrant {
        self.confirmed
    }

    /// Most recent heading, `None` until both sensors have reported
    pub fn heading_deg(&self) -> Option<f32> {
        self.heading_deg
    }

    fn detect_step(&mut self, now: Timestamp) -> Option<StepEvent> {
        let gravity = self.filter.smoothed_gravity()?;
        if gravity.magnitude() <= STEP_MAGNITUDE_THRESHOLD {
            return None;
        }

        if let Some(last) = self.last_step {
            if elapsed_ms(last, now) < STEP_MIN_INTERVAL_MS {
                return None;
            }
        }

        let heading = self.heading_deg?;
        self.last_step = Some(now);

        Some(StepEvent {
            heading_deg: heading,
            sector: CompassSector::from_angle(heading),
            timestamp: now,
        })
    }
}
