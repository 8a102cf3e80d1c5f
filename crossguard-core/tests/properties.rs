//! Property-based checks of the classifier, parser and status packing.

use proptest::prelude::*;

use crossguard_core::{
    constants::motion::{HYSTERESIS_THRESHOLD, STEP_MIN_INTERVAL_MS},
    link::ConnectionState,
    motion::{CompassSector, Quadrant},
    orientation::heading_from_vectors,
    status::{StatusCell, StatusSnapshot},
    wire::parse_alert,
    MotionClassifier, SensorKind, Vec3,
};

const GRAVITY: Vec3 = Vec3::new(0.0, 0.0, 9.81);
const HEEL_STRIKE: Vec3 = Vec3::new(0.0, 0.0, 14.0);

/// Field vector giving a flat device the heading `deg`
fn field_for_heading(deg: f32) -> Vec3 {
    let rad = deg.to_radians();
    Vec3::new(-22.0 * rad.sin(), 22.0 * rad.cos(), -40.0)
}

proptest! {
    /// Every successfully computed heading is already normalized.
    #[test]
    fn heading_is_normalized(
        gx in -20.0f32..20.0, gy in -20.0f32..20.0, gz in -20.0f32..20.0,
        mx in -60.0f32..60.0, my in -60.0f32..60.0, mz in -60.0f32..60.0,
    ) {
        if let Some(heading) = heading_from_vectors(
            &Vec3::new(gx, gy, gz),
            &Vec3::new(mx, my, mz),
        ) {
            prop_assert!((0.0..360.0).contains(&heading));
        }
    }

    /// The synthetic field reproduces its heading, and classification is
    /// total: every heading lands in exactly one quadrant and one sector.
    #[test]
    fn classification_is_total(deg in 0.0f32..360.0) {
        let heading = heading_from_vectors(&GRAVITY, &field_for_heading(deg))
            .expect("non-degenerate by construction");
        prop_assert!((heading - deg).abs() < 0.1 || (heading - deg).abs() > 359.9);

        let quadrant = Quadrant::from_angle(heading);
        prop_assert!((1..=4).contains(&quadrant.to_byte()));
        prop_assert!(!CompassSector::from_angle(heading).name().is_empty());
    }

    /// A run of identical classifications commits only at the threshold;
    /// anything shorter leaves the unknown-safe default in place.
    #[test]
    fn quadrant_commits_only_after_full_run(
        deg in 0.0f32..360.0,
        run in 0usize..12,
    ) {
        // Angles near a bin boundary can smooth across it; stay clear
        let near_boundary = [0.0f32, 45.0, 135.0, 225.0, 315.0, 360.0]
            .iter()
            .any(|b| (deg - b).abs() < 1.0);
        prop_assume!(!near_boundary);

        let mut classifier = MotionClassifier::new();
        classifier.ingest(SensorKind::Accelerometer, GRAVITY, 0);
        for _ in 0..run {
            classifier.ingest(SensorKind::Magnetometer, field_for_heading(deg), 0);
        }

        let expected = if run >= HYSTERESIS_THRESHOLD as usize {
            Quadrant::from_angle(deg)
        } else {
            Quadrant::Q4
        };
        prop_assert_eq!(classifier.current_quadrant(), expected);
    }

    /// No two counted steps are ever closer than the refractory interval,
    /// whatever the spike timing looks like.
    #[test]
    fn steps_respect_min_interval(mut gaps in prop::collection::vec(0u64..1_000, 1..40)) {
        let mut classifier = MotionClassifier::new();
        classifier.ingest(SensorKind::Accelerometer, GRAVITY, 0);
        for _ in 0..HYSTERESIS_THRESHOLD {
            classifier.ingest(SensorKind::Magnetometer, field_for_heading(180.0), 0);
        }

        let mut now = 1_000u64;
        let mut step_times: Vec<u64> = Vec::new();
        for gap in gaps.drain(..) {
            now += gap;
            if let Some(step) = classifier.ingest(SensorKind::Accelerometer, HEEL_STRIKE, now) {
                step_times.push(step.timestamp);
            }
        }

        for pair in step_times.windows(2) {
            prop_assert!(pair[1] - pair[0] >= STEP_MIN_INTERVAL_MS);
        }
    }

    /// The payload parser never panics and accepts exactly the two-field
    /// comma form.
    #[test]
    fn parser_never_panics(payload in prop::collection::vec(any::<u8>(), 0..16)) {
        let _ = parse_alert(&payload);
    }

    /// Well-formed payloads round-trip their two integers.
    #[test]
    fn parser_accepts_two_integers(state in -999i32..999, angle in -999i32..999) {
        let text = format!("{state},{angle}");
        let alert = parse_alert(text.as_bytes()).expect("well-formed");
        prop_assert_eq!(alert.signal_state, state);
        prop_assert_eq!(alert.beacon_angle, angle);
    }

    /// The packed status word reproduces every field on load.
    #[test]
    fn status_snapshot_round_trips(steps in any::<u16>(), q in 1u8..=4, c in 0u8..=5, o in 0u8..=2) {
        let snapshot = StatusSnapshot {
            quadrant: match q {
                1 => Quadrant::Q1,
                2 => Quadrant::Q2,
                3 => Quadrant::Q3,
                _ => Quadrant::Q4,
            },
            connection: match c {
                1 => ConnectionState::Scanning,
                2 => ConnectionState::Connecting,
                3 => ConnectionState::DiscoveringServices,
                4 => ConnectionState::Ready,
                5 => ConnectionState::Disconnected,
                _ => ConnectionState::Idle,
            },
            last_outcome: match o {
                1 => crossguard_core::decision::AlertOutcome::VibrationStarted,
                2 => crossguard_core::decision::AlertOutcome::VibrationStopped,
                _ => crossguard_core::decision::AlertOutcome::None,
            },
            steps,
        };

        let cell = StatusCell::new();
        cell.publish(snapshot);
        prop_assert_eq!(cell.load(), snapshot);
    }
}
