//! Orientation Filter and Tilt-Compensated Heading
//!
//! ## Overview
//!
//! Smooths the raw accelerometer and magnetometer streams through one
//! [`SmoothingWindow`] per sensor kind and derives a compass heading from
//! the two smoothed vectors. The derivation is the standard tilt-compensated
//! construction: build an orthonormal device-to-world rotation from gravity
//! and the geomagnetic field, then read the azimuth out of it.
//!
//! ```text
//! A = smoothed gravity        E = smoothed geomagnetic field
//! H = E x A                   (horizontal east vector)
//! M = Â x Ĥ                   (horizontal north vector)
//! heading = atan2(H.y, M.y)   normalized to [0, 360) degrees
//! ```
//!
//! ## Failure Semantics
//!
//! There are none, by contract: absent or degenerate sensor data simply
//! withholds the heading. [`OrientationFilter::heading_deg`] returns `None`
//! while either window is empty, while the device is in free fall (gravity
//! norm below 1% of g²), or when gravity and the field are near-parallel
//! (|H| too small). Consumers keep their last known value.

use crate::{
    buffer::SmoothingWindow,
    constants::motion::{FREE_FALL_GRAVITY_SQUARED, MIN_HORIZONTAL_NORM, SMOOTHING_WINDOW},
    events::{SensorKind, Vec3},
};

/// Moving-average filter over both motion sensors plus heading derivation
#[derive(Debug, Clone, Default)]
pub struct OrientationFilter {
    accel: SmoothingWindow<SMOOTHING_WINDOW>,
    mag: SmoothingWindow<SMOOTHING_WINDOW>,
}

impl OrientationFilter {
    /// Create an empty filter
    pub const fn new() -> Self {
        Self {
            accel: SmoothingWindow::new(),
            mag: SmoothingWindow::new(),
        }
    }

    /// Ingest one raw sample into the window for its sensor kind
    pub fn ingest(&mut self, kind: SensorKind, sample: Vec3) {
        match kind {
            SensorKind::Accelerometer => self.accel.push(sample),
            SensorKind::Magnetometer => self.mag.push(sample),
        }
    }

    /// Smoothed gravity vector, `None` before the first accelerometer sample
    pub fn smoothed_gravity(&self) -> Option<Vec3> {
        self.accel.mean()
    }

    /// Smoothed geomagnetic vector, `None` before the first magnetometer sample
    pub fn smoothed_field(&self) -> Option<Vec3> {
        self.mag.mean()
    }

    /// Tilt-compensated compass heading in degrees, in `[0, 360)`
    ///
    /// Requires both smoothed vectors; degenerate geometry withholds the
    /// value rather than producing garbage.
    pub fn heading_deg(&self) -> Option<f32> {
        let gravity = self.accel.mean()?;
        let field = self.mag.mean()?;

        heading_from_vectors(&gravity, &field)
    }
}

/// Heading from explicit gravity/field vectors; `None` on degenerate input
pub fn heading_from_vectors(gravity: &Vec3, field: &Vec3) -> Option<f32> {
    // No usable "down" reference while falling
    if gravity.magnitude_squared() < FREE_FALL_GRAVITY_SQUARED {
        return None;
    }

    // Horizontal east vector; degenerates when the field is parallel to gravity
    let h = field.cross(gravity);
    let h_norm = h.magnitude();
    if h_norm < MIN_HORIZONTAL_NORM {
        return None;
    }

    let h = h.scaled(1.0 / h_norm);
    let a = gravity.scaled(1.0 / gravity.magnitude());
    let m = a.cross(&h);

    let azimuth_rad = libm::atan2f(h.y, m.y);
    let azimuth_deg = azimuth_rad * 180.0 / core::f32::consts::PI;

    // Shift (-180, 180] into [0, 360)
    Some((azimuth_deg + 360.0) % 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: Vec3 = Vec3::new(0.0, 0.0, 9.81);

    fn assert_close(actual: f32, expected: f32) {
        let diff = (actual - expected).abs();
        let diff = diff.min(360.0 - diff); // wrap-around distance
        assert!(diff < 0.5, "heading {actual} not near {expected}");
    }

    #[test]
    fn withholds_heading_without_data() {
        let mut filter = OrientationFilter::new();
        assert!(filter.heading_deg().is_none());

        filter.ingest(SensorKind::Accelerometer, GRAVITY);
        assert!(filter.heading_deg().is_none());
    }

    #[test]
    fn flat_device_facing_north() {
        // Device flat, field pointing north with a downward dip
        let mut filter = OrientationFilter::new();
        filter.ingest(SensorKind::Accelerometer, GRAVITY);
        filter.ingest(SensorKind::Magnetometer, Vec3::new(0.0, 22.0, -40.0));

        assert_close(filter.heading_deg().unwrap(), 0.0);
    }

    #[test]
    fn flat_device_facing_east() {
        // Field arrives along -x when the device's y axis points east
        let mut filter = OrientationFilter::new();
        filter.ingest(SensorKind::Accelerometer, GRAVITY);
        filter.ingest(SensorKind::Magnetometer, Vec3::new(-22.0, 0.0, -40.0));

        assert_close(filter.heading_deg().unwrap(), 90.0);
    }

    #[test]
    fn free_fall_withholds_heading() {
        let gravity = Vec3::new(0.0, 0.0, 0.05);
        let field = Vec3::new(0.0, 22.0, -40.0);
        assert!(heading_from_vectors(&gravity, &field).is_none());
    }

    #[test]
    fn parallel_vectors_withhold_heading() {
        let field = Vec3::new(0.0, 0.0, 30.0); // parallel to gravity
        assert!(heading_from_vectors(&GRAVITY, &field).is_none());
    }

    #[test]
    fn heading_always_normalized() {
        for deg in 0..360 {
            let rad = (deg as f32).to_radians();
            // Field rotated around the vertical axis
            let field = Vec3::new(-22.0 * libm::sinf(rad), 22.0 * libm::cosf(rad), -40.0);
            let heading = heading_from_vectors(&GRAVITY, &field).unwrap();
            assert!((0.0..360.0).contains(&heading));
            assert_close(heading, deg as f32);
        }
    }
}
