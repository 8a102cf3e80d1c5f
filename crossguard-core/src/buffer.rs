//! Fixed-Size Smoothing Window for Sensor Samples
//!
//! ## Overview
//!
//! A bounded FIFO of the most recent 3-axis samples of one sensor kind,
//! sized at compile time through a const generic. When full, pushing a new
//! sample evicts the oldest; the window's output is the arithmetic mean of
//! whatever it currently holds. This is the moving-average filter that feeds
//! the orientation math: raw handheld accelerometer and magnetometer streams
//! are far too jittery to classify directly.
//!
//! ## Design Rationale
//!
//! Automatic eviction (rather than an error on overflow) matches the use
//! case: recent samples are strictly more valuable than old ones. The mean
//! is recomputed from the stored samples on demand instead of keeping a
//! running sum, avoiding drift from repeated float add/subtract over a long
//! session. With the default window of 10 the recompute is ten additions.
//!
//! Memory is a fixed `N * 12` bytes plus two indices; nothing allocates.

use crate::events::Vec3;

/// Bounded FIFO of recent samples with an arithmetic-mean output
///
/// Invariants: `len <= N`, `write_pos < N`, and iteration order is
/// oldest-first. Not thread-safe; owned by the control thread.
#[derive(Debug, Clone)]
pub struct SmoothingWindow<const N: usize> {
    samples: [Vec3; N],
    write_pos: usize,
    len: usize,
}

impl<const N: usize> SmoothingWindow<N> {
    /// Create an empty window
    pub const fn new() -> Self {
        Self {
            samples: [Vec3::new(0.0, 0.0, 0.0); N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Append a sample, evicting the oldest when full
    pub fn push(&mut self, sample: Vec3) {
        self.samples[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no sample has been ingested yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the window holds `N` samples
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Arithmetic mean of the contained samples, `None` while empty
    pub fn mean(&self) -> Option<Vec3> {
        if self.len == 0 {
            return None;
        }

        let mut sum = Vec3::default();
        for sample in &self.samples[..self.len.min(N)] {
            sum.x += sample.x;
            sum.y += sample.y;
            sum.z += sample.z;
        }
        // When full, every slot is live regardless of write_pos, so the
        // slice above covers exactly the stored samples either way.
        Some(sum.scaled(1.0 / self.len as f32))
    }
}

impl<const N: usize> Default for SmoothingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_has_no_mean() {
        let window: SmoothingWindow<10> = SmoothingWindow::new();
        assert!(window.is_empty());
        assert!(window.mean().is_none());
    }

    #[test]
    fn mean_of_partial_window() {
        let mut window: SmoothingWindow<10> = SmoothingWindow::new();
        window.push(Vec3::new(1.0, 0.0, 0.0));
        window.push(Vec3::new(3.0, 2.0, 0.0));

        let mean = window.mean().unwrap();
        assert_eq!(mean, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut window: SmoothingWindow<3> = SmoothingWindow::new();
        for i in 0..5 {
            window.push(Vec3::new(i as f32, 0.0, 0.0));
        }

        assert!(window.is_full());
        assert_eq!(window.len(), 3);
        // Holds 2, 3, 4 after the first two were evicted
        assert_eq!(window.mean().unwrap().x, 3.0);
    }

    #[test]
    fn clear_resets() {
        let mut window: SmoothingWindow<3> = SmoothingWindow::new();
        window.push(Vec3::new(1.0, 1.0, 1.0));
        window.clear();
        assert!(window.is_empty());
        assert!(window.mean().is_none());
    }
}
