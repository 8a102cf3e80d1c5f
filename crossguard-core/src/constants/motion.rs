//! Motion-Processing Constants
//!
//! Tuning values for the orientation filter, the quadrant hysteresis and the
//! step detector. These were calibrated against handheld use at a typical
//! walking pace; change them together, not in isolation.

// ===== SMOOTHING =====

/// Samples per sensor kind in the moving-average window.
///
/// Ten samples at the nominal UI-rate delivery (~15 Hz) covers roughly
/// two thirds of a second, enough to suppress hand tremor without making
/// the compass feel laggy.
pub const SMOOTHING_WINDOW: usize = 10;

/// Squared free-fall cutoff for the smoothed gravity vector (m/s²)².
///
/// Below 1% of g² the accelerometer carries no usable "down" reference
/// and heading derivation is withheld. Matches the host platform's
/// rotation-matrix guard.
pub const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * 9.81 * 9.81;

/// Minimum norm of the horizontal field vector H = E x A.
///
/// When gravity and the magnetic field are near-parallel the cross
/// product degenerates and the heading is meaningless.
pub const MIN_HORIZONTAL_NORM: f32 = 0.1;

// ===== QUADRANT HYSTERESIS =====

/// Consecutive matching classifications before a quadrant is confirmed.
///
/// Debounces boundary oscillation from sensor noise. Without it a user
/// standing still near a bin edge would flicker quadrants every sample
/// and destabilize the downstream safety decision.
pub const HYSTERESIS_THRESHOLD: u8 = 5;

// ===== STEP DETECTION =====

/// Smoothed acceleration magnitude that counts as a step (sensor units).
///
/// Just above 1 g so that resting never triggers; heel strikes at a
/// walking pace comfortably exceed it.
pub const STEP_MAGNITUDE_THRESHOLD: f32 = 10.5;

/// Minimum interval between counted steps (milliseconds).
///
/// 300 ms caps the cadence at ~3.3 steps/s, filtering the double peaks a
/// single heel strike produces in the smoothed magnitude.
pub const STEP_MIN_INTERVAL_MS: u64 = 300;
