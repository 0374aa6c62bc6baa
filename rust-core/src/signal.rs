//! Signal filtering, gravity separation and noise gating.
//!
//! This module holds the only mutable state in the engine:
//! - Gravity vector estimation using an incremental single-pole low-pass filter
//! - Linear acceleration (raw minus gravity) with sub-threshold noise zeroed
//! - Latest raw gyroscope reading, gated on query
//!
//! Design note: All updates are O(1) per sample. No history buffer, no
//! allocations in the hot path.
//!
//! Accelerometer and gyroscope samples arrive independently. Each update
//! touches only the quantities derived from its own sensor, and every query
//! reads whatever the most recent sample of each kind left behind.

use serde::{Deserialize, Serialize};

use crate::action::{classify_action, ActionCandidates, ActionPrecedence};
use crate::error::{Error, Result};
use crate::orientation::classify_orientation;
use crate::types::{ActionLabel, OrientationCode, SensorKind, SensorSample};

/// Weight of the previous gravity estimate in the low-pass filter.
pub const ALPHA: f32 = 0.8;

/// Magnitude below which a signal is treated as noise and zeroed.
pub const ACTION_THRESHOLD: f32 = 0.4;

/// Parameters for signal filtering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Low-pass filter coefficient for gravity estimation.
    /// Weight kept from the previous estimate: g = α*g + (1-α)*a.
    /// Range: [0.0, 1.0]. Higher = smoother, slower to follow tilt.
    pub alpha: f32,

    /// Noise gate for linear acceleration (m/s²) and rotation (rad/s).
    /// Components with magnitude strictly below this read as zero.
    pub action_threshold: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            action_threshold: ACTION_THRESHOLD,
        }
    }
}

impl FilterConfig {
    /// Check that the parameters describe a stable filter.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidConfig(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.action_threshold.is_finite() || self.action_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "action_threshold must be finite and non-negative, got {}",
                self.action_threshold
            )));
        }
        Ok(())
    }
}

/// Zero `value` when its magnitude is strictly below `threshold`.
#[inline]
pub fn noise_gate(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Apply [`noise_gate`] to each axis.
#[inline]
pub fn noise_gate_axes(values: [f32; 3], threshold: f32) -> [f32; 3] {
    values.map(|v| noise_gate(v, threshold))
}

/// State of the gravity estimation filter.
///
/// Starts at the origin and is moved only by [`GravityEstimator::update`].
#[derive(Debug, Clone)]
pub struct GravityEstimator {
    /// Current estimated gravity vector [x, y, z] in m/s².
    gravity: [f32; 3],

    alpha: f32,

    /// Number of samples processed.
    sample_count: u64,
}

impl GravityEstimator {
    /// Create a new gravity estimator at [0, 0, 0].
    pub fn new(alpha: f32) -> Self {
        Self {
            gravity: [0.0; 3],
            alpha,
            sample_count: 0,
        }
    }

    /// Update gravity estimate with a new accelerometer sample.
    ///
    /// g_new = α*g_old + (1-α)*a
    pub fn update(&mut self, accel: [f32; 3]) {
        let alpha = self.alpha;

        for (g, a) in self.gravity.iter_mut().zip(accel) {
            *g = alpha * *g + (1.0 - alpha) * a;
        }

        self.sample_count += 1;
    }

    /// Get the current gravity estimate.
    pub fn gravity(&self) -> [f32; 3] {
        self.gravity
    }

    /// Get the gravity magnitude in m/s².
    pub fn gravity_magnitude(&self) -> f32 {
        let [x, y, z] = self.gravity;
        (x * x + y * y + z * z).sqrt()
    }

    /// Get the number of samples processed.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Extract linear acceleration by removing gravity, gating each axis.
    pub fn extract_linear_accel(&self, measured_accel: [f32; 3], threshold: f32) -> [f32; 3] {
        [
            noise_gate(measured_accel[0] - self.gravity[0], threshold),
            noise_gate(measured_accel[1] - self.gravity[1], threshold),
            noise_gate(measured_accel[2] - self.gravity[2], threshold),
        ]
    }
}

/// Consistent view of every quantity the processor tracks.
///
/// Produced by [`SignalProcessor::state`]. All five vectors reflect the same
/// moment; no field is read half-way through an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FusionState {
    /// Latest raw accelerometer reading.
    pub accel: [f32; 3],
    /// Latest raw gyroscope reading.
    pub gyro: [f32; 3],
    /// Gravity-removed, noise-gated acceleration.
    pub linear_accel: [f32; 3],
    /// Noise-gated gyroscope reading.
    pub corrected_gyro: [f32; 3],
    /// Low-pass gravity estimate.
    pub gravity: [f32; 3],
}

/// Gravity separation, noise gating and classification over the latest samples.
///
/// This is the hot-path component. O(1) per sample, fixed memory.
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    gravity_estimator: GravityEstimator,
    accel: [f32; 3],
    gyro: [f32; 3],
    linear_accel: [f32; 3],
    gyro_count: u64,
    precedence: ActionPrecedence,
    config: FilterConfig,
}

impl SignalProcessor {
    /// Create a new signal processor with default configuration.
    pub fn new() -> Self {
        Self::build(FilterConfig::default(), ActionPrecedence::default())
    }

    /// Create a new signal processor with custom configuration.
    pub fn with_config(config: FilterConfig, precedence: ActionPrecedence) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, precedence))
    }

    fn build(config: FilterConfig, precedence: ActionPrecedence) -> Self {
        Self {
            gravity_estimator: GravityEstimator::new(config.alpha),
            accel: [0.0; 3],
            gyro: [0.0; 3],
            linear_accel: [0.0; 3],
            gyro_count: 0,
            precedence,
            config,
        }
    }

    /// Fold one sample into the state.
    ///
    /// Gyroscope samples replace the stored rotation. Accelerometer samples
    /// advance the gravity filter, derive linear acceleration from the new
    /// estimate and the new reading, then replace the stored acceleration.
    ///
    /// A sample with a non-finite component is rejected and leaves the state
    /// untouched.
    pub fn update(&mut self, sample: &SensorSample) -> Result<()> {
        if !sample.is_finite() {
            log::warn!(
                "Dropping non-finite {} sample {:?}",
                sample.kind,
                sample.values
            );
            return Err(Error::NonFiniteSample {
                kind: sample.kind,
                values: sample.values,
            });
        }

        match sample.kind {
            SensorKind::Gyroscope => {
                self.gyro = sample.values;
                self.gyro_count += 1;
            }
            SensorKind::Accelerometer => {
                self.gravity_estimator.update(sample.values);
                self.linear_accel = self
                    .gravity_estimator
                    .extract_linear_accel(sample.values, self.config.action_threshold);
                self.accel = sample.values;
            }
        }

        log::trace!(
            "{} sample {:?} -> linear {:?}",
            sample.kind,
            sample.values,
            self.linear_accel
        );
        Ok(())
    }

    /// Latest raw accelerometer reading.
    pub fn accel(&self) -> [f32; 3] {
        self.accel
    }

    /// Latest raw gyroscope reading.
    pub fn gyro(&self) -> [f32; 3] {
        self.gyro
    }

    /// Gravity-removed, noise-gated acceleration.
    pub fn linear_accel(&self) -> [f32; 3] {
        self.linear_accel
    }

    /// Current gravity estimate.
    pub fn gravity(&self) -> [f32; 3] {
        self.gravity_estimator.gravity()
    }

    /// Gyroscope reading with sub-threshold axes zeroed.
    pub fn corrected_gyro(&self) -> [f32; 3] {
        noise_gate_axes(self.gyro, self.config.action_threshold)
    }

    /// Orientation from the dominant axis of the raw accelerometer reading.
    pub fn orientation(&self) -> OrientationCode {
        classify_orientation(self.accel)
    }

    /// Both gesture rules evaluated independently.
    pub fn action_candidates(&self) -> ActionCandidates {
        ActionCandidates::evaluate(
            self.linear_accel,
            self.corrected_gyro(),
            self.config.action_threshold,
        )
    }

    /// Gesture label after applying the configured precedence.
    pub fn action(&self) -> ActionLabel {
        classify_action(
            self.linear_accel,
            self.corrected_gyro(),
            self.config.action_threshold,
            self.precedence,
        )
    }

    /// Snapshot of every tracked quantity.
    pub fn state(&self) -> FusionState {
        FusionState {
            accel: self.accel,
            gyro: self.gyro,
            linear_accel: self.linear_accel,
            corrected_gyro: self.corrected_gyro(),
            gravity: self.gravity(),
        }
    }

    /// Get the gravity estimator for diagnostics.
    pub fn gravity_estimator(&self) -> &GravityEstimator {
        &self.gravity_estimator
    }

    /// Number of accepted accelerometer samples.
    pub fn accel_count(&self) -> u64 {
        self.gravity_estimator.sample_count()
    }

    /// Number of accepted gyroscope samples.
    pub fn gyro_count(&self) -> u64 {
        self.gyro_count
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn precedence(&self) -> ActionPrecedence {
        self.precedence
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new()
    }
}
