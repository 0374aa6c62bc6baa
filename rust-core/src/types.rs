//! Core data types for the gesture sensing engine.
//!
//! This module defines the sample contract delivered by the platform and the
//! symbolic labels produced by the classifiers. Vectors are plain `[f32; 3]`
//! arrays indexed 0=X, 1=Y, 2=Z throughout the crate.
//!
//! Design principle: if a concept exists, it gets a type. The source of a
//! reading is a `SensorKind`, never an index into a shared matrix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Index of the X axis.
pub const AXIS_X: usize = 0;
/// Index of the Y axis.
pub const AXIS_Y: usize = 1;
/// Index of the Z axis.
pub const AXIS_Z: usize = 2;

/// Hardware source of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Accelerometer reading in m/s², gravity included.
    Accelerometer,
    /// Gyroscope reading in rad/s.
    Gyroscope,
}

impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accel" | "accelerometer" => Ok(SensorKind::Accelerometer),
            "gyro" | "gyroscope" => Ok(SensorKind::Gyroscope),
            other => Err(Error::UnknownSensorKind(other.to_string())),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Accelerometer => write!(f, "accelerometer"),
            SensorKind::Gyroscope => write!(f, "gyroscope"),
        }
    }
}

/// A single raw reading from one sensor.
///
/// Samples are transient: the processor copies what it needs and drops the
/// rest. The timestamp is carried for logging and replay only; no derived
/// quantity depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Which sensor produced the reading.
    pub kind: SensorKind,
    /// Reading [x, y, z].
    pub values: [f32; 3],
    /// Optional monotonic timestamp in milliseconds.
    pub timestamp_ms: Option<u64>,
}

impl SensorSample {
    /// Creates an untimestamped sample.
    pub fn new(kind: SensorKind, values: [f32; 3]) -> Self {
        Self {
            kind,
            values,
            timestamp_ms: None,
        }
    }

    /// Creates an accelerometer sample.
    pub fn accel(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Accelerometer, [x, y, z])
    }

    /// Creates a gyroscope sample.
    pub fn gyro(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Gyroscope, [x, y, z])
    }

    /// Attaches a timestamp.
    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Discrete device orientation derived from the dominant accelerometer axis.
///
/// The integer codes match the ones reported over the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrientationCode {
    /// X dominant and positive: landscape with the front camera on the left.
    NormalLandscape,
    /// X dominant and not positive.
    ReverseLandscape,
    /// Y dominant and positive: upright portrait.
    NormalPortrait,
    /// Y dominant and not positive: upside down.
    ReversePortrait,
    /// Z dominant (or tied) and positive: lying flat, screen up.
    FaceUp,
    /// Z dominant (or tied) and not positive: lying flat, screen down.
    FaceDown,
}

impl OrientationCode {
    /// Numeric code in 1..=6.
    pub fn code(self) -> i32 {
        match self {
            OrientationCode::NormalLandscape => 1,
            OrientationCode::ReverseLandscape => 2,
            OrientationCode::NormalPortrait => 3,
            OrientationCode::ReversePortrait => 4,
            OrientationCode::FaceUp => 5,
            OrientationCode::FaceDown => 6,
        }
    }

    /// Inverse of [`OrientationCode::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrientationCode::NormalLandscape),
            2 => Some(OrientationCode::ReverseLandscape),
            3 => Some(OrientationCode::NormalPortrait),
            4 => Some(OrientationCode::ReversePortrait),
            5 => Some(OrientationCode::FaceUp),
            6 => Some(OrientationCode::FaceDown),
            _ => None,
        }
    }
}

impl fmt::Display for OrientationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OrientationCode::NormalLandscape => "Normal landscape",
            OrientationCode::ReverseLandscape => "Reverse landscape",
            OrientationCode::NormalPortrait => "Normal portrait",
            OrientationCode::ReversePortrait => "Reverse portrait",
            OrientationCode::FaceUp => "Screen facing upwards",
            OrientationCode::FaceDown => "Screen facing downwards",
        };
        f.write_str(text)
    }
}

/// Coarse gesture derived from linear acceleration and corrected rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionLabel {
    /// No rule fired.
    #[default]
    None,
    /// Push along +Z with no significant rotation.
    MovingAwayFromBody,
    /// Pull along -Z with no significant rotation.
    MovingTowardBody,
    /// Rotation dominated by +Y.
    MovingLeft,
    /// Rotation dominated by -Y.
    MovingRight,
}

impl ActionLabel {
    /// Numeric code, 0 for `None`.
    pub fn code(self) -> i32 {
        match self {
            ActionLabel::None => 0,
            ActionLabel::MovingAwayFromBody => 1,
            ActionLabel::MovingTowardBody => 2,
            ActionLabel::MovingLeft => 3,
            ActionLabel::MovingRight => 4,
        }
    }

    pub fn is_none(self) -> bool {
        self == ActionLabel::None
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ActionLabel::None => "",
            ActionLabel::MovingAwayFromBody => "Phone moving away from body",
            ActionLabel::MovingTowardBody => "Phone moving towards body",
            ActionLabel::MovingLeft => "Phone moving to the left",
            ActionLabel::MovingRight => "Phone moving to the right",
        };
        f.write_str(text)
    }
}
