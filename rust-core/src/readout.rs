//! Display-ready snapshot of the processor.
//!
//! A [`Readout`] is taken in one step after an update completes, so every
//! panel shows values from the same moment. Rendering follows the
//! six-panel phone screen: raw accelerometer, raw gyroscope, orientation,
//! linear acceleration, corrected rotation and current action.

use std::fmt;

use serde::Serialize;

use crate::signal::SignalProcessor;
use crate::types::{ActionLabel, OrientationCode};

/// Format a vector as `X: 0.00   Y: 0.00   Z: 0.00`.
pub fn format_axes(values: [f32; 3]) -> String {
    format!(
        "X: {:.2}   Y: {:.2}   Z: {:.2}",
        values[0], values[1], values[2]
    )
}

/// Everything the display needs after one update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readout {
    /// Timestamp of the sample that produced this readout, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
    pub linear_accel: [f32; 3],
    pub corrected_gyro: [f32; 3],
    pub gravity: [f32; 3],
    /// Norm of `gravity`; about 9.8 once the filter has settled.
    pub gravity_magnitude: f32,
    pub orientation: OrientationCode,
    pub action: ActionLabel,
}

impl Readout {
    /// Capture the processor's current state.
    pub fn capture(processor: &SignalProcessor, timestamp_ms: Option<u64>) -> Self {
        let state = processor.state();
        Self {
            timestamp_ms,
            accel: state.accel,
            gyro: state.gyro,
            linear_accel: state.linear_accel,
            corrected_gyro: state.corrected_gyro,
            gravity: state.gravity,
            gravity_magnitude: processor.gravity_estimator().gravity_magnitude(),
            orientation: processor.orientation(),
            action: processor.action(),
        }
    }

    /// True when the symbolic labels differ from `other`.
    pub fn labels_differ(&self, other: &Readout) -> bool {
        self.orientation != other.orientation || self.action != other.action
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accelerometer:       {}", format_axes(self.accel))?;
        writeln!(f, "Gyroscope:           {}", format_axes(self.gyro))?;
        writeln!(f, "Orientation:         {}", self.orientation)?;
        writeln!(f, "Linear acceleration: {}", format_axes(self.linear_accel))?;
        writeln!(f, "Angular rotation:    {}", format_axes(self.corrected_gyro))?;
        write!(f, "Action:              {}", self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorSample;

    #[test]
    fn test_format_axes() {
        assert_eq!(format_axes([0.0; 3]), "X: 0.00   Y: 0.00   Z: 0.00");
        assert_eq!(
            format_axes([9.806, -0.126, 1.0]),
            "X: 9.81   Y: -0.13   Z: 1.00"
        );
    }

    #[test]
    fn test_capture_matches_processor() {
        let mut processor = SignalProcessor::new();
        processor.update(&SensorSample::accel(0.0, 9.8, 0.0)).unwrap();
        processor.update(&SensorSample::gyro(0.1, 2.0, 0.0)).unwrap();

        let readout = Readout::capture(&processor, Some(42));
        assert_eq!(readout.timestamp_ms, Some(42));
        assert_eq!(readout.accel, processor.accel());
        assert_eq!(readout.corrected_gyro, [0.0, 2.0, 0.0]);
        assert_eq!(readout.orientation, OrientationCode::NormalPortrait);
        assert_eq!(readout.action, ActionLabel::MovingLeft);
    }

    #[test]
    fn test_display_panels() {
        let processor = SignalProcessor::new();
        let text = Readout::capture(&processor, None).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].ends_with("X: 0.00   Y: 0.00   Z: 0.00"));
        assert!(lines[2].ends_with("Screen facing downwards"));
    }

    #[test]
    fn test_json_shape() {
        let processor = SignalProcessor::new();
        let json = serde_json::to_value(Readout::capture(&processor, None)).unwrap();

        assert!(json.get("timestamp_ms").is_none());
        assert_eq!(json["orientation"], "FaceDown");
        assert_eq!(json["action"], "None");
        assert_eq!(json["accel"].as_array().unwrap().len(), 3);
        assert_eq!(json["gravity_magnitude"], 0.0);
    }

    #[test]
    fn test_gravity_magnitude_settles() {
        let mut processor = SignalProcessor::new();
        assert_eq!(Readout::capture(&processor, None).gravity_magnitude, 0.0);

        for _ in 0..100 {
            processor.update(&SensorSample::accel(3.0, 4.0, 0.0)).unwrap();
        }
        processor.update(&SensorSample::gyro(1.0, 1.0, 1.0)).unwrap();

        let readout = Readout::capture(&processor, None);
        assert!((readout.gravity_magnitude - 5.0).abs() < 1e-3);
    }
}
