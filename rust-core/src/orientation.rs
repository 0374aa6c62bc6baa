//! Orientation classification from the raw accelerometer reading.
//!
//! While the device is roughly still, the largest acceleration component is
//! gravity, so the axis with the greatest magnitude points at the ground.
//! Its sign picks between the two faces of that axis.
//!
//! Tie-break rule: an axis wins only when it is strictly greater than both
//! others. Any tie for the largest magnitude (including the all-zero reading
//! before the first sample) resolves to the Z branch, so a device with no
//! single dominant in-plane axis reads as lying flat.

use crate::types::{OrientationCode, AXIS_X, AXIS_Y, AXIS_Z};

/// Classify a raw accelerometer vector into one of six orientations.
pub fn classify_orientation(accel: [f32; 3]) -> OrientationCode {
    let abs_x = accel[AXIS_X].abs();
    let abs_y = accel[AXIS_Y].abs();
    let abs_z = accel[AXIS_Z].abs();

    if abs_x > abs_y && abs_x > abs_z {
        if accel[AXIS_X] > 0.0 {
            OrientationCode::NormalLandscape
        } else {
            OrientationCode::ReverseLandscape
        }
    } else if abs_y > abs_x && abs_y > abs_z {
        if accel[AXIS_Y] > 0.0 {
            OrientationCode::NormalPortrait
        } else {
            OrientationCode::ReversePortrait
        }
    } else if accel[AXIS_Z] > 0.0 {
        OrientationCode::FaceUp
    } else {
        OrientationCode::FaceDown
    }
}
