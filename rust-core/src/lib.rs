//! Gesture Sensing Engine Library
//!
//! Converts two independent streams of raw phone sensor samples, accelerometer
//! and gyroscope, into derived physical quantities and symbolic labels:
//!
//! - a low-pass gravity estimate and the linear acceleration left after
//!   removing it,
//! - angular rate with sub-threshold noise zeroed,
//! - a six-way device orientation,
//! - a coarse gesture (push, pull, left, right).
//!
//! # Design Philosophy
//!
//! - **Small, explicit state**: every tracked quantity is a named field; the
//!   only mutation is [`SignalProcessor::update`].
//! - **Pure queries**: orientation and gesture are total functions of the
//!   current state.
//! - **Fail-loud input**: non-finite samples are rejected, never folded in.
//! - **O(1) per sample** with a fixed memory footprint.
//!
//! # Example
//!
//! ```
//! use gesture_sensing::{ActionLabel, OrientationCode, SensorSample, SignalProcessor};
//!
//! let mut processor = SignalProcessor::new();
//! for _ in 0..50 {
//!     processor.update(&SensorSample::accel(0.0, 0.0, 9.8)).unwrap();
//! }
//! assert_eq!(processor.orientation(), OrientationCode::FaceUp);
//!
//! processor.update(&SensorSample::accel(0.0, 0.0, 15.0)).unwrap();
//! assert_eq!(processor.action(), ActionLabel::MovingAwayFromBody);
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod ffi;
pub mod orientation;
pub mod pipeline;
pub mod readout;
pub mod replay;
pub mod signal;
pub mod types;

mod integration_tests;

// Re-export commonly used types
pub use action::{ActionCandidates, ActionPrecedence};
pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use pipeline::{MotionMonitor, SharedMonitor};
pub use readout::{format_axes, Readout};
pub use replay::{read_samples, SampleReader};
pub use signal::{FilterConfig, FusionState, SignalProcessor, ACTION_THRESHOLD, ALPHA};
pub use types::{ActionLabel, OrientationCode, SensorKind, SensorSample};
