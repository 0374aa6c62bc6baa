//! C FFI bindings for mobile host integration.
//!
//! The host app keeps its own sensor registration. On every delivered event
//! it calls `gesture_processor_update()`, then reads labels and vectors back
//! for display. Pausing the app maps to `gesture_processor_destroy()` (or
//! `gesture_processor_reset()`), matching the no-persistence lifecycle.
//!
//! Memory Safety:
//! - The processor instance must be freed with `gesture_processor_destroy()`
//! - NULL checks are performed on all inputs
//!
//! Thread Safety:
//! - The processor is NOT thread-safe. Use a single thread or mutex.

use std::os::raw::c_char;
use std::ptr;

use crate::action::ActionPrecedence;
use crate::signal::{FilterConfig, SignalProcessor};
use crate::types::{SensorKind, SensorSample};

// ============================================================================
// OPAQUE HANDLE TYPES
// ============================================================================

/// Opaque handle to a gesture processor.
pub struct GestureProcessor {
    processor: SignalProcessor,
}

/// Result status codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer provided.
    NullPointer = 1,
    /// Invalid parameter value (unknown sensor kind, bad config).
    InvalidParameter = 2,
    /// Sample contained NaN or infinity and was dropped.
    NonFiniteSample = 3,
}

/// Sensor kind as passed over the C ABI.
pub const GESTURE_SENSOR_ACCELEROMETER: i32 = 1;
/// Sensor kind as passed over the C ABI.
pub const GESTURE_SENSOR_GYROSCOPE: i32 = 2;

/// Configuration for the processor.
#[repr(C)]
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Gravity filter weight of the previous estimate, in [0, 1].
    pub alpha: f32,
    /// Noise gate threshold.
    pub action_threshold: f32,
    /// Non-zero to let push/pull win over left/right.
    pub translation_first: i32,
}

/// Full state snapshot for display.
#[repr(C)]
#[derive(Debug, Clone, Default)]
pub struct GestureReadout {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
    pub linear_accel: [f32; 3],
    pub corrected_gyro: [f32; 3],
    pub gravity: [f32; 3],
    /// Orientation code 1..=6.
    pub orientation: i32,
    /// Action code 0..=4, 0 = none.
    pub action: i32,
}

// ============================================================================
// PROCESSOR LIFECYCLE
// ============================================================================

/// Create a new processor.
///
/// # Safety
/// - `config` must be NULL (defaults) or a valid pointer to GestureConfig.
/// - The returned pointer must be freed with `gesture_processor_destroy()`.
///
/// # Returns
/// - Pointer to GestureProcessor on success.
/// - NULL when the configuration is invalid.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_create(
    config: *const GestureConfig,
) -> *mut GestureProcessor {
    let processor = if config.is_null() {
        SignalProcessor::new()
    } else {
        let config = &*config;
        let filter = FilterConfig {
            alpha: config.alpha,
            action_threshold: config.action_threshold,
        };
        let precedence = if config.translation_first != 0 {
            ActionPrecedence::TranslationFirst
        } else {
            ActionPrecedence::RotationFirst
        };
        match SignalProcessor::with_config(filter, precedence) {
            Ok(processor) => processor,
            Err(e) => {
                log::warn!("Rejecting processor configuration: {e}");
                return ptr::null_mut();
            }
        }
    };

    Box::into_raw(Box::new(GestureProcessor { processor }))
}

/// Destroy a processor.
///
/// # Safety
/// - `handle` must be a valid pointer from `gesture_processor_create()`.
/// - Must not be called more than once for the same pointer.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_destroy(handle: *mut GestureProcessor) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Reset all state to zero, keeping the configuration.
///
/// # Safety
/// - `handle` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_reset(
    handle: *mut GestureProcessor,
) -> GestureStatus {
    if handle.is_null() {
        return GestureStatus::NullPointer;
    }

    let handle = &mut *handle;
    let config = *handle.processor.config();
    let precedence = handle.processor.precedence();
    match SignalProcessor::with_config(config, precedence) {
        Ok(processor) => {
            handle.processor = processor;
            GestureStatus::Ok
        }
        Err(_) => GestureStatus::InvalidParameter,
    }
}

// ============================================================================
// SAMPLE PROCESSING
// ============================================================================

/// Feed one sensor event.
///
/// # Safety
/// - `handle` must be a valid pointer.
///
/// # Parameters
/// - `kind`: `GESTURE_SENSOR_ACCELEROMETER` or `GESTURE_SENSOR_GYROSCOPE`.
/// - `x/y/z`: Reading in m/s² or rad/s.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_update(
    handle: *mut GestureProcessor,
    kind: i32,
    x: f32,
    y: f32,
    z: f32,
) -> GestureStatus {
    if handle.is_null() {
        return GestureStatus::NullPointer;
    }

    let kind = match kind {
        GESTURE_SENSOR_ACCELEROMETER => SensorKind::Accelerometer,
        GESTURE_SENSOR_GYROSCOPE => SensorKind::Gyroscope,
        _ => return GestureStatus::InvalidParameter,
    };

    let handle = &mut *handle;
    match handle.processor.update(&SensorSample::new(kind, [x, y, z])) {
        Ok(()) => GestureStatus::Ok,
        Err(_) => GestureStatus::NonFiniteSample,
    }
}

// ============================================================================
// STATUS QUERIES
// ============================================================================

/// Current orientation code (1..=6), or -1 on NULL.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_orientation(handle: *const GestureProcessor) -> i32 {
    if handle.is_null() {
        return -1;
    }

    let handle = &*handle;
    handle.processor.orientation().code()
}

/// Current action code (0..=4), or -1 on NULL.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_action(handle: *const GestureProcessor) -> i32 {
    if handle.is_null() {
        return -1;
    }

    let handle = &*handle;
    handle.processor.action().code()
}

/// Copy the full state into `output`.
///
/// # Safety
/// - `handle` must be a valid pointer.
/// - `output` must be a valid pointer to receive results.
#[no_mangle]
pub unsafe extern "C" fn gesture_processor_read(
    handle: *const GestureProcessor,
    output: *mut GestureReadout,
) -> GestureStatus {
    if handle.is_null() || output.is_null() {
        return GestureStatus::NullPointer;
    }

    let processor = &(*handle).processor;
    let output = &mut *output;
    let state = processor.state();

    output.accel = state.accel;
    output.gyro = state.gyro;
    output.linear_accel = state.linear_accel;
    output.corrected_gyro = state.corrected_gyro;
    output.gravity = state.gravity;
    output.orientation = processor.orientation().code();
    output.action = processor.action().code();

    GestureStatus::Ok
}

// ============================================================================
// VERSION INFO
// ============================================================================

/// Get the library version string.
///
/// # Returns
/// - Static string, do NOT free.
#[no_mangle]
pub extern "C" fn gesture_version() -> *const c_char {
    static VERSION: &[u8] =
        concat!("gesture-sensing/", env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// ============================================================================
// TESTS
// ============================================================================
