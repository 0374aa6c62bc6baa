//! Lifecycle wrapper that feeds platform samples through the processor.
//!
//! The platform layer owns sensor registration. It brackets each active
//! period with `start()` and `stop()` and hands every delivered event to
//! `process()`. Nothing survives a stop: the next start builds a fresh
//! all-zero processor, the same as the app being paused and resumed.
//!
//! # Concurrency
//! `MotionMonitor` is single-threaded. When accelerometer and gyroscope
//! events may arrive on different threads, wrap it in a [`SharedMonitor`],
//! which serializes updates behind one mutex and hands out readouts taken
//! under the same lock.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::readout::Readout;
use crate::signal::SignalProcessor;
use crate::types::{SensorKind, SensorSample};

/// Processor plus start/stop bookkeeping.
#[derive(Debug)]
pub struct MotionMonitor {
    config: MonitorConfig,
    processor: Option<SignalProcessor>,

    // Counters since the last start.
    accepted: u64,
    rejected: u64,
}

impl MotionMonitor {
    /// Creates a stopped monitor with the given configuration.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            processor: None,
            accepted: 0,
            rejected: 0,
        })
    }

    /// Begins an active period with a fresh processor.
    ///
    /// Starting an already running monitor discards its state.
    pub fn start(&mut self) -> Result<()> {
        let processor = SignalProcessor::with_config(self.config.filter, self.config.precedence)?;
        if self.processor.replace(processor).is_some() {
            log::debug!("Restarting active monitor, previous state discarded");
        } else {
            log::info!("Sensor delivery started");
        }
        self.accepted = 0;
        self.rejected = 0;
        Ok(())
    }

    /// Ends the active period and drops all state.
    pub fn stop(&mut self) {
        if self.processor.take().is_some() {
            log::info!(
                "Sensor delivery stopped after {} samples ({} rejected)",
                self.accepted,
                self.rejected
            );
        }
    }

    pub fn is_active(&self) -> bool {
        self.processor.is_some()
    }

    /// Processes a single sample and returns the readout that follows it.
    ///
    /// Fails with `NotStarted` outside an active period and with
    /// `NonFiniteSample` for rejected input; neither changes the state.
    pub fn process(&mut self, sample: &SensorSample) -> Result<Readout> {
        let processor = self.processor.as_mut().ok_or(Error::NotStarted)?;

        match processor.update(sample) {
            Ok(()) => self.accepted += 1,
            Err(e) => {
                self.rejected += 1;
                return Err(e);
            }
        }

        Ok(Readout::capture(processor, sample.timestamp_ms))
    }

    /// Readout of the current state, if active.
    pub fn readout(&self) -> Option<Readout> {
        self.processor
            .as_ref()
            .map(|processor| Readout::capture(processor, None))
    }

    /// The processor of the current active period.
    pub fn processor(&self) -> Option<&SignalProcessor> {
        self.processor.as_ref()
    }

    /// Samples accepted since the last start.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Samples rejected since the last start.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Accepted samples of one kind since the last start.
    pub fn count(&self, kind: SensorKind) -> u64 {
        match (&self.processor, kind) {
            (Some(p), SensorKind::Accelerometer) => p.accel_count(),
            (Some(p), SensorKind::Gyroscope) => p.gyro_count(),
            (None, _) => 0,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

/// Thread-safe handle to a [`MotionMonitor`].
///
/// Cloning the handle shares the monitor.
#[derive(Debug, Clone)]
pub struct SharedMonitor {
    inner: Arc<Mutex<MotionMonitor>>,
}

impl SharedMonitor {
    pub fn new(monitor: MotionMonitor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(monitor)),
        }
    }

    // Poisoning is ignored: `process` mutates only after validation succeeds.
    fn lock(&self) -> MutexGuard<'_, MotionMonitor> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start(&self) -> Result<()> {
        self.lock().start()
    }

    pub fn stop(&self) {
        self.lock().stop()
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    pub fn process(&self, sample: &SensorSample) -> Result<Readout> {
        self.lock().process(sample)
    }

    pub fn readout(&self) -> Option<Readout> {
        self.lock().readout()
    }

    pub fn accepted(&self) -> u64 {
        self.lock().accepted()
    }
}
