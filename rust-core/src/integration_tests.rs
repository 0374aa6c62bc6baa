/// Integration tests for the complete gesture pipeline
/// Tests realistic phone-handling scenarios end to end: interleaved sensor
/// streams, settling of the gravity filter, and the labels a user would see.

#[cfg(test)]
mod integration_tests {
    use crate::pipeline::*;
    use crate::config::MonitorConfig;
    use crate::signal::{SignalProcessor, ACTION_THRESHOLD, ALPHA};
    use crate::types::*;

    /// Helper: Feed the same accelerometer reading until gravity settles
    fn settle(processor: &mut SignalProcessor, accel: [f32; 3]) {
        for _ in 0..200 {
            processor
                .update(&SensorSample::new(SensorKind::Accelerometer, accel))
                .unwrap();
        }
    }

    /// Helper: Phone lying flat, 50Hz accelerometer with a 25Hz gyro in between
    fn resting_flat_profile(duration_ms: u64) -> Vec<SensorSample> {
        let mut samples = Vec::new();
        for t in (0..duration_ms).step_by(20) {
            samples.push(SensorSample::accel(0.05, -0.03, 9.8).at(t));
            if t % 40 == 0 {
                samples.push(SensorSample::gyro(0.01, -0.02, 0.0).at(t + 5));
            }
        }
        samples
    }

    #[test]
    fn test_push_away_scenario() {
        let mut processor = SignalProcessor::new();
        settle(&mut processor, [0.0, 0.0, 9.8]);
        processor.update(&SensorSample::gyro(0.0, 0.0, 0.0)).unwrap();

        processor.update(&SensorSample::accel(0.0, 0.0, 15.0)).unwrap();
        let linear = processor.linear_accel();
        assert!(linear[2] > 4.0, "push should register on Z, got {linear:?}");
        assert_eq!(linear[0], 0.0);
        assert_eq!(linear[1], 0.0);
        assert_eq!(processor.action(), ActionLabel::MovingAwayFromBody);
    }

    #[test]
    fn test_pull_toward_scenario() {
        let mut processor = SignalProcessor::new();
        settle(&mut processor, [0.0, 0.0, 9.8]);

        processor.update(&SensorSample::accel(0.0, 0.0, 4.0)).unwrap();
        assert!(processor.linear_accel()[2] < -4.0);
        assert_eq!(processor.action(), ActionLabel::MovingTowardBody);
        // Still lying flat: raw Z dominates.
        assert_eq!(processor.orientation(), OrientationCode::FaceUp);
    }

    #[test]
    fn test_rotation_scenarios() {
        let mut processor = SignalProcessor::new();

        processor.update(&SensorSample::gyro(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(processor.corrected_gyro(), [0.0, 1.0, 0.0]);
        assert_eq!(processor.action(), ActionLabel::MovingLeft);

        processor.update(&SensorSample::gyro(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(processor.action(), ActionLabel::MovingRight);

        processor.update(&SensorSample::gyro(0.1, 0.2, -0.1)).unwrap();
        assert_eq!(processor.corrected_gyro(), [0.0; 3]);
        assert_eq!(processor.action(), ActionLabel::None);
    }

    #[test]
    fn test_rotation_blocks_push() {
        let mut processor = SignalProcessor::new();
        settle(&mut processor, [0.0, 0.0, 9.8]);

        processor.update(&SensorSample::gyro(0.9, 0.0, 0.0)).unwrap();
        processor.update(&SensorSample::accel(0.0, 0.0, 15.0)).unwrap();
        assert!(processor.action_candidates().translation.is_none());
        assert_eq!(processor.action(), ActionLabel::None);
    }

    #[test]
    fn test_orientation_follows_raw_reading() {
        let cases = [
            ([9.8, 0.0, 0.0], OrientationCode::NormalLandscape),
            ([-9.8, 0.0, 0.0], OrientationCode::ReverseLandscape),
            ([0.0, 9.8, 0.0], OrientationCode::NormalPortrait),
            ([0.0, -9.8, 0.0], OrientationCode::ReversePortrait),
            ([0.0, 0.0, 9.8], OrientationCode::FaceUp),
            ([0.0, 0.0, -9.8], OrientationCode::FaceDown),
        ];

        let mut processor = SignalProcessor::new();
        for (accel, expected) in cases {
            // A single sample suffices: orientation reads the raw value.
            processor
                .update(&SensorSample::new(SensorKind::Accelerometer, accel))
                .unwrap();
            assert_eq!(processor.orientation(), expected);
        }
    }

    #[test]
    fn test_linear_accel_invariant_over_stream() {
        let mut processor = SignalProcessor::new();
        let mut previous_gravity = [0.0_f32; 3];

        for (i, sample) in resting_flat_profile(2000).iter().enumerate() {
            let jolt = if i % 17 == 0 { 3.0 } else { 0.0 };
            let sample = SensorSample {
                values: [
                    sample.values[0] + jolt,
                    sample.values[1],
                    sample.values[2] - jolt,
                ],
                ..*sample
            };
            processor.update(&sample).unwrap();

            if sample.kind == SensorKind::Accelerometer {
                let gravity = processor.gravity();
                for a in 0..3 {
                    assert_eq!(
                        gravity[a],
                        ALPHA * previous_gravity[a] + (1.0 - ALPHA) * sample.values[a]
                    );
                    let diff = sample.values[a] - gravity[a];
                    if diff.abs() < ACTION_THRESHOLD {
                        assert_eq!(processor.linear_accel()[a], 0.0);
                    } else {
                        assert_eq!(processor.linear_accel()[a], diff);
                    }
                }
                previous_gravity = gravity;
            } else {
                assert_eq!(processor.gravity(), previous_gravity);
            }
        }
    }

    #[test]
    fn test_monitor_replays_resting_phone() {
        let mut monitor = MotionMonitor::new(MonitorConfig::default()).unwrap();
        monitor.start().unwrap();

        let mut last = None;
        for sample in resting_flat_profile(3000) {
            last = Some(monitor.process(&sample).unwrap());
        }

        let readout = last.unwrap();
        assert_eq!(readout.orientation, OrientationCode::FaceUp);
        assert_eq!(readout.action, ActionLabel::None);
        assert_eq!(readout.linear_accel, [0.0; 3]);
        assert_eq!(readout.corrected_gyro, [0.0; 3]);
        assert!((readout.gravity[2] - 9.8).abs() < 0.01);
        assert_eq!(monitor.count(SensorKind::Accelerometer), 150);
        assert_eq!(monitor.count(SensorKind::Gyroscope), 75);
    }

    #[test]
    fn test_pause_resume_forgets_gravity() {
        let mut monitor = MotionMonitor::new(MonitorConfig::default()).unwrap();
        monitor.start().unwrap();
        for sample in resting_flat_profile(1000) {
            monitor.process(&sample).unwrap();
        }
        monitor.stop();
        monitor.start().unwrap();

        // First sample after resume sees a zero gravity estimate again.
        let readout = monitor.process(&SensorSample::accel(0.0, 0.0, 9.8)).unwrap();
        assert_eq!(readout.gravity, [0.0, 0.0, (1.0 - ALPHA) * 9.8]);
        assert_eq!(readout.action, ActionLabel::MovingAwayFromBody);
    }
}
