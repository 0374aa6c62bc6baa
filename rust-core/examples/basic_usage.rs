/// Basic usage example: Feed sensor events, read orientation and gesture
use gesture_sensing::{
    ActionLabel, MonitorConfig, MotionMonitor, Readout, SensorSample,
};

fn main() -> gesture_sensing::Result<()> {
    println!("=== Gesture Sensing Engine: Basic Example ===\n");

    // Create a monitor with default config (alpha 0.8, threshold 0.4)
    let mut monitor = MotionMonitor::new(MonitorConfig::default())?;
    monitor.start()?;

    // Simulated event stream: phone lying flat, pushed away, then twisted
    let mut events = Vec::new();

    // Resting phase (0-1 seconds)
    for t in (0..1000).step_by(20) {
        events.push(SensorSample::accel(0.02, -0.01, 9.8).at(t));
        events.push(SensorSample::gyro(0.01, 0.0, -0.01).at(t + 10));
    }

    // Push away from the body
    events.push(SensorSample::accel(0.1, 0.0, 15.0).at(1000));
    events.push(SensorSample::accel(0.0, 0.1, 12.0).at(1020));

    // Settle again, then rotate around Y
    for t in (1040..1500).step_by(20) {
        events.push(SensorSample::accel(0.0, 0.0, 9.8).at(t));
    }
    events.push(SensorSample::gyro(0.05, 1.2, 0.1).at(1510));
    events.push(SensorSample::gyro(0.0, -0.9, 0.0).at(1530));
    events.push(SensorSample::gyro(0.0, 0.0, 0.0).at(1550));

    println!("Processing {} events...\n", events.len());

    let mut last_action = ActionLabel::None;
    for event in &events {
        let readout = monitor.process(event)?;
        if readout.action != last_action {
            print_readout(&readout);
            last_action = readout.action;
        }
    }

    println!("\n=== Summary ===");
    println!("Accepted events: {}", monitor.accepted());
    monitor.stop();
    Ok(())
}

fn print_readout(readout: &Readout) {
    println!("\n--- t={}ms ---", readout.timestamp_ms.unwrap_or_default());
    println!("{readout}");
}
