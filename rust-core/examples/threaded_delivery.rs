/// Threaded delivery example: accelerometer and gyroscope on separate threads
use std::thread;
use std::time::Duration;

use gesture_sensing::{MonitorConfig, MotionMonitor, SensorSample, SharedMonitor};

fn main() -> gesture_sensing::Result<()> {
    println!("=== Gesture Sensing Engine: Threaded Delivery Example ===\n");

    let mut monitor = MotionMonitor::new(MonitorConfig::default())?;
    monitor.start()?;
    let shared = SharedMonitor::new(monitor);

    // Accelerometer at ~50Hz, phone held upright in portrait
    let accel = {
        let shared = shared.clone();
        thread::spawn(move || {
            for t in 0..100u64 {
                let wobble = 0.05 * (t as f32 * 0.3).sin();
                let sample = SensorSample::accel(wobble, 9.8, 0.3).at(t * 20);
                if let Err(e) = shared.process(&sample) {
                    eprintln!("accelerometer: {e}");
                }
                thread::sleep(Duration::from_millis(2));
            }
        })
    };

    // Gyroscope at ~25Hz, turning left for the second half
    let gyro = {
        let shared = shared.clone();
        thread::spawn(move || {
            for t in 0..50u64 {
                let y = if t < 25 { 0.02 } else { 0.8 };
                let sample = SensorSample::gyro(0.01, y, -0.01).at(t * 40 + 5);
                if let Err(e) = shared.process(&sample) {
                    eprintln!("gyroscope: {e}");
                }
                thread::sleep(Duration::from_millis(4));
            }
        })
    };

    let _ = accel.join();
    let _ = gyro.join();

    if let Some(readout) = shared.readout() {
        println!("{readout}");
    }
    println!("\nAccepted events: {}", shared.accepted());
    shared.stop();
    Ok(())
}
