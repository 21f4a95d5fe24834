// demos/hover.rs

use flight_control_core::{
    FlightControlConfig, FlightControlState, FlightMode, InnerLoopInputs, InnerLoopScheduler,
    MicrosClock, MotorCommand, MotorDriver, StickInput, TargetMailbox, Vector3,
};

/// Simulated clock ticking at 250 Hz.
struct SimClock {
    now_us: u64,
}

impl MicrosClock for SimClock {
    fn now_us(&mut self) -> u64 {
        self.now_us += 4_000;
        self.now_us
    }
}

/// Motor driver that keeps the last command for the simulation.
#[derive(Default)]
struct SimMotors {
    last: MotorCommand,
}

impl MotorDriver for SimMotors {
    fn command(&mut self, command: MotorCommand) {
        self.last = command;
    }
}

static TARGETS: TargetMailbox = TargetMailbox::new();

fn main() {
    let config = FlightControlConfig::new();
    let mut fc = FlightControlState::new(&config);
    let mut scheduler = InnerLoopScheduler::with_nominal_period(SimClock { now_us: 0 }, 0.004);
    let mut motors = SimMotors::default();

    // Guidance asks for a 5 degree roll and a 50 cm/s climb.
    TARGETS.post_att_outer_target(Vector3::new(5.0, 0.0, 0.0));
    TARGETS.post_alt_inner_target(50.0);

    let mode = FlightMode::Auto;
    let stick = StickInput::default();
    let mut angle = Vector3::new(0.0, 0.0, 0.0);
    let mut gyro = Vector3::new(0.0, 0.0, 0.0);
    let mut vel_z = 0.0;
    let dt = 0.004;

    println!("   tick,     Roll,    Pitch,      Yaw, Throttle");
    for tick in 0..=40 {
        TARGETS.apply_to(&mut fc);

        // Attitude outer loop at a quarter of the inner rate.
        if tick % 4 == 0 {
            fc.attitude_outer_control(angle, mode, stick);
        }

        let inputs = InnerLoopInputs {
            gyro,
            vel_z,
            mode,
            stick,
        };
        let command = scheduler.tick(&mut fc, &inputs, &mut motors);
        println!(
            "{:7}, {:-8.3}, {:-8.3}, {:-8.3}, {:-8.2}",
            tick, command.roll, command.pitch, command.yaw, command.throttle
        );

        // simulate response
        gyro = Vector3::new(command.roll * 2.0, command.pitch * 2.0, -command.yaw * 0.5);
        angle = Vector3::new(
            angle.x + gyro.x * dt,
            angle.y + gyro.y * dt,
            angle.z + gyro.z * dt,
        );
        vel_z += (motors.last.throttle - 1000.0) * 0.01;
    }
}
