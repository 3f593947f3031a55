//! Demo control task.
//!
//! Owns the [`Robot`] and runs a small line-follow loop with obstacle
//! avoidance on top of it. The driver library is single-owner by design, so
//! everything robot-facing happens on this one task; the buzzer runs
//! separately and only receives melody requests.

use defmt::{info, warn};
use embassy_rp::adc::Channel as AdcChannel;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Timer};

use crate::config::BoardConfig;
use crate::firmware::buzzer::BuzzerHandle;
use crate::firmware::io::{AdcInput, EchoPin, PioStrip};
use crate::firmware::resources::{
    ExpansionBoardResources, Irqs, LineSensorResources, ObstacleSensorResources, StripResources,
    UltrasonicResources,
};
use crate::line::{LineState, Side};
use crate::melody::Melody;
use crate::motor::{Direction, Motor};
use crate::pca9685::Pca9685;
use crate::robot::{Robot, Sensors};
use crate::strip::Rgb;
use crate::ultrasonic::DistanceUnit;

/// Loop period. The sensors are plain threshold reads, 50 ms keeps the
/// steering responsive without hammering the bus.
const CONTROL_INTERVAL: Duration = Duration::from_millis(50);

/// Stop short of obstacles the rangefinder picks up.
const STOP_DISTANCE_CM: u32 = 20;

const CRUISE_SPEED: u8 = 40;
const TURN_SPEED: u8 = 60;

/// Line-follow demo: steer along the tape edge, stop and complain when the
/// rangefinder sees something close.
#[embassy_executor::task]
pub async fn control(
    board: ExpansionBoardResources,
    line: LineSensorResources,
    obstacle: ObstacleSensorResources,
    ultrasonic: UltrasonicResources,
    strip: StripResources,
) {
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 100_000;
    let bus = I2c::new_async(board.i2c, board.scl_pin, board.sda_pin, Irqs, i2c_config);

    let board_config = BoardConfig::default();
    let pwm = Pca9685::new(bus, Delay, board_config.address, board_config.pwm_hz);
    let sensors = Sensors {
        line_left: AdcInput::new(AdcChannel::new_pin(line.left_pin, Pull::None)),
        line_right: AdcInput::new(AdcChannel::new_pin(line.right_pin, Pull::None)),
        obstacle_value: AdcInput::new(AdcChannel::new_pin(obstacle.value_pin, Pull::None)),
        obstacle_enable: Output::new(obstacle.enable_pin, Level::High),
        trigger: Output::new(ultrasonic.trigger_pin, Level::Low),
        echo: EchoPin::new(Input::new(ultrasonic.echo_pin, Pull::Up)),
    };
    let mut robot = Robot::new(
        pwm,
        Delay,
        sensors,
        PioStrip::new(strip),
        BuzzerHandle,
        board_config,
    );

    robot.play_melody(Melody::PowerUp);
    if let Err(e) = robot.set_headlights(30, 30, 30).await {
        warn!("headlights unavailable: {}", e);
    }
    robot.strip().write(&[Rgb::new(0, 16, 0); 3]).await;

    let mut blocked = false;
    loop {
        Timer::after(CONTROL_INTERVAL).await;

        let distance = match robot.measure_distance(DistanceUnit::Centimeters).await {
            Ok(cm) => Some(cm),
            // No echo within the ceiling means nothing in range.
            Err(crate::Error::EchoTimeout) => None,
            Err(e) => {
                warn!("distance measurement failed: {}", e);
                None
            }
        };

        if let Some(cm) = distance.filter(|cm| *cm < STOP_DISTANCE_CM) {
            if !blocked {
                info!("obstacle at {} cm, holding", cm);
                if let Err(e) = robot.stop().await {
                    warn!("stop failed: {}", e);
                }
                robot.play_melody(Melody::Wawawawaa);
                robot.strip().write(&[Rgb::new(32, 0, 0); 3]).await;
                blocked = true;
            }
            continue;
        }
        if blocked {
            robot.strip().write(&[Rgb::new(0, 16, 0); 3]).await;
            blocked = false;
        }

        // Follow the right-hand edge of the tape: straight while both
        // sensors see white, steer back towards the side that went dark.
        let steer = async {
            let left_white = robot.read_line_sensor(Side::Left, LineState::White).await?;
            let right_white = robot
                .read_line_sensor(Side::Right, LineState::White)
                .await?;
            match (left_white, right_white) {
                (true, true) => robot.drive(Motor::Both, Direction::Forward, CRUISE_SPEED).await,
                (false, true) => robot.drive(Motor::Right, Direction::Forward, TURN_SPEED).await,
                (true, false) => robot.drive(Motor::Left, Direction::Forward, TURN_SPEED).await,
                // Both dark: crossing or end of track, keep rolling slowly.
                (false, false) => robot.drive(Motor::Both, Direction::Forward, 0).await,
            }
        };
        if let Err(e) = steer.await {
            warn!("steering failed: {}", e);
        }
    }
}
