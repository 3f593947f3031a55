//! Test doubles and fixtures shared by the unit tests.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, Transaction as PinTransaction};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use crate::config::BoardConfig;
use crate::io::{AnalogInput, PulseInput};
use crate::melody::{Melody, MelodyPlayer};
use crate::pca9685::Pca9685;
use crate::robot::{Robot, Sensors};
use crate::strip::{LedStrip, Rgb};

/// Analog input returning a fixed value.
pub(crate) struct FakeAnalog(pub u16);

impl AnalogInput for FakeAnalog {
    async fn read(&mut self) -> u16 {
        self.0
    }
}

/// Pulse input returning a canned measurement and recording the timeout it
/// was asked for.
pub(crate) struct FakePulse {
    pub raw_us: Option<u32>,
    pub seen_timeout_us: Option<u32>,
}

impl PulseInput for FakePulse {
    async fn measure_high_us(&mut self, timeout_us: u32) -> Option<u32> {
        self.seen_timeout_us = Some(timeout_us);
        self.raw_us
    }
}

/// Strip recording every frame written to it.
#[derive(Default)]
pub(crate) struct FakeStrip {
    pub frames: Vec<Vec<Rgb>>,
}

impl LedStrip for FakeStrip {
    async fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

/// Player recording every melody it was asked to start.
#[derive(Default)]
pub(crate) struct FakePlayer {
    pub played: Vec<Melody>,
}

impl MelodyPlayer for FakePlayer {
    fn play(&mut self, melody: Melody) {
        self.played.push(melody);
    }
}

pub(crate) type TestRobot =
    Robot<I2cMock, NoopDelay, FakeAnalog, PinMock, FakePulse, FakeStrip, FakePlayer>;

/// Robot over mock peripherals with the default board config. The PWM
/// controller is pre-initialized so tests only list the traffic of the
/// operation under test.
pub(crate) fn robot(i2c: &[I2cTransaction]) -> TestRobot {
    robot_with_pins(i2c, &[], &[])
}

/// Like [`robot`], with expectations on the obstacle enable and ultrasonic
/// trigger pins.
pub(crate) fn robot_with_pins(
    i2c: &[I2cTransaction],
    enable: &[PinTransaction],
    trigger: &[PinTransaction],
) -> TestRobot {
    let config = BoardConfig::default();
    let pwm = initialized_pca(i2c, config.address, config.pwm_hz);
    Robot::new(
        pwm,
        NoopDelay::new(),
        Sensors {
            line_left: FakeAnalog(0),
            line_right: FakeAnalog(0),
            obstacle_value: FakeAnalog(0),
            obstacle_enable: PinMock::new(enable),
            trigger: PinMock::new(trigger),
            echo: FakePulse {
                raw_us: None,
                seen_timeout_us: None,
            },
        },
        FakeStrip::default(),
        FakePlayer::default(),
        config,
    )
}

/// Builds a driver whose chip bring-up has already happened, by prepending
/// the bring-up traffic and consuming it with a throwaway write.
fn initialized_pca(
    i2c: &[I2cTransaction],
    address: u8,
    pwm_hz: u16,
) -> Pca9685<I2cMock, NoopDelay> {
    let mut expectations = vec![
        I2cTransaction::write(address, vec![0x00, 0x00]),
        I2cTransaction::write_read(address, vec![0x00], vec![0x00]),
        I2cTransaction::write(address, vec![0x00, 0x10]),
        I2cTransaction::write(address, vec![0xFE, 121]),
        I2cTransaction::write(address, vec![0x00, 0x00]),
        I2cTransaction::write(address, vec![0x00, 0xA1]),
        I2cTransaction::write(address, vec![0x06, 0x00, 0x00, 0x00, 0x00]),
    ];
    expectations.extend_from_slice(i2c);

    let mut pca = Pca9685::new(I2cMock::new(&expectations), NoopDelay::new(), address, pwm_hz);
    embassy_futures::block_on(pca.set_channel(0, 0, 0)).unwrap();
    pca
}

/// Tears the robot apart and checks every mock ran out of expectations.
pub(crate) fn verify(robot: TestRobot) {
    let Robot {
        pwm,
        mut obstacle_enable,
        mut trigger,
        ..
    } = robot;
    pwm.release().done();
    obstacle_enable.done();
    trigger.done();
}
