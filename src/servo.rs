//! Servo control.
//!
//! Three hobby servo headers share the PWM frame with everything else, so
//! the 50 Hz output frequency is fixed and angles are converted to pulse
//! widths inside the 20 ms frame.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::robot::Robot;

/// One of the three servo headers on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Servo {
    S1,
    S2,
    S3,
}

impl Servo {
    fn offset(self) -> u8 {
        match self {
            Servo::S1 => 0,
            Servo::S2 => 1,
            Servo::S3 => 2,
        }
    }
}

/// Converts an angle in degrees to the PWM off tick.
///
/// 0-180 degrees map linearly onto 0.6-2.4 ms pulses, then onto ticks of
/// the 20 ms frame. Plain integer division, so the result floors.
fn angle_ticks(degrees: u8) -> u16 {
    let us = u32::from(degrees) * 10 + 600;
    (us * 4096 / 20_000) as u16
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Moves `servo` to `degrees` (0-180).
    pub async fn set_servo(&mut self, servo: Servo, degrees: u8) -> Result<(), Error<I2C::Error>> {
        let channel = self.config.servo_base + servo.offset();
        self.pwm.set_channel(channel, 0, angle_ticks(degrees)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::i2c::Transaction as I2cTransaction;

    const ADDR: u8 = 0x41;

    #[test]
    fn angle_maps_onto_the_pulse_window() {
        // 0° is a 600 µs pulse, 122.88 ticks floored.
        assert_eq!(angle_ticks(0), 122);
        // 90° is 1500 µs, the usual servo center.
        assert_eq!(angle_ticks(90), 307);
        // 180° is 2400 µs, 491.52 ticks floored.
        assert_eq!(angle_ticks(180), 491);
    }

    #[test]
    fn servos_sit_on_consecutive_channels() {
        // S1 on channel 3 (0x12), S2 on 4 (0x16), S3 on 5 (0x1A).
        let mut robot = testutil::robot(&[
            I2cTransaction::write(ADDR, vec![0x12, 0x00, 0x00, 0x7A, 0x00]),
            I2cTransaction::write(ADDR, vec![0x16, 0x00, 0x00, 0x33, 0x01]),
            I2cTransaction::write(ADDR, vec![0x1A, 0x00, 0x00, 0xEB, 0x01]),
        ]);
        block_on(robot.set_servo(Servo::S1, 0)).unwrap();
        block_on(robot.set_servo(Servo::S2, 90)).unwrap();
        block_on(robot.set_servo(Servo::S3, 180)).unwrap();
        testutil::verify(robot);
    }
}
