//! Drive motor control.
//!
//! Each wheel is driven by an H-bridge fed from two PWM channels, one per
//! rotation direction. Running a motor energizes the channel for the wanted
//! direction and zeroes the opposite one so the bridge never sees both
//! sides high.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::MotorChannels;
use crate::error::Error;
use crate::robot::Robot;

/// Selects which wheel an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    Left,
    Right,
    Both,
}

/// Rotation direction of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

/// Maps a speed percentage to the PWM off tick.
///
/// 40 ticks per percent on the 12-bit frame. Below 400 ticks the gearbox
/// stalls, so the duty is floored there and even speed 0 keeps the wheel
/// creeping; use [`Robot::stop`] to actually halt.
fn speed_ticks(speed: u8) -> u16 {
    (u16::from(speed) * 40).max(400)
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Runs the selected motor(s) in `direction` at `speed` percent (0-100).
    pub async fn drive(
        &mut self,
        motor: Motor,
        direction: Direction,
        speed: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let ticks = speed_ticks(speed);
        if matches!(motor, Motor::Left | Motor::Both) {
            let channels = self.config.left_motor;
            self.run_motor(channels, direction, ticks).await?;
        }
        if matches!(motor, Motor::Right | Motor::Both) {
            let channels = self.config.right_motor;
            self.run_motor(channels, direction, ticks).await?;
        }
        Ok(())
    }

    /// Halts the car by zeroing all four drive channels.
    pub async fn stop(&mut self) -> Result<(), Error<I2C::Error>> {
        for channel in [
            self.config.left_motor.forward,
            self.config.left_motor.backward,
            self.config.right_motor.forward,
            self.config.right_motor.backward,
        ] {
            self.pwm.set_channel(channel, 0, 0).await?;
        }
        Ok(())
    }

    async fn run_motor(
        &mut self,
        channels: MotorChannels,
        direction: Direction,
        ticks: u16,
    ) -> Result<(), Error<I2C::Error>> {
        let (forward, backward) = match direction {
            Direction::Forward => (ticks, 0),
            Direction::Backward => (0, ticks),
        };
        self.pwm.set_channel(channels.forward, 0, forward).await?;
        self.pwm.set_channel(channels.backward, 0, backward).await
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
    fn speed_maps_to_ticks_with_a_creep_floor() {
        assert_eq!(speed_ticks(0), 400);
        assert_eq!(speed_ticks(10), 400);
        assert_eq!(speed_ticks(11), 440);
        assert_eq!(speed_ticks(50), 2000);
        assert_eq!(speed_ticks(100), 4000);
    }

    #[test]
    fn left_forward_energizes_forward_and_clears_backward() {
        // Channel 12 registers start at 0x36, channel 13 at 0x3A.
        let mut robot = testutil::robot(&[
            I2cTransaction::write(ADDR, vec![0x36, 0x00, 0x00, 0xD0, 0x07]),
            I2cTransaction::write(ADDR, vec![0x3A, 0x00, 0x00, 0x00, 0x00]),
        ]);
        block_on(robot.drive(Motor::Left, Direction::Forward, 50)).unwrap();
        testutil::verify(robot);
    }

    #[test]
    fn right_backward_energizes_the_backward_channel() {
        // Right motor wiring is crossed: forward on 15 (0x42), backward on
        // 14 (0x3E).
        let mut robot = testutil::robot(&[
            I2cTransaction::write(ADDR, vec![0x42, 0x00, 0x00, 0x00, 0x00]),
            I2cTransaction::write(ADDR, vec![0x3E, 0x00, 0x00, 0xA0, 0x0F]),
        ]);
        block_on(robot.drive(Motor::Right, Direction::Backward, 100)).unwrap();
        testutil::verify(robot);
    }

    #[test]
    fn both_at_speed_zero_creeps_on_both_sides() {
        let mut robot = testutil::robot(&[
            I2cTransaction::write(ADDR, vec![0x36, 0x00, 0x00, 0x90, 0x01]),
            I2cTransaction::write(ADDR, vec![0x3A, 0x00, 0x00, 0x00, 0x00]),
            I2cTransaction::write(ADDR, vec![0x42, 0x00, 0x00, 0x90, 0x01]),
            I2cTransaction::write(ADDR, vec![0x3E, 0x00, 0x00, 0x00, 0x00]),
        ]);
        block_on(robot.drive(Motor::Both, Direction::Forward, 0)).unwrap();
        testutil::verify(robot);
    }

    #[test]
    fn stop_zeroes_all_four_drive_channels() {
        let mut robot = testutil::robot(&[
            I2cTransaction::write(ADDR, vec![0x36, 0x00, 0x00, 0x00, 0x00]),
            I2cTransaction::write(ADDR, vec![0x3A, 0x00, 0x00, 0x00, 0x00]),
            I2cTransaction::write(ADDR, vec![0x42, 0x00, 0x00, 0x00, 0x00]),
            I2cTransaction::write(ADDR, vec![0x3E, 0x00, 0x00, 0x00, 0x00]),
        ]);
        block_on(robot.stop()).unwrap();
        testutil::verify(robot);
    }
}
