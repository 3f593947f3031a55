//! Obstacle sensor reads.
//!
//! The IR obstacle sensor is powered through an active-low enable pin and
//! sampled on an analog input: readings below the threshold mean something
//! reflects the beam. Like the line sensors, every read drives an indicator
//! LED as a side effect.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::io::AnalogInput;
use crate::robot::Robot;

/// What the caller expects in front of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObstacleState {
    Detected,
    Clear,
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
    A: AnalogInput,
    O: OutputPin,
{
    /// Reads the obstacle sensor and reports whether it agrees with
    /// `expected`. The enable pin is pulled low for the duration of the
    /// sample and released afterwards.
    ///
    /// The two expectations compare strictly in opposite directions, so a
    /// reading exactly at the threshold matches neither and lights the
    /// indicator differently per branch. Kept from the original board
    /// firmware.
    pub async fn read_obstacle_sensor(
        &mut self,
        expected: ObstacleState,
    ) -> Result<bool, Error<I2C::Error>> {
        self.obstacle_enable.set_low().map_err(|_| Error::Pin)?;
        let reading = self.obstacle_value.read().await;

        let (matched, led) = match expected {
            ObstacleState::Detected => {
                if reading < self.config.obstacle_threshold {
                    (true, 0)
                } else {
                    (false, 4095)
                }
            }
            ObstacleState::Clear => {
                if reading > self.config.obstacle_threshold {
                    (true, 4095)
                } else {
                    (false, 0)
                }
            }
        };
        self.pwm
            .set_channel(self.config.obstacle_indicator, 0, led)
            .await?;

        self.obstacle_enable.set_high().map_err(|_| Error::Pin)?;
        Ok(matched)
    }
}
