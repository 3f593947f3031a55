//! Line sensor reads.
//!
//! Two downward-facing reflectance sensors report an analog value per side:
//! low over a bright surface, high over dark tape. Each read also drives the
//! indicator LED next to the sensor so the threshold is visible on the
//! chassis while a program runs.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::io::AnalogInput;
use crate::robot::Robot;

/// Which of the two line sensors to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Surface classification under a line sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    White,
    Black,
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
    A: AnalogInput,
{
    /// Reads one line sensor and reports whether it sees `expected`.
    ///
    /// The side's indicator LED lights while the sensor sees white and goes
    /// dark over black, independent of what was asked for.
    pub async fn read_line_sensor(
        &mut self,
        side: Side,
        expected: LineState,
    ) -> Result<bool, Error<I2C::Error>> {
        let (reading, indicator) = match side {
            Side::Left => (
                self.line_left.read().await,
                self.config.left_line_indicator,
            ),
            Side::Right => (
                self.line_right.read().await,
                self.config.right_line_indicator,
            ),
        };

        let seen = if reading < self.config.line_threshold {
            LineState::White
        } else {
            LineState::Black
        };
        let led = match seen {
            LineState::White => 4095,
            LineState::Black => 0,
        };
        self.pwm.set_channel(indicator, 0, led).await?;
        Ok(seen == expected)
    }
}
