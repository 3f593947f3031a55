//! RGB headlight control.
//!
//! The headlights are a common-cathode RGB LED on three PWM channels.
//! Intensities come in as 0-100 so they read naturally in the classroom and
//! get scaled onto the 12-bit frame here.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::robot::Robot;

/// Scales a 0-100 intensity to the PWM off tick, 40 ticks per step.
///
/// The clamp only engages once the raw product exceeds the frame length,
/// so 100 maps to 4000 and everything from 103 up saturates at 4095.
fn intensity_ticks(intensity: u8) -> u16 {
    let raw = u32::from(intensity) * 40;
    if raw > 4096 {
        4095
    } else {
        raw as u16
    }
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Sets the headlight color from three 0-100 channel intensities.
    pub async fn set_headlights(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.pwm
            .set_channel(self.config.red_channel, 0, intensity_ticks(red))
            .await?;
        self.pwm
            .set_channel(self.config.green_channel, 0, intensity_ticks(green))
            .await?;
        self.pwm
            .set_channel(self.config.blue_channel, 0, intensity_ticks(blue))
            .await
    }
}
