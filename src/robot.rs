//! High level robot interface.
//!
//! [`Robot`] ties the PWM controller, the sensor inputs and the two
//! standalone peripherals (LED strip, melody buzzer) together behind one
//! owner. Operations on it live next to their subsystem: motors in
//! [`crate::motor`], headlights in [`crate::headlights`], and so on.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::BoardConfig;
use crate::io::{AnalogInput, PulseInput};
use crate::melody::{Melody, MelodyPlayer};
use crate::pca9685::Pca9685;
use crate::strip::LedStrip;

/// Sensor-side wiring handed to [`Robot::new`].
pub struct Sensors<A, O, E> {
    /// Left line sensor analog input.
    pub line_left: A,
    /// Right line sensor analog input.
    pub line_right: A,
    /// Obstacle sensor analog value input.
    pub obstacle_value: A,
    /// Obstacle sensor enable pin, pulled low while sampling.
    pub obstacle_enable: O,
    /// Ultrasonic trigger pin.
    pub trigger: O,
    /// Ultrasonic echo pin.
    pub echo: E,
}

/// The car.
///
/// Generic over the I2C bus `I2C`, delay provider `D`, analog inputs `A`,
/// output pins `O`, the echo pulse input `E`, the LED strip `S` and the
/// melody player `M`.
pub struct Robot<I2C, D, A, O, E, S, M> {
    pub(crate) pwm: Pca9685<I2C, D>,
    pub(crate) delay: D,
    pub(crate) line_left: A,
    pub(crate) line_right: A,
    pub(crate) obstacle_value: A,
    pub(crate) obstacle_enable: O,
    pub(crate) trigger: O,
    pub(crate) echo: E,
    pub(crate) strip: S,
    pub(crate) player: M,
    pub(crate) config: BoardConfig,
}

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
    A: AnalogInput,
    O: OutputPin,
    E: PulseInput,
    S: LedStrip,
    M: MelodyPlayer,
{
    /// Assembles a robot from its peripherals.
    ///
    /// `delay` is used for the ultrasonic trigger timing; the PWM controller
    /// carries its own delay provider for chip bring-up.
    pub fn new(
        pwm: Pca9685<I2C, D>,
        delay: D,
        sensors: Sensors<A, O, E>,
        strip: S,
        player: M,
        config: BoardConfig,
    ) -> Self {
        Self {
            pwm,
            delay,
            line_left: sensors.line_left,
            line_right: sensors.line_right,
            obstacle_value: sensors.obstacle_value,
            obstacle_enable: sensors.obstacle_enable,
            trigger: sensors.trigger,
            echo: sensors.echo,
            strip,
            player,
            config,
        }
    }

    /// Borrows the smart LED strip.
    pub fn strip(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Starts one of the built-in melodies on the buzzer and returns
    /// immediately. Playback runs once.
    pub fn play_melody(&mut self, melody: Melody) {
        self.player.play(melody);
    }

    /// The active channel map and tuning constants.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::melody::Melody;
    use crate::strip::{LedStrip, Rgb};
    use crate::testutil;
    use embassy_futures::block_on;

    #[test]
    fn play_melody_reaches_the_player() {
        let mut robot = testutil::robot(&[]);
        robot.play_melody(Melody::Birthday);
        robot.play_melody(Melody::PowerDown);
        assert_eq!(robot.player.played, vec![Melody::Birthday, Melody::PowerDown]);
        testutil::verify(robot);
    }

    #[test]
    fn strip_is_borrowable_for_direct_writes() {
        let mut robot = testutil::robot(&[]);
        block_on(robot.strip().write(&[Rgb::new(1, 2, 3)]));
        assert_eq!(robot.strip.frames.len(), 1);
        assert_eq!(robot.strip.frames[0], vec![Rgb::new(1, 2, 3)]);
        testutil::verify(robot);
    }
}
