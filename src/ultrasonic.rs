//! Ultrasonic distance measurement.
//!
//! Classic HC-SR04 style rangefinder: a short trigger pulse starts a burst
//! and the echo pin goes high for as long as the sound takes to come back.
//! 42 µs of echo correspond to one centimeter of distance.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::io::PulseInput;
use crate::robot::Robot;

/// Unit of a distance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceUnit {
    /// Rounded centimeters.
    Centimeters,
    /// Raw echo pulse duration in microseconds.
    Microseconds,
}

/// Echo microseconds per centimeter of distance.
const US_PER_CM: u32 = 42;

impl<I2C, D, A, O, E, S, M> Robot<I2C, D, A, O, E, S, M>
where
    I2C: I2c,
    D: DelayNs,
    O: OutputPin,
    E: PulseInput,
{
    /// Measures the distance to whatever is in front of the sensor.
    ///
    /// The echo wait is bounded by the configured maximum range; an echo
    /// that does not arrive in time is an [`Error::EchoTimeout`]. Each
    /// measurement ends with a 50 ms settle pause so back-to-back calls do
    /// not catch the previous burst's reflections.
    pub async fn measure_distance(&mut self, unit: DistanceUnit) -> Result<u32, Error<I2C::Error>> {
        self.trigger.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_us(2).await;
        self.trigger.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_us(15).await;
        self.trigger.set_low().map_err(|_| Error::Pin)?;

        let timeout_us = self.config.max_range_cm * US_PER_CM;
        let raw = self.echo.measure_high_us(timeout_us).await;
        self.delay.delay_ms(50).await;

        let raw = raw.ok_or(Error::EchoTimeout)?;
        Ok(match unit {
            // Round to the nearest centimeter.
            DistanceUnit::Centimeters => (raw + US_PER_CM / 2) / US_PER_CM,
            DistanceUnit::Microseconds => raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::digital::{State, Transaction as PinTransaction};

    fn trigger_pulse() -> [PinTransaction; 3] {
        [
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
        ]
    }

    #[test]
    fn echo_time_converts_to_rounded_centimeters() {
        let mut robot = testutil::robot_with_pins(&[], &[], &trigger_pulse());
        robot.echo.raw_us = Some(420);
        assert_eq!(
            block_on(robot.measure_distance(DistanceUnit::Centimeters)).unwrap(),
            10
        );
        testutil::verify(robot);
    }

    #[test]
    fn centimeters_round_half_up() {
        // 441 µs is exactly 10.5 cm.
        let mut robot = testutil::robot_with_pins(&[], &[], &trigger_pulse());
        robot.echo.raw_us = Some(441);
        assert_eq!(
            block_on(robot.measure_distance(DistanceUnit::Centimeters)).unwrap(),
            11
        );
        testutil::verify(robot);
    }

    #[test]
    fn microseconds_return_the_raw_pulse() {
        let mut robot = testutil::robot_with_pins(&[], &[], &trigger_pulse());
        robot.echo.raw_us = Some(1234);
        assert_eq!(
            block_on(robot.measure_distance(DistanceUnit::Microseconds)).unwrap(),
            1234
        );
        testutil::verify(robot);
    }

    #[test]
    fn echo_wait_is_bounded_by_the_range_ceiling() {
        let mut robot = testutil::robot_with_pins(&[], &[], &trigger_pulse());
        robot.echo.raw_us = Some(0);
        block_on(robot.measure_distance(DistanceUnit::Microseconds)).unwrap();
        // Default ceiling is 500 cm, 21000 µs of echo.
        assert_eq!(robot.echo.seen_timeout_us, Some(21_000));
        testutil::verify(robot);
    }

    #[test]
    fn missing_echo_is_a_timeout_error() {
        let mut robot = testutil::robot_with_pins(&[], &[], &trigger_pulse());
        robot.echo.raw_us = None;
        assert_eq!(
            block_on(robot.measure_distance(DistanceUnit::Centimeters)),
            Err(crate::error::Error::EchoTimeout)
        );
        testutil::verify(robot);
    }
}
