//! Error type shared by all robot operations.

/// Errors surfaced by the driver.
///
/// `E` is the error type of the underlying I2C implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// PWM channel outside the 0-15 range. Nothing was written to the bus.
    InvalidChannel,
    /// The underlying I2C transfer failed.
    Bus(E),
    /// A GPIO collaborator could not be switched.
    Pin,
    /// No echo came back within the configured range ceiling.
    EchoTimeout,
}
