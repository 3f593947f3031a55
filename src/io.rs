//! Capability traits for the sensor side of the board.
//!
//! The robot only needs two small abilities from its platform: reading an
//! analog value and timing a pulse. Keeping them as traits lets the firmware
//! adapt whatever ADC and GPIO it has while host tests substitute fakes.

/// Analog sensor input on a 10-bit scale.
pub trait AnalogInput {
    /// Reads the current value. Implementations with a wider converter scale
    /// down to 10 bits so the line and obstacle thresholds keep their
    /// meaning.
    async fn read(&mut self) -> u16;
}

/// Measures the width of a high pulse on an input pin.
pub trait PulseInput {
    /// Waits for the pin to go high and returns how long it stays high, in
    /// microseconds. Returns `None` when the whole measurement does not
    /// complete within `timeout_us`.
    async fn measure_high_us(&mut self, timeout_us: u32) -> Option<u32>;
}
