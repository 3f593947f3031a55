//! Addressable LED strip seam.
//!
//! The chassis carries a short WS2812 strip. The firmware drives it over
//! PIO; tests substitute an in-memory recorder. Everything above the seam
//! works in [`Rgb`] triples and stays independent of the transport.

/// Number of LEDs on the chassis strip.
pub const STRIP_LEN: usize = 3;

/// One LED color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Latches a frame of colors onto the strip.
///
/// Slices shorter than [`STRIP_LEN`] leave the remaining LEDs dark;
/// longer slices are truncated.
pub trait LedStrip {
    async fn write(&mut self, colors: &[Rgb]);
}
