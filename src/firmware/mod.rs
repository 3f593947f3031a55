//! RP2350 reference firmware.
//!
//! Implements the crate's capability seams on an RP2350 carrier board and
//! ships a small demo binary: resource assignment, ADC/GPIO/PIO adapters, a
//! buzzer task rendering the built-in melodies and a control task driving
//! the robot. Everything here is gated behind the `firmware` feature so the
//! driver library stays host-buildable.

pub mod buzzer;
pub mod control;
pub mod io;
pub mod resources;
