//! Driver for a PCA9685-based educational robot car.
//!
//! The car routes every actuator through a 16-channel PCA9685 PWM controller
//! on the I2C bus: drive motors, RGB headlights, servos and the small
//! indicator LEDs next to the sensors are all PWM channels. Sensors (line
//! readers, obstacle detector, ultrasonic rangefinder) come in over analog
//! and digital pins, and a short smart LED strip plus a melody buzzer round
//! out the board.
//!
//! [`Robot`] is the high level interface and is generic over the bus, the
//! delay provider and a handful of small capability traits, so the whole
//! crate builds and tests on the host. The `firmware` feature adds an
//! RP2350/embassy reference implementation of those capabilities together
//! with a demo binary.

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
mod headlights;
pub mod io;
mod line;
pub mod melody;
mod motor;
mod obstacle;
pub mod pca9685;
mod robot;
mod servo;
pub mod strip;
mod ultrasonic;

#[cfg(feature = "firmware")]
pub mod firmware;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{BoardConfig, MotorChannels};
pub use error::Error;
pub use io::{AnalogInput, PulseInput};
pub use line::{LineState, Side};
pub use melody::{Melody, MelodyPlayer};
pub use motor::{Direction, Motor};
pub use obstacle::ObstacleState;
pub use pca9685::Pca9685;
pub use robot::{Robot, Sensors};
pub use servo::Servo;
pub use strip::{LedStrip, Rgb, STRIP_LEN};
pub use ultrasonic::DistanceUnit;
