//! Board configuration.
//!
//! Collects the chip address, PWM channel assignments and sensor thresholds
//! in one place. [`BoardConfig::default`] matches the stock wiring of the
//! car; custom builds can override individual fields.

/// PWM channel pair driving one side of the H-bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorChannels {
    /// Channel energized for forward rotation.
    pub forward: u8,
    /// Channel energized for backward rotation.
    pub backward: u8,
}

/// Channel map and tuning constants for one robot build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// I2C address of the PCA9685.
    pub address: u8,
    /// PWM output frequency in Hz. 50 Hz gives the 20 ms frame the servos
    /// and motor driver expect.
    pub pwm_hz: u16,
    /// Headlight channels.
    pub red_channel: u8,
    pub green_channel: u8,
    pub blue_channel: u8,
    /// Drive motor channel pairs.
    pub left_motor: MotorChannels,
    pub right_motor: MotorChannels,
    /// First servo channel; S1, S2 and S3 sit on three consecutive
    /// channels starting here.
    pub servo_base: u8,
    /// Indicator LED channels lit by the sensor reads.
    pub left_line_indicator: u8,
    pub right_line_indicator: u8,
    pub obstacle_indicator: u8,
    /// Line sensor threshold on the 0-1023 analog scale. Readings below it
    /// count as a white surface.
    pub line_threshold: u16,
    /// Obstacle sensor threshold on the 0-1023 analog scale. Readings below
    /// it count as an obstacle.
    pub obstacle_threshold: u16,
    /// Upper bound for ultrasonic measurements, sets the echo timeout.
    pub max_range_cm: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            address: 0x41,
            pwm_hz: 50,
            red_channel: 0,
            green_channel: 1,
            blue_channel: 2,
            left_motor: MotorChannels {
                forward: 12,
                backward: 13,
            },
            right_motor: MotorChannels {
                forward: 15,
                backward: 14,
            },
            servo_base: 3,
            left_line_indicator: 7,
            right_line_indicator: 6,
            obstacle_indicator: 8,
            line_threshold: 500,
            obstacle_threshold: 800,
            max_range_cm: 500,
        }
    }
}
