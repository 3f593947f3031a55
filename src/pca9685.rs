//! PCA9685 16-channel PWM controller driver.
//!
//! Minimal async driver for the chip the car hangs all of its actuators on.
//! The controller is brought up lazily: the first channel write initializes
//! the chip and programs the output frequency, later writes go straight to
//! the channel registers. A failed bring-up leaves the driver uninitialized
//! so the next write retries it.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::error::Error;

/// PCA9685 register addresses
const MODE1: u8 = 0x00;
const PRESCALE: u8 = 0xFE;
const LED0_ON_L: u8 = 0x06;

/// MODE1 bits
const MODE1_SLEEP: u8 = 0x10;
const MODE1_RESTART_AI_ALLCALL: u8 = 0xA1;

/// Internal oscillator, 25 MHz
const OSC_CLOCK_HZ: f32 = 25_000_000.0;

/// 12-bit counter, 4096 ticks per frame
const TICKS_PER_FRAME: f32 = 4096.0;

/// Async PCA9685 driver.
///
/// Owns the bus handle and a delay provider for the oscillator restart wait.
pub struct Pca9685<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    pwm_hz: u16,
    initialized: bool,
}

impl<I2C, D> Pca9685<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a driver for the chip at `address`, outputting at `pwm_hz`.
    ///
    /// No bus traffic happens here; the chip is initialized on the first
    /// channel write.
    pub fn new(i2c: I2C, delay: D, address: u8, pwm_hz: u16) -> Self {
        Self {
            i2c,
            delay,
            address,
            pwm_hz,
            initialized: false,
        }
    }

    /// Sets the on and off tick (0-4095) of a channel within the PWM frame.
    ///
    /// Channels outside 0-15 are rejected before any bus traffic. The whole
    /// channel update goes out as a single auto-increment write.
    pub async fn set_channel(
        &mut self,
        channel: u8,
        on: u16,
        off: u16,
    ) -> Result<(), Error<I2C::Error>> {
        if channel > 15 {
            return Err(Error::InvalidChannel);
        }
        if !self.initialized {
            self.init().await?;
        }

        let buf = [
            LED0_ON_L + 4 * channel,
            (on & 0xff) as u8,
            (on >> 8) as u8,
            (off & 0xff) as u8,
            (off >> 8) as u8,
        ];
        self.i2c.write(self.address, &buf).await.map_err(Error::Bus)
    }

    /// Releases the underlying bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(MODE1, 0x00).await?;
        self.set_frequency(self.pwm_hz).await?;
        // Only mark initialized once the whole sequence went through, so a
        // failed bring-up is retried on the next write.
        self.initialized = true;
        Ok(())
    }

    /// Programs the prescaler for the given output frequency.
    ///
    /// The chip only accepts prescale writes while sleeping, so the current
    /// mode is saved, sleep entered, and the oscillator restarted afterwards.
    async fn set_frequency(&mut self, freq_hz: u16) -> Result<(), Error<I2C::Error>> {
        let prescale =
            (libm::roundf(OSC_CLOCK_HZ / (TICKS_PER_FRAME * f32::from(freq_hz))) - 1.0) as u8;
        #[cfg(feature = "defmt")]
        defmt::trace!("pca9685 bring-up: {} Hz, prescale {}", freq_hz, prescale);

        let old_mode = self.read_register(MODE1).await?;
        self.write_register(MODE1, (old_mode & 0x7F) | MODE1_SLEEP)
            .await?;
        self.write_register(PRESCALE, prescale).await?;
        self.write_register(MODE1, old_mode).await?;
        // Oscillator needs time to come back before restart is allowed.
        self.delay.delay_us(5000).await;
        self.write_register(MODE1, old_mode | MODE1_RESTART_AI_ALLCALL)
            .await
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(Error::Bus)
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }
}
