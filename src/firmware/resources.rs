//! Hardware resource assignment.
//!
//! Splits the RP2350 peripherals into per-task groups so ownership of every
//! pin is decided in one place. The ADC is the only shared peripheral: the
//! line and obstacle inputs all sample through it, so it lives behind a
//! mutex and tasks lock it per conversion.

use assign_resources::assign_resources;
use embassy_rp::adc::{Adc, Async as AdcAsync, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, ADC, I2C0, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Global ADC instance shared by the analog sensor inputs.
static ADC: Mutex<CriticalSectionRawMutex, Option<Adc<'static, AdcAsync>>> = Mutex::new(None);

/// Initializes the shared ADC. Must run once in main before any task that
/// samples an analog input is spawned.
pub fn init_adc(adc: ADC) {
    let adc = Adc::new(adc, Irqs, embassy_rp::adc::Config::default());
    critical_section::with(|_| {
        *ADC.try_lock().unwrap() = Some(adc);
    });
}

/// Returns the mutex-protected ADC. Lock, convert, release.
pub fn adc() -> &'static Mutex<CriticalSectionRawMutex, Option<Adc<'static, AdcAsync>>> {
    &ADC
}

assign_resources! {
    /// I2C bus to the PCA9685 expansion board
    expansion_board: ExpansionBoardResources {
        i2c: I2C0,
        scl_pin: PIN_13,
        sda_pin: PIN_12,
    },
    /// Reflectance line sensor analog inputs
    line_sensors: LineSensorResources {
        left_pin: PIN_26,
        right_pin: PIN_27,
    },
    /// IR obstacle sensor: analog value plus active-low enable
    obstacle_sensor: ObstacleSensorResources {
        value_pin: PIN_28,
        enable_pin: PIN_22,
    },
    /// HC-SR04 ultrasonic rangefinder pins
    ultrasonic: UltrasonicResources {
        trigger_pin: PIN_15,
        echo_pin: PIN_14,
    },
    /// WS2812 strip, driven over PIO
    strip: StripResources {
        pio: PIO0,
        dma: DMA_CH0,
        data_pin: PIN_16,
    },
    /// Melody buzzer PWM output
    buzzer: BuzzerResources {
        slice: PWM_SLICE1,
        pin: PIN_2,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});
