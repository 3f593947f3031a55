//! Adapters from RP2350 peripherals to the crate's capability traits.

use embassy_rp::adc::Channel as AdcChannel;
use embassy_rp::gpio::Input;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{with_timeout, Duration, Instant};
use smart_leds::RGB8;

use crate::firmware::resources::{self, Irqs, StripResources};
use crate::io::{AnalogInput, PulseInput};
use crate::strip::{LedStrip, Rgb, STRIP_LEN};

/// Analog input sampled through the shared ADC.
pub struct AdcInput {
    channel: AdcChannel<'static>,
}

impl AdcInput {
    pub fn new(channel: AdcChannel<'static>) -> Self {
        Self { channel }
    }
}

impl AnalogInput for AdcInput {
    async fn read(&mut self) -> u16 {
        let mut adc = resources::adc().lock().await;
        let adc = adc.as_mut().unwrap();
        match adc.read(&mut self.channel).await {
            // The RP2350 converter is 12-bit, the driver thresholds are on
            // the 10-bit scale.
            Ok(raw) => raw >> 2,
            Err(_) => 0,
        }
    }
}

/// Echo pulse measurement on a GPIO input.
pub struct EchoPin {
    pin: Input<'static>,
}

impl EchoPin {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }
}

impl PulseInput for EchoPin {
    async fn measure_high_us(&mut self, timeout_us: u32) -> Option<u32> {
        let measured = with_timeout(Duration::from_micros(u64::from(timeout_us)), async {
            self.pin.wait_for_high().await;
            let start = Instant::now();
            self.pin.wait_for_low().await;
            start.elapsed()
        })
        .await;
        measured.ok().map(|elapsed| elapsed.as_micros() as u32)
    }
}

/// The chassis WS2812 strip behind a PIO state machine.
pub struct PioStrip {
    driver: PioWs2812<'static, PIO0, 0, STRIP_LEN>,
}

impl PioStrip {
    pub fn new(r: StripResources) -> Self {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(r.pio, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let driver = PioWs2812::new(&mut common, sm0, r.dma, r.data_pin, &program);
        Self { driver }
    }
}

impl LedStrip for PioStrip {
    async fn write(&mut self, colors: &[Rgb]) {
        let mut frame = [RGB8::default(); STRIP_LEN];
        for (slot, color) in frame.iter_mut().zip(colors) {
            *slot = RGB8::new(color.r, color.g, color.b);
        }
        self.driver.write(&frame).await;
    }
}
