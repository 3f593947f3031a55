//! Melody buzzer task.
//!
//! Renders the built-in melodies as short tone phrases on a PWM output. The
//! full tunes live in the block runtime's music bank; the firmware keeps a
//! recognizable opening phrase per melody so selection is audible on the
//! real board. A melody requested while another is playing replaces it.

use embassy_futures::select::{select, Either};
use embassy_rp::pwm::{self, Pwm, SetDutyCycle};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;

use crate::firmware::resources::BuzzerResources;
use crate::melody::{Melody, MelodyPlayer};

/// Melody requests from the control side. Capacity 1: a pending request is
/// enough, anything newer replaces it.
static MELODY: Channel<CriticalSectionRawMutex, Melody, 1> = Channel::new();

/// Cheap handle handed to the [`crate::Robot`]; forwards requests to the
/// buzzer task.
pub struct BuzzerHandle;

impl MelodyPlayer for BuzzerHandle {
    fn play(&mut self, melody: Melody) {
        // Drop the stale request if the task has not picked it up yet.
        if MELODY.try_send(melody).is_err() {
            let _ = MELODY.try_receive();
            let _ = MELODY.try_send(melody);
        }
    }
}

/// One note: frequency in Hz (0 is a rest) and duration in milliseconds.
type Note = (u32, u32);

const C4: u32 = 262;
const D4: u32 = 294;
const E4: u32 = 330;
const F4: u32 = 349;
const G4: u32 = 392;
const A4: u32 = 440;
const B4: u32 = 494;
const C5: u32 = 523;
const D5: u32 = 587;
const E5: u32 = 659;
const G5: u32 = 784;
const REST: u32 = 0;

/// Opening phrase per melody.
fn phrase(melody: Melody) -> &'static [Note] {
    match melody {
        Melody::Dadadadum => &[(G4, 180), (G4, 180), (G4, 180), (311, 700)],
        Melody::Entertainer => &[(D4, 120), (E4, 120), (C4, 240), (E4, 120), (C4, 360)],
        Melody::Prelude => &[(C4, 150), (E4, 150), (G4, 150), (C5, 150), (E5, 300)],
        Melody::Ode => &[(E4, 200), (E4, 200), (F4, 200), (G4, 200), (G4, 200), (F4, 200)],
        Melody::Nyan => &[(D5, 120), (E5, 120), (D5, 120), (G4, 120), (A4, 240)],
        Melody::Ringtone => &[(C5, 120), (D5, 120), (E5, 120), (G5, 240)],
        Melody::Funk => &[(C4, 100), (C4, 100), (REST, 100), (C4, 100), (E4, 200)],
        Melody::Blues => &[(C4, 200), (E4, 200), (G4, 200), (A4, 200), (466, 200), (A4, 200)],
        Melody::Birthday => &[(C4, 200), (C4, 100), (D4, 300), (C4, 300), (F4, 300), (E4, 500)],
        Melody::Wedding => &[(C4, 200), (F4, 150), (F4, 150), (F4, 400)],
        Melody::Funeral => &[(C4, 400), (C4, 200), (C4, 400), (311, 300), (D4, 300)],
        Melody::Punchline => &[(C5, 120), (G4, 120), (REST, 120), (415, 400)],
        Melody::Baddy => &[(C4, 200), (REST, 100), (370, 200), (F4, 300)],
        Melody::Chase => &[(A4, 100), (C5, 100), (E5, 100), (A4, 100), (C5, 100), (E5, 100)],
        Melody::BaDing => &[(B4, 80), (E5, 300)],
        Melody::Wawawawaa => &[(E5, 400), (D5, 400), (C5, 400), (B4, 800)],
        Melody::JumpUp => &[(C4, 80), (D4, 80), (E4, 80), (F4, 80), (G4, 160)],
        Melody::JumpDown => &[(G4, 80), (F4, 80), (E4, 80), (D4, 80), (C4, 160)],
        Melody::PowerUp => &[(C4, 120), (E4, 120), (G4, 120), (C5, 300)],
        Melody::PowerDown => &[(C5, 120), (G4, 120), (E4, 120), (C4, 300)],
    }
}

/// PWM config producing a square wave at `freq_hz` with 50% duty.
fn tone_config(freq_hz: u32) -> pwm::Config {
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();
    let divider = ((clock_freq_hz / freq_hz) / 65535 + 1) as u8;
    let top = (clock_freq_hz / (freq_hz * u32::from(divider))) as u16 - 1;

    let mut config = pwm::Config::default();
    config.divider = divider.into();
    config.top = top;
    config.compare_a = top / 2;
    config
}

/// Plays requested melodies on the buzzer, one at a time.
#[embassy_executor::task]
pub async fn buzzer(r: BuzzerResources) {
    let mut pwm = Pwm::new_output_a(r.slice, r.pin, pwm::Config::default());
    let _ = pwm.set_duty_cycle_fully_off();

    let mut melody = MELODY.receive().await;
    'melody: loop {
        defmt::info!("playing melody {}", melody);
        for &(freq, ms) in phrase(melody) {
            if freq == REST {
                let _ = pwm.set_duty_cycle_fully_off();
            } else {
                pwm.set_config(&tone_config(freq));
            }
            // A new request interrupts the current melody.
            if let Either::Second(next) =
                select(Timer::after_millis(u64::from(ms)), MELODY.receive()).await
            {
                melody = next;
                continue 'melody;
            }
        }
        let _ = pwm.set_duty_cycle_fully_off();
        melody = MELODY.receive().await;
    }
}
