//! Robot firmware entry point.
//!
//! Initializes the RP2350, assigns resources and spawns the buzzer and
//! control tasks.

#![no_std]
#![no_main]

use edubot::firmware::resources::{
    self, AssignedResources, BuzzerResources, ExpansionBoardResources, LineSensorResources,
    ObstacleSensorResources, StripResources, UltrasonicResources,
};
use edubot::firmware::{buzzer, control};
use edubot::split_resources;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // The shared ADC has to exist before any task samples an analog input.
    resources::init_adc(p.ADC);

    let r = split_resources!(p);

    spawner.spawn(buzzer::buzzer(r.buzzer)).unwrap();
    spawner
        .spawn(control::control(
            r.expansion_board,
            r.line_sensors,
            r.obstacle_sensor,
            r.ultrasonic,
            r.strip,
        ))
        .unwrap();
}
