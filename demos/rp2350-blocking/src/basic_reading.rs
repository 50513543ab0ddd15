//! Basic magnetometer reading example for QMC5883L on Raspberry Pi Pico 2 (blocking)
//!
//! This example demonstrates:
//! - Device initialization and identity check
//! - Continuous measurement configuration at 50 Hz
//! - Polling the data-ready flag and reading field + temperature
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VCC: 3.3V
//! - GND: GND

#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler},
    peripherals::I2C0,
};
use embassy_time::Duration;
use panic_probe as _;
use qmc5883l::{
    FieldRange, I2cInterface, MagConfig, OverSampleRatio, Qmc5883lDriver, UpdateRate,
    DEFAULT_TEMPERATURE_COEFFICIENT,
};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Bind I2C interrupts
bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("QMC5883L Basic Reading Example");

    let p = embassy_rp::init(Config::default());

    // Configure I2C at 400kHz on pins 12(SDA)/13(SCL)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);

    let interface = I2cInterface::default(i2c);
    let mut mag = Qmc5883lDriver::new(interface);

    if let Err(e) = mag.init() {
        error!("Failed to initialize QMC5883L: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }

    match mag.chip_id() {
        Ok(id) => info!("Chip ID: {=u8:#x}", id),
        Err(e) => warn!("Chip ID read failed: {:?}", e),
    }

    // Continuous measurement: 50 Hz, ±2 Gauss, OSR 512
    let config = MagConfig {
        continuous: true,
        update_rate: UpdateRate::Hz50,
        field_range: FieldRange::Gauss2,
        oversample: OverSampleRatio::Osr512,
    };
    if let Err(e) = mag.start_measurement(config) {
        error!("Failed to start measurement: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }

    let cycle_ms = mag.conversion_cycle_ms().unwrap_or(100);
    info!("Conversion cycle: {} ms", cycle_ms);

    loop {
        embassy_time::block_for(Duration::from_millis(cycle_ms as u64));

        match mag.next_measurement() {
            Ok(Some(sample)) => {
                let ut = sample.to_microteslas(config.field_range);
                info!(
                    "field: x={} y={} z={} (|B|={} µT)",
                    ut.x,
                    ut.y,
                    ut.z,
                    ut.magnitude()
                );

                if let Ok(temp) = mag.read_temperature(DEFAULT_TEMPERATURE_COEFFICIENT) {
                    info!("temperature (uncalibrated offset): {} °C", temp);
                }
            }
            Ok(None) => {
                // Device not ready yet; poll again next cycle
            }
            Err(e) => {
                error!("Read failed: {:?}", e);
            }
        }
    }
}
