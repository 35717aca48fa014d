//! I2C EEPROM soak test firmware
//!
//! Writes 0x66 to address 0x0000 of a 24LC256-class EEPROM and reads it back
//! 10000 times, reporting `{{success}}` or `{{failure}}` over defmt RTT.
//!
//! # Hardware
//! - EEPROM I2C address: 0x50 (A2..A0 tied low)
//! - Pins from the board table (default `pico2_w`: SDA GPIO 4, SCL GPIO 5)
//! - The RP2350 controller cannot hold the bus between calls, so the address
//!   write ends with STOP rather than a repeated START
//!
//! # Usage
//! ```bash
//! EEPROM_SOAK_DELAY_US=10 EEPROM_SOAK_BOARD=pico2_w \
//!     cargo run --release --features pico2_w --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{Config as EmbassyI2cConfig, I2c, Instance};
use embassy_time::{Duration, Timer};
use i2c_eeprom_soak::platform::rp2350::{DefmtReporter, Rp2350I2c, Rp2350Timer};
use i2c_eeprom_soak::platform::traits::{CompletionReporter, I2cConfig};
use i2c_eeprom_soak::soak::{self, SoakConfig};
use i2c_eeprom_soak::{log_error, log_info, log_warn};
use panic_probe as _;

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let config = SoakConfig::from_build_env();
    let mut reporter = DefmtReporter::new();

    let pins = match config.validate() {
        Ok(pins) => pins,
        Err(e) => {
            log_error!("Invalid soak configuration: {}", e);
            reporter.notify_completion(false);
            park().await
        }
    };

    log_info!("=== I2C EEPROM soak test ===");
    log_info!(
        "Board {}: I2C{} SDA=GPIO{} SCL=GPIO{}",
        pins.board,
        pins.bus,
        pins.sda,
        pins.scl
    );
    log_info!(
        "{} iterations, delay {} us, device {}",
        config.iterations,
        config.delay_us,
        i2c_eeprom_soak::core::HexByte(config.device_address_8bit())
    );
    log_warn!("RP2350: address writes end with STOP, repeated START timing is not exercised");

    // Driver default frequency; setup reprograms it through `set_frequency`
    let embassy_config = EmbassyI2cConfig::default();

    // Pin types are part of the constructor, not the driver, so each wiring
    // gets its own arm
    let passed = match (pins.bus, pins.sda, pins.scl) {
        (0, 4, 5) => run(
            I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, embassy_config),
            &config,
            &mut reporter,
        ),
        (0, 0, 1) => run(
            I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, embassy_config),
            &config,
            &mut reporter,
        ),
        (1, 2, 3) => run(
            I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, embassy_config),
            &config,
            &mut reporter,
        ),
        (1, 6, 7) => run(
            I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, embassy_config),
            &config,
            &mut reporter,
        ),
        _ => {
            log_error!(
                "No pin mapping for I2C{} SDA=GPIO{} SCL=GPIO{}",
                pins.bus,
                pins.sda,
                pins.scl
            );
            reporter.notify_completion(false);
            false
        }
    };

    log_info!("Soak test finished, passed = {}", passed);
    park().await
}

fn run<T: Instance>(
    i2c: I2c<'static, T, embassy_rp::i2c::Blocking>,
    config: &SoakConfig,
    reporter: &mut DefmtReporter,
) -> bool {
    let mut i2c = Rp2350I2c::new(i2c, I2cConfig::default());
    let mut timer = Rp2350Timer::new();
    soak::execute(&mut i2c, &mut timer, reporter, *config)
}

async fn park() -> ! {
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
