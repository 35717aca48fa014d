use std::env;
use std::fs;
use std::path::PathBuf;

/// Build-time overrides for the soak test configuration.
///
/// Each variable is forwarded to the crate as a `rustc-env` value. An empty
/// value means "use the built-in default".
const SOAK_ENV_VARS: [&str; 5] = [
    "EEPROM_SOAK_ITERATIONS",
    "EEPROM_SOAK_FREQ_HZ",
    "EEPROM_SOAK_DELAY_US",
    "EEPROM_SOAK_VERBOSE",
    "EEPROM_SOAK_BOARD",
];

fn main() {
    // Read soak test configuration from environment variables (optional)
    for name in SOAK_ENV_VARS {
        if let Ok(value) = env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
            println!("cargo:warning=Using {} from environment: {}", name, value);
        } else {
            println!("cargo:rustc-env={}=", name);
        }
        println!("cargo:rerun-if-env-changed={}", name);
    }

    // Linker setup only applies to the RP2350 firmware build
    if env::var_os("CARGO_FEATURE_PICO2_W").is_some() {
        let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
        fs::copy("memory.x", out.join("memory.x")).expect("failed to copy memory.x");
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rerun-if-changed=memory.x");

        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
        println!("cargo:rustc-link-arg-tests=--nmagic");
        println!("cargo:rustc-link-arg-tests=-Tlink.x");
        println!("cargo:rustc-link-arg-tests=-Tdefmt.x");
    }
}
