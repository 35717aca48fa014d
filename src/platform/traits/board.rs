//! Board I2C pin table
//!
//! Maps a board identifier to the I2C controller and SDA/SCL pins the EEPROM
//! is wired to. The identifier is selected once at startup (see
//! `SoakConfig::board`) instead of branching on the build target.

/// I2C pin assignment for one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct BoardI2cPins {
    /// Board identifier
    pub board: &'static str,
    /// I2C controller index (0 for I2C0, 1 for I2C1)
    pub bus: u8,
    /// SDA GPIO number
    pub sda: u8,
    /// SCL GPIO number
    pub scl: u8,
}

/// Pin configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PinError {
    /// No table entry for the requested board identifier
    UnknownBoard,
    /// Controller index does not exist on this platform
    InvalidBus(u8),
    /// GPIO number is outside valid range for platform
    InvalidGpio(u8),
    /// GPIO cannot carry the requested I2C function (GPIO number)
    WrongFunction(u8),
    /// SDA and SCL assigned to the same pin
    DuplicatePin(u8),
}

/// Known boards
///
/// The first entry is the default used when no board is configured.
pub static I2C_BOARDS: &[BoardI2cPins] = &[
    // Raspberry Pi Pico 2 W, EEPROM breakout on GP4/GP5
    BoardI2cPins {
        board: "pico2_w",
        bus: 0,
        sda: 4,
        scl: 5,
    },
    // Raspberry Pi Pico 2, same header wiring as the W variant
    BoardI2cPins {
        board: "pico2",
        bus: 0,
        sda: 4,
        scl: 5,
    },
    // Pico 2 W with the EEPROM on the first header pins
    BoardI2cPins {
        board: "pico2_w_gp0",
        bus: 0,
        sda: 0,
        scl: 1,
    },
    // Adafruit Feather RP2350, STEMMA QT connector
    BoardI2cPins {
        board: "feather_rp2350",
        bus: 1,
        sda: 2,
        scl: 3,
    },
];

/// Look up the pin assignment for a board identifier
///
/// An empty identifier selects the default (first) board.
pub fn find_board(board: &str) -> Result<&'static BoardI2cPins, PinError> {
    if board.is_empty() {
        return I2C_BOARDS.first().ok_or(PinError::UnknownBoard);
    }
    I2C_BOARDS
        .iter()
        .find(|entry| entry.board.eq_ignore_ascii_case(board))
        .ok_or(PinError::UnknownBoard)
}

impl BoardI2cPins {
    /// Validate the pin assignment against the RP2350 pin mux
    ///
    /// Checks that:
    /// - The controller is I2C0 or I2C1
    /// - Both GPIO numbers are within range
    /// - SDA and SCL are distinct
    /// - Each pin carries the requested function on the requested controller
    ///   (I2C0: SDA on GPIO 4n, SCL on 4n+1; I2C1: SDA on 4n+2, SCL on 4n+3)
    pub fn validate(&self) -> Result<(), PinError> {
        const RP2350_MAX_GPIO: u8 = 29;

        if self.bus > 1 {
            return Err(PinError::InvalidBus(self.bus));
        }
        for gpio in [self.sda, self.scl] {
            if gpio > RP2350_MAX_GPIO {
                return Err(PinError::InvalidGpio(gpio));
            }
        }
        if self.sda == self.scl {
            return Err(PinError::DuplicatePin(self.sda));
        }

        let sda_slot = self.bus * 2;
        if self.sda % 4 != sda_slot {
            return Err(PinError::WrongFunction(self.sda));
        }
        if self.scl % 4 != sda_slot + 1 {
            return Err(PinError::WrongFunction(self.scl));
        }

        Ok(())
    }
}
