//! Hexadecimal rendering shared by `Display` and `defmt`
//!
//! `defmt` has no zero-padded hex hint that behaves like `{:02X}`, so these
//! wrappers render the digits themselves.

use core::fmt;

#[cfg_attr(not(feature = "pico2_w"), allow(dead_code))]
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[cfg_attr(not(feature = "pico2_w"), allow(dead_code))]
fn nibble(value: u8) -> char {
    HEX_DIGITS[(value & 0x0F) as usize] as char
}

/// Byte rendered as `0xNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexByte(pub u8);

/// Word rendered as `0xNNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexWord(pub u16);

impl fmt::Display for HexByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl fmt::Display for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

#[cfg(feature = "pico2_w")]
impl defmt::Format for HexByte {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{=char}{=char}", nibble(self.0 >> 4), nibble(self.0))
    }
}

#[cfg(feature = "pico2_w")]
impl defmt::Format for HexWord {
    fn format(&self, f: defmt::Formatter) {
        let [hi, lo] = self.0.to_be_bytes();
        defmt::write!(
            f,
            "0x{=char}{=char}{=char}{=char}",
            nibble(hi >> 4),
            nibble(hi),
            nibble(lo >> 4),
            nibble(lo)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_byte() {
        assert_eq!(format!("{}", HexByte(0x02)), "0x02");
        assert_eq!(format!("{}", HexByte(0xA0)), "0xA0");
    }

    #[test]
    fn test_hex_word() {
        assert_eq!(format!("{}", HexWord(0x0000)), "0x0000");
        assert_eq!(format!("{}", HexWord(0x7FFF)), "0x7FFF");
    }

    #[test]
    fn test_nibble() {
        assert_eq!(nibble(0x0A), 'A');
        assert_eq!(nibble(0xF3), '3');
    }
}
