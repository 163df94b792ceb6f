//! Display frames and the digit codec
//!
//! A [`DisplayFrame`] holds the four BCD digits that are (or will be)
//! latched onto the tubes, leftmost tube first. Digits are validated at
//! construction; everything downstream of this module may assume 0-9.

/// Errors produced by the digit codec.
///
/// All of these are input-validation failures detected before any hardware
/// write; a rejected call changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A digit argument was greater than 9
    InvalidDigit,
    /// Hour greater than 23 or minute greater than 59
    InvalidTime,
    /// Number greater than 9999
    InvalidNumber,
}

/// A validated four-digit frame in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    digits: [u8; 4],
}

impl DisplayFrame {
    /// Create a frame from four raw digits.
    pub fn new(digits: [u8; 4]) -> Result<Self, FrameError> {
        if digits.iter().any(|&d| d > 9) {
            return Err(FrameError::InvalidDigit);
        }
        Ok(Self { digits })
    }

    /// Encode an hour/minute pair as HH:MM.
    pub fn from_time(hour: u8, minute: u8) -> Result<Self, FrameError> {
        if hour > 23 || minute > 59 {
            return Err(FrameError::InvalidTime);
        }
        Ok(Self {
            digits: [hour / 10, hour % 10, minute / 10, minute % 10],
        })
    }

    /// Encode a number right-aligned over all four tubes.
    pub fn from_number(number: u16) -> Result<Self, FrameError> {
        if number > 9999 {
            return Err(FrameError::InvalidNumber);
        }
        Ok(Self {
            digits: [
                (number / 1000 % 10) as u8,
                (number / 100 % 10) as u8,
                (number / 10 % 10) as u8,
                (number % 10) as u8,
            ],
        })
    }

    /// The four digits in display order.
    pub fn digits(&self) -> [u8; 4] {
        self.digits
    }

    /// Pack the frame into the two shift-register bytes, in transmit order.
    ///
    /// The register chain expects digit 3 in the low nibble and digit 4 in
    /// the high nibble of the first byte, then digits 1/2 the same way;
    /// both bytes go out MSB-first. This layout is fixed by the board
    /// wiring and must not change.
    pub fn to_shift_bytes(&self) -> [u8; 2] {
        let [d1, d2, d3, d4] = self.digits;
        [d3 | (d4 << 4), d1 | (d2 << 4)]
    }

    /// Every digit advanced by one, 9 wrapping back to 0.
    ///
    /// One step of the cathode-depolarization cycle: repeated often
    /// enough, every cathode in every tube gets its turn to burn.
    pub fn incremented(&self) -> Self {
        let mut digits = self.digits;
        for d in &mut digits {
            *d = (*d + 1) % 10;
        }
        Self { digits }
    }

    /// Digits rotated one tube to the right, the last wrapping around to
    /// the front.
    pub fn rotated_right(&self) -> Self {
        let [d1, d2, d3, d4] = self.digits;
        Self {
            digits: [d4, d1, d2, d3],
        }
    }
}
