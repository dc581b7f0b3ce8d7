//! Core protocol types: Buttons and DisplayRequest.

use core::ops::BitOr;

/// Button state represented as an 8-bit mask.
///
/// Layout, high bit to low bit: `RIGHT LEFT DOWN UP C B A START`.
/// This is the value handed out to callers of the button read request.
///
/// # Example
///
/// ```
/// use mtcp_proto::Buttons;
///
/// let buttons = Buttons::A | Buttons::UP;
/// assert!(buttons.contains(Buttons::A));
/// assert!(buttons.contains(Buttons::UP));
/// assert!(!buttons.contains(Buttons::DOWN));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u8);

impl Buttons {
    pub const START: Self = Self(1 << 0);
    pub const A: Self = Self(1 << 1);
    pub const B: Self = Self(1 << 2);
    pub const C: Self = Self(1 << 3);
    pub const UP: Self = Self(1 << 4);
    pub const DOWN: Self = Self(1 << 5);
    pub const LEFT: Self = Self(1 << 6);
    pub const RIGHT: Self = Self(1 << 7);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw mask.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// What the caller wants shown on the four digit display.
///
/// Digit 0 is the rightmost digit. Digit values keep only their low 4 bits,
/// and only the low 4 bits of each mask are kept, one bit per digit.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRequest {
    digits: [u8; 4],
    enabled: u8,
    decimals: u8,
}

impl DisplayRequest {
    /// Mask applied to digit values and to both per-digit masks.
    const NIBBLE: u8 = 0x0F;

    #[must_use]
    pub const fn new(digits: [u8; 4], enable_mask: u8, decimal_mask: u8) -> Self {
        Self {
            digits: [
                digits[0] & Self::NIBBLE,
                digits[1] & Self::NIBBLE,
                digits[2] & Self::NIBBLE,
                digits[3] & Self::NIBBLE,
            ],
            enabled: enable_mask & Self::NIBBLE,
            decimals: decimal_mask & Self::NIBBLE,
        }
    }

    /// Show a 16-bit value as four hex digits with every digit enabled.
    #[must_use]
    pub const fn hex(value: u16) -> Self {
        Self::from_packed(0x000F_0000 | value as u32)
    }

    /// Unpack the 32-bit argument word of the set-LED request.
    ///
    /// ```text
    /// bits  0..16  four hex digits, digit 0 in bits 0..4
    /// bits 16..20  digit enable mask
    /// bits 24..28  decimal point mask
    /// ```
    ///
    /// All other bits are ignored.
    #[must_use]
    pub const fn from_packed(word: u32) -> Self {
        Self::new(
            [
                word as u8,
                (word >> 4) as u8,
                (word >> 8) as u8,
                (word >> 12) as u8,
            ],
            (word >> 16) as u8,
            (word >> 24) as u8,
        )
    }

    /// Pack back into the set-LED argument word.
    #[must_use]
    pub const fn packed(&self) -> u32 {
        (self.digits[0] as u32)
            | (self.digits[1] as u32) << 4
            | (self.digits[2] as u32) << 8
            | (self.digits[3] as u32) << 12
            | (self.enabled as u32) << 16
            | (self.decimals as u32) << 24
    }

    #[inline]
    #[must_use]
    pub const fn digits(&self) -> [u8; 4] {
        self.digits
    }

    #[inline]
    #[must_use]
    pub const fn enable_mask(&self) -> u8 {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub const fn decimal_mask(&self) -> u8 {
        self.decimals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::START | Buttons::RIGHT;
        assert_eq!(buttons.raw(), 0x81);
        assert!(buttons.contains(Buttons::START));
        assert!(!buttons.contains(Buttons::LEFT));
    }

    #[test]
    fn test_buttons_empty() {
        assert!(Buttons::NONE.is_empty());
        assert!(Buttons::default().is_empty());
        assert!(!Buttons::C.is_empty());
    }

    #[test]
    fn test_display_request_masks_nibbles() {
        let request = DisplayRequest::new([0x1F, 0x2A, 0xF3, 0x04], 0xF7, 0x35);
        assert_eq!(request.digits(), [0x0F, 0x0A, 0x03, 0x04]);
        assert_eq!(request.enable_mask(), 0x07);
        assert_eq!(request.decimal_mask(), 0x05);
    }

    #[test]
    fn test_display_request_from_packed() {
        let request = DisplayRequest::from_packed(0x0507_4321);
        assert_eq!(request.digits(), [1, 2, 3, 4]);
        assert_eq!(request.enable_mask(), 0b0111);
        assert_eq!(request.decimal_mask(), 0b0101);
    }

    #[test]
    fn test_display_request_packed_ignores_reserved_bits() {
        let request = DisplayRequest::from_packed(0xF0F0_BEEF);
        assert_eq!(request.packed(), 0x0000_BEEF);
    }

    #[test]
    fn test_display_request_hex() {
        let request = DisplayRequest::hex(0xC0DE);
        assert_eq!(request.digits(), [0xE, 0xD, 0x0, 0xC]);
        assert_eq!(request.enable_mask(), 0x0F);
        assert_eq!(request.decimal_mask(), 0);
    }
}
