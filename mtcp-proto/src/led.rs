//! `MTCP_LED_SET` frame encoding.
//!
//! # Frame Format
//!
//! ```text
//! 0x06 <select> <pattern0> <pattern1> <pattern2> [<pattern3>]
//! ```
//!
//! `select` tells the controller which digits the following patterns are for.
//! Only two selections are ever produced: `0x07` (digits 0-2, 5 byte frame)
//! when the request enables exactly digits 0-2, and `0xFF` (all digits,
//! 6 byte frame) for every other enable mask.

use core::ops::Deref;

use crate::types::DisplayRequest;
use crate::MTCP_LED_SET;

/// Seven-segment pattern for each hex digit, indexed by nibble value.
pub const SEGMENT_PATTERNS: [u8; 16] = [
    0xE7, 0x06, 0xCB, 0x8F, 0x2E, 0xAD, 0xED, 0x86, // 0-7
    0xEF, 0xAF, 0xEE, 0x6D, 0xE1, 0x4F, 0xE9, 0xE8, // 8-F
];

/// Segment bit of the decimal point.
pub const DECIMAL_POINT: u8 = 0x10;

/// Longest `MTCP_LED_SET` frame: opcode, select and four patterns.
pub const MAX_LED_FRAME_LEN: usize = 6;

const SELECT_LOW_THREE: u8 = 0x07;
const SELECT_ALL: u8 = 0xFF;

/// An encoded `MTCP_LED_SET` frame, 5 or 6 bytes long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedFrame {
    buf: [u8; MAX_LED_FRAME_LEN],
    len: usize,
}

impl LedFrame {
    /// The frame bytes, ready to hand to the serial line.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Deref for LedFrame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode a display request into an `MTCP_LED_SET` frame.
///
/// Decimal-mask bits are consumed low to high, one per emitted digit, so a
/// decimal point requested on a digit that is not emitted is dropped.
///
/// # Example
///
/// ```
/// use mtcp_proto::{encode_display, DisplayRequest};
///
/// let frame = encode_display(&DisplayRequest::new([0, 1, 2, 3], 0b1111, 0b0001));
/// assert_eq!(frame.as_bytes(), &[0x06, 0xFF, 0xF7, 0x06, 0xCB, 0x8F]);
/// ```
#[must_use]
pub fn encode_display(request: &DisplayRequest) -> LedFrame {
    let (select, count) = if request.enable_mask() == SELECT_LOW_THREE {
        (SELECT_LOW_THREE, 3)
    } else {
        (SELECT_ALL, 4)
    };

    let mut buf = [0u8; MAX_LED_FRAME_LEN];
    buf[0] = MTCP_LED_SET;
    buf[1] = select;

    let digits = request.digits();
    let mut decimals = request.decimal_mask();
    for (slot, &digit) in buf[2..2 + count].iter_mut().zip(digits.iter()) {
        let mut pattern = SEGMENT_PATTERNS[digit as usize];
        if decimals & 1 != 0 {
            pattern |= DECIMAL_POINT;
        }
        decimals >>= 1;
        *slot = pattern;
    }

    LedFrame {
        buf,
        len: 2 + count,
    }
}
