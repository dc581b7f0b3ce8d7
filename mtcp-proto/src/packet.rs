//! Inbound status packet decoding.
//!
//! The controller reports everything in fixed 3-byte packets. Framing is done
//! before packets reach this module, so decoding never fails: a tag this
//! crate does not know decodes to [`Packet::Unknown`].

use crate::types::Buttons;
use crate::{MTCP_ACK, MTCP_BIOC_EVENT, MTCP_RESET};

/// Length of every inbound packet.
pub const PACKET_LEN: usize = 3;

/// A framed inbound packet: tag byte plus two payload bytes.
pub type RawPacket = [u8; PACKET_LEN];

// Directional bits in the second payload byte of a button event.
const PAD_UP_RIGHT: u8 = 0x09;
const PAD_LEFT: u8 = 0x02;
const PAD_DOWN: u8 = 0x04;

// START, A, B, C in the first payload byte.
const ACTION_MASK: u8 = 0x0F;

/// A decoded inbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// Button state changed; carries the composed button mask.
    ButtonEvent(Buttons),
    /// The controller rebooted and forgot its configuration.
    Reset,
    /// The previous command was accepted.
    Ack,
    /// Tag not handled by this driver.
    Unknown(u8),
}

impl Packet {
    /// Decode a framed packet by its tag byte.
    pub fn decode(raw: &RawPacket) -> Self {
        match raw[0] {
            MTCP_BIOC_EVENT => Packet::ButtonEvent(compose_buttons(raw[1], raw[2])),
            MTCP_RESET => Packet::Reset,
            MTCP_ACK => Packet::Ack,
            tag => Packet::Unknown(tag),
        }
    }
}

/// Compose the caller-facing mask from a button event payload.
///
/// The directional byte is wired `RDLU` (right, down, left, up) but the mask
/// is laid out `RLDU`, so left and down trade places on the way through.
#[inline]
#[must_use]
pub fn compose_buttons(actions: u8, pad: u8) -> Buttons {
    let up_right = (pad & PAD_UP_RIGHT) << 4;
    let left = (pad & PAD_LEFT) << 5;
    let down = (pad & PAD_DOWN) << 3;

    Buttons(up_right | left | down | (actions & ACTION_MASK))
}
