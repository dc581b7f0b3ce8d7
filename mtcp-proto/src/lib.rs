//! MTCP wire protocol for the Tux controller.
//!
//! The Tux controller is a small board with eight buttons and a four digit
//! seven-segment display, attached to the host over a 9600 baud serial line.
//! This crate holds everything that is pure protocol:
//!
//! - **Types**: [`Buttons`] (8-bit button mask) and [`DisplayRequest`]
//!   (four hex digits plus enable and decimal-point masks)
//! - **Decoding**: [`Packet::decode`] turns a framed 3-byte status packet into
//!   a [`Packet`]
//! - **Encoding**: [`encode_display`] builds the `MTCP_LED_SET` frame for a
//!   [`DisplayRequest`]
//!
//! # Wire Format
//!
//! Inbound packets are always 3 bytes: a tag followed by two payload bytes.
//!
//! ```text
//! 0x41 BIOC_EVENT  1XXX CBAS  1XXX RDLU
//! 0x46 RESET       (unused)   (unused)
//! 0x40 ACK         (unused)   (unused)
//! ```
//!
//! Outbound commands are a single opcode byte, optionally followed by
//! arguments. Only `MTCP_LED_SET` carries arguments:
//!
//! ```text
//! 0x06 <select> <pattern0> <pattern1> <pattern2> [<pattern3>]
//! ```
//!
//! # Example
//!
//! ```
//! use mtcp_proto::{encode_display, Buttons, DisplayRequest, Packet};
//!
//! let packet = Packet::decode(&[0x41, 0x81, 0x82]);
//! assert_eq!(packet, Packet::ButtonEvent(Buttons::START | Buttons::LEFT));
//!
//! let frame = encode_display(&DisplayRequest::new([1, 2, 3, 4], 0b0111, 0));
//! assert_eq!(&frame[..], &[0x06, 0x07, 0x06, 0xCB, 0x8F]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod led;
pub mod packet;
pub mod types;

pub use led::{encode_display, LedFrame, DECIMAL_POINT, MAX_LED_FRAME_LEN, SEGMENT_PATTERNS};
pub use packet::{compose_buttons, Packet, RawPacket, PACKET_LEN};
pub use types::{Buttons, DisplayRequest};

/// Serial line speed of the controller (8N1).
pub const BAUD_RATE: u32 = 9600;

// Host -> controller opcodes.

/// Enable button interrupt-on-change reporting.
pub const MTCP_BIOC_ON: u8 = 0x03;
/// Set the LED display contents.
pub const MTCP_LED_SET: u8 = 0x06;
/// Put the LED display in user-driven mode.
pub const MTCP_LED_USR: u8 = 0x08;

// Controller -> host packet tags.

/// Acknowledgment of the previous command.
pub const MTCP_ACK: u8 = 0x40;
/// Button state changed.
pub const MTCP_BIOC_EVENT: u8 = 0x41;
/// Controller was reset and lost its configuration.
pub const MTCP_RESET: u8 = 0x46;
