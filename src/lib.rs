//! Tux controller driver.
//!
//! Connects the platform-agnostic driver core ([`tuxctl_core`]) to a serial
//! line without ever making the core wait for it.
//!
//! # Overview
//!
//! The controller sits on the other end of a 9600 baud, 8N1 serial line.
//! Every byte takes about a millisecond, so a display update and its
//! acknowledgment are roughly 9 ms apart: far too long for a request to
//! block on. The driver therefore splits into three concurrent parts:
//!
//! - **Request side**: calls [`TuxController`] operations, which only touch
//!   local state and queue frames
//! - **Transmit side**: [`TxQueue`] buffers whole command frames and drains
//!   them to the UART
//! - **Receive side**: [`PacketPump`] reads framed 3-byte packets from the
//!   UART and hands them to [`TuxController::handle_packet`]
//!
//! ```text
//! requests ──► TuxController ──► TxQueue ──► UART TX
//!                    ▲
//! UART RX ──► PacketPump
//! ```
//!
//! # Modules
//!
//! - [`transmit`]: outbound frame queue ([`TxQueue`])
//! - [`receive`]: inbound packet pump ([`PacketPump`], [`LinkError`])
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`tuxctl_core`] and the
//! protocol constants of [`mtcp_proto`], so consumers only need to depend
//! on this crate.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod receive;
pub mod transmit;

#[cfg(test)]
mod testing;

pub use receive::{LinkError, PacketPump};
pub use transmit::{Frame, TxQueue, MAX_FRAME_LEN};

// Re-export core types for convenience
pub use mtcp_proto::{encode_display, LedFrame, BAUD_RATE};
pub use tuxctl_core::{
    Buttons, ButtonDestination, Command, CopyError, DisplayRequest, DriverError, Packet,
    PacketSink, RawPacket, SendError, TuxController, PACKET_LEN,
};
