//! Platform-agnostic driver core for the Tux controller.
//!
//! The Tux controller reports button events and accepts display updates over
//! a slow serial line. This crate keeps the driver state and enforces the
//! protocol rules without ever waiting for the wire:
//!
//! - [`controller`]: the driver session ([`TuxController`]): button state,
//!   the flow-control gate for display updates, reset recovery
//! - [`command`]: control request dispatch ([`Command`])
//! - [`sink`]: the outbound send primitive ([`PacketSink`]) and button read
//!   destinations ([`ButtonDestination`])
//! - [`error`]: [`DriverError`]
//!
//! # Flow Control
//!
//! At most one display update is outstanding. Until the controller
//! acknowledges it, further [`TuxController::set_display`] calls fail with
//! [`DriverError::Busy`] and the caller retries later. Initialisation and
//! reset recovery traffic is not gated.
//!
//! # Reset Recovery
//!
//! When the controller reports a reset, the driver enables button reporting
//! again, selects user LED mode and resends the last admitted display
//! request, so the display looks exactly as it did before the reset.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod command;
pub mod controller;
pub mod error;
pub mod sink;

#[cfg(test)]
mod testing;

pub use command::Command;
pub use controller::TuxController;
pub use error::{CopyError, DriverError};
pub use sink::{ButtonDestination, PacketSink, SendError};

// Re-export protocol types at crate root
pub use mtcp_proto::{Buttons, DisplayRequest, Packet, RawPacket, PACKET_LEN};
