//! Tux controller driver hosted on an RP2040.
//!
//! The firmware talks to a Tux controller on UART1 (9600 baud, 8N1) and runs
//! a small demo on it: a hex counter shown on the LED display and driven by
//! the controller's buttons.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Commands to the controller |
//! | UART1 RX | 9    | Status packets from the controller |
//!
//! # Architecture
//!
//! Three Embassy tasks share one static [`TuxController`](tuxctl::TuxController):
//!
//! - **RX Task**: reads framed 3-byte packets and calls `handle_packet`
//! - **TX Task**: drains the [`TxQueue`](tuxctl::TxQueue) to the UART
//! - **Main Task**: polls the buttons and requests display updates,
//!   retrying on the next tick when the driver reports `Busy`
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

pub mod counter;

pub use counter::HexCounter;
