//! Control request dispatch.
//!
//! Models the requests a character device forwards to the driver. Each
//! request returns immediately; none of them waits for the controller.

use embassy_sync::blocking_mutex::raw::RawMutex;
use mtcp_proto::DisplayRequest;

use crate::controller::TuxController;
use crate::error::DriverError;
use crate::sink::{ButtonDestination, PacketSink};

/// A control request addressed to the driver.
pub enum Command<'a> {
    /// Start a session (see [`TuxController::init`]).
    Init,
    /// Read and clear the pending button mask into the destination.
    Buttons(Option<&'a mut dyn ButtonDestination>),
    /// Show a display state given as a packed argument word
    /// (see [`DisplayRequest::from_packed`]).
    SetLed(u32),
    /// Ask the controller for its display contents. Not supported.
    LedRequest,
    /// Wait for a display acknowledgment. Not supported.
    LedAck,
    /// Read back the display contents. Not supported.
    ReadLed,
}

impl<M: RawMutex, S: PacketSink> TuxController<M, S> {
    /// Dispatch a control request.
    ///
    /// Unsupported requests fail with [`DriverError::InvalidArgument`].
    pub fn ioctl(&self, command: Command<'_>) -> Result<(), DriverError> {
        match command {
            Command::Init => self.init(),
            Command::Buttons(dest) => self.read_buttons(dest),
            Command::SetLed(word) => self.set_display(DisplayRequest::from_packed(word)),
            Command::LedRequest | Command::LedAck | Command::ReadLed => {
                Err(DriverError::InvalidArgument)
            }
        }
    }
}
