//! Outbound send primitive and button destinations.

use crate::error::CopyError;
use mtcp_proto::Buttons;

/// Error type for outbound sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// No room for the frame right now; it was dropped.
    Full,
    /// Frame is longer than the transport accepts.
    TooLong,
    /// Serial line I/O error.
    Io,
}

/// Non-blocking byte-send primitive towards the controller.
///
/// The driver calls this from both the request context and the packet
/// receive context, so it takes `&self` and must never wait for the wire.
/// Each call carries one complete command frame; implementations must keep
/// a frame's bytes together.
pub trait PacketSink {
    /// Queue one frame for transmission.
    fn send(&self, frame: &[u8]) -> Result<(), SendError>;
}

impl<T: PacketSink + ?Sized> PacketSink for &T {
    fn send(&self, frame: &[u8]) -> Result<(), SendError> {
        (**self).send(frame)
    }
}

/// Where a button read copies the mask to.
///
/// Stands in for the caller-supplied output location of the button request.
/// Implement it for destinations that can refuse the write.
pub trait ButtonDestination {
    /// Store the mask, or fail if the destination is not writable.
    fn store(&mut self, buttons: Buttons) -> Result<(), CopyError>;
}

impl ButtonDestination for Buttons {
    fn store(&mut self, buttons: Buttons) -> Result<(), CopyError> {
        *self = buttons;
        Ok(())
    }
}

impl ButtonDestination for u8 {
    fn store(&mut self, buttons: Buttons) -> Result<(), CopyError> {
        *self = buttons.raw();
        Ok(())
    }
}

impl ButtonDestination for u32 {
    fn store(&mut self, buttons: Buttons) -> Result<(), CopyError> {
        *self = u32::from(buttons.raw());
        Ok(())
    }
}

impl ButtonDestination for i32 {
    fn store(&mut self, buttons: Buttons) -> Result<(), CopyError> {
        *self = i32::from(buttons.raw());
        Ok(())
    }
}
