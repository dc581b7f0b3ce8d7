//! Driver error types.

use core::fmt;

/// Error returned by the request-side operations.
///
/// These are the only failures a caller ever sees. Transport failures on
/// outbound sends are logged and dropped, never reported here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Missing or unwritable destination, or an unsupported command.
    InvalidArgument,
    /// A display update is still waiting for its acknowledgment; retry later.
    Busy,
}

impl DriverError {
    /// Negative errno value for a character-device style boundary.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::InvalidArgument => -22, // EINVAL
            Self::Busy => -16,            // EBUSY
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Busy => write!(f, "device busy"),
        }
    }
}

/// A button mask could not be copied to the caller's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CopyError;

impl From<CopyError> for DriverError {
    fn from(_: CopyError) -> Self {
        DriverError::InvalidArgument
    }
}
