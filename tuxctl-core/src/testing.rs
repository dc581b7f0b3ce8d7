//! Shared test doubles.

extern crate std;

use std::sync::Mutex;
use std::vec::Vec;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::controller::TuxController;
use crate::sink::{PacketSink, SendError};

/// Sink that records every frame it is handed.
pub struct RecordingSink {
    sent: Mutex<Vec<Vec<u8>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Records frames but reports every send as failed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take_frames(&self) -> Vec<Vec<u8>> {
        core::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl PacketSink for RecordingSink {
    fn send(&self, frame: &[u8]) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Vec::from(frame));
        if self.fail {
            Err(SendError::Io)
        } else {
            Ok(())
        }
    }
}

pub fn controller(sink: &RecordingSink) -> TuxController<CriticalSectionRawMutex, &RecordingSink> {
    TuxController::new(sink)
}
