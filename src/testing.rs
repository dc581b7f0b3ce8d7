//! Test doubles and a minimal executor for the async adapters.

extern crate std;

use core::convert::Infallible;
use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::sync::Mutex;
use std::vec::Vec;

use embedded_io_async::{ErrorType, Write};
use tuxctl_core::{PacketSink, SendError};

/// Run a future to completion; every adapter future under test is ready
/// without waiting.
pub fn block_on<F: Future>(f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = pin!(f);

    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("future returned Pending unexpectedly"),
    }
}

/// Serial writer that keeps everything written to it.
pub struct Capture {
    pub bytes: Vec<u8>,
}

impl Capture {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }
}

impl ErrorType for Capture {
    type Error = Infallible;
}

impl Write for Capture {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Sink that records every frame it is handed.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Vec<u8>>>,
}

impl RecordingSink {
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

impl PacketSink for RecordingSink {
    fn send(&self, frame: &[u8]) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Vec::from(frame));
        Ok(())
    }
}
