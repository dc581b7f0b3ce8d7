use core::sync::atomic::Ordering;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embedded_io_async::Write;
use heapless::Vec;
use mtcp_proto::MAX_LED_FRAME_LEN;
use portable_atomic::AtomicU32;
use tuxctl_core::{PacketSink, SendError};

/// Longest command frame the driver ever sends.
pub const MAX_FRAME_LEN: usize = MAX_LED_FRAME_LEN;

/// One queued command frame.
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

/// Outbound frame queue between the driver and the serial transmitter.
///
/// The driver side ([`PacketSink::send`]) never waits: a frame that does not
/// fit is dropped and counted. The transmitter side ([`TxQueue::run`]) drains
/// frames to the UART at line speed.
///
/// Frames are queued whole, so a reset replay issued from the receive
/// context can never interleave with a display update from the request
/// context.
///
/// Any `embedded_io_async::Write` works as the transmitter; the firmware
/// runs it on the RP2040 buffered UART TX half.
///
/// `N` is the queue depth in frames. A reset queues three frames at once,
/// so anything below 4 risks dropping part of the recovery sequence.
pub struct TxQueue<M: RawMutex, const N: usize> {
    frames: Channel<M, Frame, N>,
    dropped: AtomicU32,
}

impl<M: RawMutex, const N: usize> TxQueue<M, N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            frames: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Number of frames dropped because the queue was full.
    #[must_use]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of frames waiting to be transmitted.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    /// Wait for the next frame to transmit.
    pub async fn next_frame(&self) -> Frame {
        self.frames.receive().await
    }

    /// Take the next frame if one is queued.
    pub fn try_next_frame(&self) -> Option<Frame> {
        self.frames.try_receive().ok()
    }

    /// Write every frame that is queued right now, then return the number
    /// of frames written.
    pub async fn drain<W: Write>(&self, writer: &mut W) -> Result<usize, W::Error> {
        let mut written = 0;
        while let Some(frame) = self.try_next_frame() {
            writer.write_all(&frame).await?;
            written += 1;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// Forward frames to the writer until it fails.
    ///
    /// Only returns with the writer's error.
    pub async fn run<W: Write>(&self, writer: &mut W) -> W::Error {
        loop {
            let frame = self.next_frame().await;
            if let Err(e) = writer.write_all(&frame).await {
                return e;
            }
        }
    }
}

impl<M: RawMutex, const N: usize> Default for TxQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> PacketSink for TxQueue<M, N> {
    fn send(&self, frame: &[u8]) -> Result<(), SendError> {
        let frame = Frame::from_slice(frame).map_err(|_| SendError::TooLong)?;

        self.frames.try_send(frame).map_err(|_| {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "defmt")]
            defmt::warn!("tx queue full, frame dropped");
            SendError::Full
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::{block_on, Capture};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use mtcp_proto::{DisplayRequest, MTCP_ACK, MTCP_RESET};
    use std::vec;
    use tuxctl_core::TuxController;

    type Queue<const N: usize> = TxQueue<CriticalSectionRawMutex, N>;

    #[test]
    fn test_frames_are_queued_whole() {
        let queue = Queue::<4>::new();

        assert_eq!(queue.send(&[0x03]), Ok(()));
        assert_eq!(queue.send(&[0x06, 0x07, 0x06, 0xCB, 0x8F]), Ok(()));
        assert_eq!(queue.pending(), 2);

        assert_eq!(queue.try_next_frame().as_deref(), Some(&[0x03][..]));
        assert_eq!(
            queue.try_next_frame().as_deref(),
            Some(&[0x06, 0x07, 0x06, 0xCB, 0x8F][..])
        );
        assert_eq!(queue.try_next_frame(), None);
    }

    #[test]
    fn test_full_queue_drops_and_counts() {
        let queue = Queue::<2>::new();

        assert_eq!(queue.send(&[0x03]), Ok(()));
        assert_eq!(queue.send(&[0x08]), Ok(()));
        assert_eq!(queue.send(&[0x03]), Err(SendError::Full));
        assert_eq!(queue.send(&[0x08]), Err(SendError::Full));

        assert_eq!(queue.dropped(), 2);
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let queue = Queue::<4>::new();

        assert_eq!(queue.send(&[0u8; MAX_FRAME_LEN + 1]), Err(SendError::TooLong));
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn test_drain_writes_frames_in_order() {
        let queue = Queue::<4>::new();
        queue.send(&[0x03]).unwrap();
        queue.send(&[0x08]).unwrap();

        let mut uart = Capture::new();
        assert_eq!(block_on(queue.drain(&mut uart)), Ok(2));
        assert_eq!(uart.bytes, vec![0x03, 0x08]);
        assert_eq!(queue.pending(), 0);
    }

    struct Unplugged;

    impl embedded_io_async::ErrorType for Unplugged {
        type Error = embedded_io_async::ErrorKind;
    }

    impl Write for Unplugged {
        async fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(embedded_io_async::ErrorKind::BrokenPipe)
        }
    }

    #[test]
    fn test_run_returns_writer_error() {
        let queue = Queue::<4>::new();
        queue.send(&[0x03]).unwrap();

        assert_eq!(
            block_on(queue.run(&mut Unplugged)),
            embedded_io_async::ErrorKind::BrokenPipe
        );
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_controller_keeps_working_when_queue_overflows() {
        let queue = Queue::<2>::new();
        let tux = TuxController::<CriticalSectionRawMutex, _>::new(&queue);

        tux.init().unwrap();
        assert_eq!(tux.set_display(DisplayRequest::hex(0x1234)), Ok(()));
        assert_eq!(queue.dropped(), 1);

        // Gate still closes on the dropped update; only an ack or reset opens it
        assert!(tux.is_busy());
        tux.handle_packet(&[MTCP_ACK, 0, 0]);
        assert!(!tux.is_busy());
    }

    #[test]
    fn test_reset_recovery_sequence_reaches_the_wire() {
        let queue = Queue::<4>::new();
        let tux = TuxController::<CriticalSectionRawMutex, _>::new(&queue);

        tux.set_display(DisplayRequest::new([1, 2, 3, 4], 0b0111, 0b0010))
            .unwrap();
        let mut uart = Capture::new();
        block_on(queue.drain(&mut uart)).unwrap();
        uart.bytes.clear();

        tux.handle_packet(&[MTCP_RESET, 0, 0]);
        assert_eq!(block_on(queue.drain(&mut uart)), Ok(3));
        assert_eq!(
            uart.bytes,
            vec![0x03, 0x08, 0x06, 0x07, 0x06, 0xDB, 0x8F]
        );
    }
}
