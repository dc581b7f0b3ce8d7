use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::{Read, ReadExactError};
use mtcp_proto::{Packet, RawPacket, PACKET_LEN};
use tuxctl_core::{PacketSink, TuxController};

/// Error type for the inbound packet pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// The stream ended in the middle of, or before, a packet.
    Eof,
    /// The reader failed.
    Io(E),
}

impl<E> From<ReadExactError<E>> for LinkError<E> {
    fn from(e: ReadExactError<E>) -> Self {
        match e {
            ReadExactError::UnexpectedEof => LinkError::Eof,
            ReadExactError::Other(e) => LinkError::Io(e),
        }
    }
}

/// Feeds framed packets from a serial reader into the driver.
///
/// The stream must already be packet aligned: every 3 bytes read form one
/// packet. Packets reach [`TuxController::handle_packet`] in stream order.
///
/// The firmware reads from the RP2040 buffered UART RX half; tests read
/// from byte slices.
pub struct PacketPump<R> {
    reader: R,
}

impl<R: Read> PacketPump<R> {
    /// Create a pump reading from the given reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one packet and hand it to the controller.
    ///
    /// Returns the decoded packet for testing and logging purposes.
    pub async fn process_one<M, S>(
        &mut self,
        controller: &TuxController<M, S>,
    ) -> Result<Packet, LinkError<R::Error>>
    where
        M: RawMutex,
        S: PacketSink,
    {
        let mut raw: RawPacket = [0; PACKET_LEN];
        self.reader.read_exact(&mut raw).await?;

        let packet = controller.handle_packet(&raw);
        #[cfg(feature = "defmt")]
        defmt::trace!("packet {:?}", packet);
        Ok(packet)
    }

    /// Pump packets until the reader fails or the stream ends.
    pub async fn run<M, S>(&mut self, controller: &TuxController<M, S>) -> LinkError<R::Error>
    where
        M: RawMutex,
        S: PacketSink,
    {
        loop {
            if let Err(e) = self.process_one(controller).await {
                return e;
            }
        }
    }

    /// Decompose the pump into its reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
