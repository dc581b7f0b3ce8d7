//! TuxController: the driver session.
//!
//! Holds the three pieces of state shared between the packet receive context
//! and the request context:
//!
//! - the button mask reported since the last read,
//! - the last display request admitted by the flow-control gate,
//! - whether that request is still waiting for its acknowledgment.
//!
//! All three sit behind one blocking mutex. The lock is only held while the
//! state is read or modified, never while a frame is handed to the sink.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use mtcp_proto::{encode_display, Buttons, DisplayRequest, Packet, RawPacket};
use mtcp_proto::{MTCP_BIOC_ON, MTCP_LED_USR};

use crate::error::DriverError;
use crate::sink::{ButtonDestination, PacketSink};

#[derive(Debug, Clone, Copy)]
struct Session {
    buttons: Buttons,
    /// Bumped on every button event, including all-released ones.
    button_events: u32,
    last_display: Option<DisplayRequest>,
    in_flight: bool,
}

impl Session {
    const fn new() -> Self {
        Self {
            buttons: Buttons::NONE,
            button_events: 0,
            last_display: None,
            in_flight: false,
        }
    }
}

/// Driver session for one Tux controller.
///
/// `M` selects the raw mutex guarding the session state; use
/// `CriticalSectionRawMutex` when packets are delivered from an interrupt
/// or another executor, `NoopRawMutex` when everything runs on one thread.
/// `S` is the non-blocking send primitive towards the controller.
///
/// # Example
///
/// ```ignore
/// let controller = TuxController::<CriticalSectionRawMutex, _>::new(&TX_QUEUE);
/// controller.init()?;
/// controller.set_display(DisplayRequest::hex(0x1234))?;
///
/// // From the receive side, for every framed packet:
/// controller.handle_packet(&packet);
/// ```
pub struct TuxController<M: RawMutex, S> {
    sink: S,
    session: Mutex<M, RefCell<Session>>,
}

impl<M: RawMutex, S: PacketSink> TuxController<M, S> {
    /// Create a session around a send primitive. Nothing is sent until
    /// [`init`](Self::init).
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            session: Mutex::new(RefCell::new(Session::new())),
        }
    }

    /// Start a session: clear all state, enable button reporting and put
    /// the display in user mode.
    ///
    /// Does not wait for the controller to acknowledge anything.
    pub fn init(&self) -> Result<(), DriverError> {
        self.with_session(|s| *s = Session::new());
        self.send_init_commands();
        Ok(())
    }

    /// Request a new display state.
    ///
    /// Fails with [`DriverError::Busy`] while a previous request is still
    /// unacknowledged. The rejected request is not remembered.
    pub fn set_display(&self, request: DisplayRequest) -> Result<(), DriverError> {
        let admitted = self.with_session(|s| {
            if s.in_flight {
                return false;
            }
            s.in_flight = true;
            s.last_display = Some(request);
            true
        });

        if !admitted {
            #[cfg(feature = "defmt")]
            defmt::trace!("display update rejected, previous one unacknowledged");
            return Err(DriverError::Busy);
        }

        self.send_display(&request);
        Ok(())
    }

    /// Copy out the buttons pressed since the last read and clear them.
    ///
    /// With no destination this fails and the pending mask is left alone.
    /// If the copy fails the mask is put back, unless a newer button event
    /// arrived in the meantime.
    pub fn read_buttons(
        &self,
        dest: Option<&mut dyn ButtonDestination>,
    ) -> Result<(), DriverError> {
        let dest = dest.ok_or(DriverError::InvalidArgument)?;
        let (buttons, seen) =
            self.with_session(|s| (core::mem::take(&mut s.buttons), s.button_events));

        if let Err(e) = dest.store(buttons) {
            self.with_session(|s| {
                if s.button_events == seen {
                    s.buttons = buttons;
                }
            });
            return Err(e.into());
        }
        Ok(())
    }

    /// Handle one framed packet from the controller.
    ///
    /// Safe to call from the receive context: it never blocks on the wire
    /// and only holds the session lock for the state update itself.
    /// Returns the decoded packet.
    pub fn handle_packet(&self, raw: &RawPacket) -> Packet {
        let packet = Packet::decode(raw);

        match packet {
            Packet::ButtonEvent(buttons) => {
                self.with_session(|s| {
                    s.buttons = buttons;
                    s.button_events = s.button_events.wrapping_add(1);
                });
            }
            Packet::Reset => self.recover(),
            Packet::Ack => {
                self.with_session(|s| s.in_flight = false);
            }
            Packet::Unknown(_tag) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("ignoring packet with tag {=u8:#x}", _tag);
            }
        }

        packet
    }

    /// Whether a display update is waiting for its acknowledgment.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.with_session(|s| s.in_flight)
    }

    /// The display request that a controller reset would replay.
    #[must_use]
    pub fn last_display(&self) -> Option<DisplayRequest> {
        self.with_session(|s| s.last_display)
    }

    /// Controller rebooted: configure it again and put the display back.
    ///
    /// The acknowledgment for any request sent before the reset will never
    /// come, so the gate is reopened here. Before the first admitted display
    /// request there is nothing to replay and the display is left alone.
    fn recover(&self) {
        let replay = self.with_session(|s| {
            s.in_flight = false;
            s.last_display
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("controller reset, replaying {:?}", replay);

        self.send_init_commands();
        if let Some(request) = replay {
            self.send_display(&request);
        }
    }

    fn send_init_commands(&self) {
        self.send(&[MTCP_BIOC_ON]);
        self.send(&[MTCP_LED_USR]);
    }

    fn send_display(&self, request: &DisplayRequest) {
        self.send(&encode_display(request));
    }

    fn send(&self, frame: &[u8]) {
        if let Err(_e) = self.sink.send(frame) {
            #[cfg(feature = "defmt")]
            defmt::warn!("send of {=usize} byte frame failed: {:?}", frame.len(), _e);
        }
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        self.session.lock(|cell| f(&mut *cell.borrow_mut()))
    }
}
