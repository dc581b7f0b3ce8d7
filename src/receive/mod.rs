mod pump;

pub use pump::{LinkError, PacketPump};
