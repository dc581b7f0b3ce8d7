mod queue;

pub use queue::{Frame, TxQueue, MAX_FRAME_LEN};
