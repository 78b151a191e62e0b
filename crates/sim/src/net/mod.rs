pub(crate) mod ack;
pub(crate) mod protocol;
pub(crate) mod stats;
pub(crate) mod tracking;

pub use ack::{AckError, Acknowledgement};
pub use protocol::{
    DEFAULT_ACK_PORT, DEFAULT_SEND_INTERVAL_MS, FRAME_SIGNATURE, FRAME_SIZE, FrameError,
    MAX_ACK_SIZE, SensorFrame,
};
pub use stats::LinkReport;
pub use tracking::{DeliveryTracker, TrackerSnapshot};
