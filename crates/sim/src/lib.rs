pub mod link;
pub mod net;

pub use link::{DEFAULT_POLL_TIMEOUT, Emitter, LinkError, Receiver, run_link};
pub use net::{
    AckError, Acknowledgement, DEFAULT_ACK_PORT, DEFAULT_SEND_INTERVAL_MS, DeliveryTracker,
    FRAME_SIGNATURE, FRAME_SIZE, FrameError, LinkReport, MAX_ACK_SIZE, SensorFrame,
    TrackerSnapshot,
};
