use std::path::PathBuf;
use std::time::Duration;

use imusim::{DEFAULT_ACK_PORT, DEFAULT_POLL_TIMEOUT, DEFAULT_SEND_INTERVAL_MS};

#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    pub ack_port: u16,
    pub send_interval: Duration,
    pub poll_timeout: Duration,
    pub wrap: Option<u32>,
    pub link_path: Option<PathBuf>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            ack_port: DEFAULT_ACK_PORT,
            send_interval: Duration::from_millis(DEFAULT_SEND_INTERVAL_MS),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            wrap: None,
            link_path: None,
        }
    }
}
