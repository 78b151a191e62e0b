use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::net::protocol::SensorFrame;
use crate::net::tracking::DeliveryTracker;

/// Drives the frame codec at a fixed cadence, writing to the serial sink
/// and recording every send in the shared tracker. Stops cooperatively
/// when the shared flag goes down; a sink write error stops the loop and
/// propagates to the coordinator.
pub struct Emitter<W: Write> {
    sink: W,
    tracker: Arc<DeliveryTracker>,
    running: Arc<AtomicBool>,
    interval: Duration,
    wrap: Option<u32>,
    sequence: u32,
}

impl<W: Write> Emitter<W> {
    pub fn new(
        sink: W,
        tracker: Arc<DeliveryTracker>,
        running: Arc<AtomicBool>,
        interval: Duration,
    ) -> Self {
        Self {
            sink,
            tracker,
            running,
            interval,
            wrap: None,
            sequence: 0,
        }
    }

    /// Wraps the sequence counter at `modulus` instead of letting it grow.
    /// A zero modulus leaves the counter unbounded.
    pub fn with_wrap(mut self, modulus: u32) -> Self {
        self.wrap = (modulus > 0).then_some(modulus);
        self
    }

    pub fn run(mut self) -> io::Result<()> {
        // Pace against absolute deadlines so cadence does not drift with
        // write latency.
        let mut deadline = Instant::now();

        while self.running.load(Ordering::SeqCst) {
            let frame = SensorFrame::synthesize(self.sequence);
            self.sink.write_all(&frame.encode())?;
            self.sink.flush()?;
            self.tracker.record_sent(self.sequence, Instant::now());
            log::debug!("sent frame {}", self.sequence);

            self.sequence = match self.wrap {
                Some(modulus) => self.sequence.wrapping_add(1) % modulus,
                None => self.sequence.wrapping_add(1),
            };

            deadline += self.interval;
            if let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                thread::sleep(remaining);
            }
        }

        Ok(())
    }
}
