mod emitter;
mod receiver;

pub use emitter::Emitter;
pub use receiver::{DEFAULT_POLL_TIMEOUT, Receiver};

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use crate::net::stats::LinkReport;
use crate::net::tracking::DeliveryTracker;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("serial sink failed: {0}")]
    Emitter(#[source] io::Error),
    #[error("ack receiver failed: {0}")]
    Receiver(#[source] io::Error),
}

/// Runs both loops to completion and reduces the final tracker state.
///
/// Either loop exiting, for any reason, lowers the shared flag so the
/// other observes cancellation within one poll/sleep interval. Both
/// threads are joined before the stop instant is marked and the snapshot
/// is taken, so the reducer never races a writer.
pub fn run_link<W>(
    emitter: Emitter<W>,
    receiver: Receiver,
    running: Arc<AtomicBool>,
    tracker: Arc<DeliveryTracker>,
) -> Result<LinkReport, LinkError>
where
    W: Write + Send,
{
    let (emitter_result, receiver_result) = thread::scope(|scope| {
        let tx = scope.spawn(|| {
            let result = emitter.run();
            running.store(false, Ordering::SeqCst);
            result
        });
        let rx = scope.spawn(|| {
            let result = receiver.run();
            running.store(false, Ordering::SeqCst);
            result
        });
        (tx.join(), rx.join())
    });

    tracker.mark_stopped(Instant::now());

    emitter_result
        .expect("emitter thread panicked")
        .map_err(LinkError::Emitter)?;
    receiver_result
        .expect("receiver thread panicked")
        .map_err(LinkError::Receiver)?;

    Ok(LinkReport::from_snapshot(&tracker.snapshot()))
}
