use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::net::ack::Acknowledgement;
use crate::net::protocol::MAX_ACK_SIZE;
use crate::net::tracking::DeliveryTracker;

/// Upper bound on one blocking wait for a datagram. Short enough that a
/// lowered run flag is observed promptly, long enough to stay off the CPU
/// while the link is quiet.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(500);

/// Listens for acknowledgement datagrams and records them in the shared
/// tracker. Malformed payloads are logged and skipped; only socket errors
/// other than a poll timeout stop the loop.
pub struct Receiver {
    socket: UdpSocket,
    tracker: Arc<DeliveryTracker>,
    running: Arc<AtomicBool>,
    buf: [u8; MAX_ACK_SIZE],
}

impl Receiver {
    /// Binds the inbound socket. A bind failure is fatal and surfaces here,
    /// before any loop starts.
    pub fn bind<A: ToSocketAddrs>(
        addr: A,
        poll_timeout: Duration,
        tracker: Arc<DeliveryTracker>,
        running: Arc<AtomicBool>,
    ) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(poll_timeout))?;

        Ok(Self {
            socket,
            tracker,
            running,
            buf: [0u8; MAX_ACK_SIZE],
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn run(mut self) -> io::Result<()> {
        while self.running.load(Ordering::SeqCst) {
            match self.socket.recv_from(&mut self.buf) {
                Ok((len, from)) => match Acknowledgement::decode(&self.buf[..len]) {
                    Ok(ack) => {
                        self.tracker.record_received(ack.count, Instant::now());
                        log::debug!("ack {} from {from}", ack.count);
                    }
                    Err(e) => log::warn!("ignoring datagram from {from}: {e}"),
                },
                // Poll timeout: not an error, just a chance to re-check the flag.
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
