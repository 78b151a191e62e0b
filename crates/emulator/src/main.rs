mod config;
mod serial;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use imusim::{DeliveryTracker, Emitter, Receiver, run_link};

use config::EmulatorConfig;
use serial::VirtualSerialPort;

#[derive(Parser)]
#[command(name = "imusim-emulator")]
#[command(about = "Emulated IMU over a virtual serial device, with packet-loss accounting")]
struct Args {
    /// UDP port to listen on for acknowledgement datagrams.
    #[arg(short, long, default_value_t = imusim::DEFAULT_ACK_PORT)]
    port: u16,

    /// Milliseconds between emitted frames.
    #[arg(short, long, default_value_t = imusim::DEFAULT_SEND_INTERVAL_MS)]
    interval_ms: u64,

    /// Wrap the sequence counter at this modulus instead of counting up
    /// forever (classic hardware wraps at 1000). Wrapping folds distinct
    /// sends onto one sequence number, so loss accounting gets fuzzier.
    #[arg(long)]
    wrap: Option<u32>,

    /// Publish a stable symlink to the pty device at this path.
    #[arg(long)]
    link: Option<PathBuf>,

    /// Milliseconds the receiver waits per poll before re-checking for
    /// shutdown.
    #[arg(long, default_value_t = 500)]
    poll_timeout_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = EmulatorConfig {
        ack_port: args.port,
        send_interval: Duration::from_millis(args.interval_ms),
        poll_timeout: Duration::from_millis(args.poll_timeout_ms),
        wrap: args.wrap,
        link_path: args.link,
    };

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("installing shutdown handler")?;
    }

    let port = VirtualSerialPort::open(config.link_path.as_deref())?;
    log::info!("virtual serial device: {}", port.device_path().display());
    if let Some(link) = &config.link_path {
        log::info!("device symlink: {}", link.display());
    }

    let tracker = Arc::new(DeliveryTracker::new());

    let receiver = Receiver::bind(
        ("0.0.0.0", config.ack_port),
        config.poll_timeout,
        Arc::clone(&tracker),
        Arc::clone(&running),
    )
    .with_context(|| format!("binding ack socket on UDP port {}", config.ack_port))?;
    log::info!("listening for acks on UDP port {}", config.ack_port);

    let mut emitter = Emitter::new(
        port,
        Arc::clone(&tracker),
        Arc::clone(&running),
        config.send_interval,
    );
    if let Some(modulus) = config.wrap {
        emitter = emitter.with_wrap(modulus);
    }

    log::info!(
        "emitting a frame every {} ms; Ctrl-C stops the run and prints the report",
        args.interval_ms
    );

    let report = run_link(emitter, receiver, Arc::clone(&running), tracker)?;
    println!("{report}");

    Ok(())
}
