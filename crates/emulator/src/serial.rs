use std::fs::File;
use std::io::{self, Write};
use std::os::fd::OwnedFd;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nix::pty::openpty;
use nix::sys::termios::{self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg};

/// Host side of a pseudoterminal pair posing as a raw serial device.
///
/// The slave end is configured as an 8-bit-clean channel (no input/output
/// processing, no echo, no control characters) and kept open for the
/// lifetime of the port so the device stays usable while the system under
/// test attaches. Frames are written through the master end.
pub struct VirtualSerialPort {
    master: File,
    _slave: OwnedFd,
    device_path: PathBuf,
    link_path: Option<PathBuf>,
}

impl VirtualSerialPort {
    pub fn open(link: Option<&Path>) -> Result<Self> {
        let pty = openpty(None, None).context("creating pseudoterminal pair")?;

        let mut attrs = termios::tcgetattr(&pty.slave).context("reading terminal attributes")?;
        attrs.input_flags = InputFlags::empty();
        attrs.output_flags = OutputFlags::empty();
        attrs.local_flags = LocalFlags::empty();
        attrs.control_flags |= ControlFlags::CS8;
        termios::tcsetattr(&pty.slave, SetArg::TCSANOW, &attrs)
            .context("switching device to raw mode")?;

        let device_path = nix::unistd::ttyname(&pty.slave).context("resolving device path")?;

        let link_path = match link {
            Some(path) => {
                // Replace a stale link from an earlier run.
                let _ = std::fs::remove_file(path);
                std::os::unix::fs::symlink(&device_path, path).with_context(|| {
                    format!("linking {} -> {}", path.display(), device_path.display())
                })?;
                Some(path.to_path_buf())
            }
            None => None,
        };

        Ok(Self {
            master: File::from(pty.master),
            _slave: pty.slave,
            device_path,
            link_path,
        })
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }
}

impl Write for VirtualSerialPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.master.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.master.flush()
    }
}

impl Drop for VirtualSerialPort {
    fn drop(&mut self) {
        if let Some(link) = &self.link_path {
            let _ = std::fs::remove_file(link);
        }
    }
}
