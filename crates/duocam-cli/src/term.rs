//! Raw-mode terminal key polling.
//!
//! The capture loop wants single keystrokes without Enter, and it wants to
//! keep capturing while no key is pressed. Stdin is put into raw mode for
//! the lifetime of the guard and restored on drop, and keys are read with a
//! short `poll(2)` timeout.

use std::io::Read;
use std::mem::MaybeUninit;
use std::os::unix::io::AsRawFd;

/// RAII guard that holds stdin in raw mode.
pub struct RawTerminal {
    fd: libc::c_int,
    saved: libc::termios,
}

impl RawTerminal {
    /// Switch stdin to raw mode. Fails when stdin is not a terminal
    /// (redirected input, CI), in which case the caller runs without
    /// keyboard control.
    pub fn new() -> std::io::Result<Self> {
        let fd = std::io::stdin().as_raw_fd();

        let mut saved = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: fd is a valid descriptor and `saved` is a properly sized
        // out-parameter; tcgetattr fully initializes it on success.
        if unsafe { libc::tcgetattr(fd, saved.as_mut_ptr()) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        // SAFETY: tcgetattr returned 0, so the struct is initialized.
        let saved = unsafe { saved.assume_init() };

        let mut raw = saved;
        // SAFETY: `raw` is a valid termios value copied from the kernel.
        unsafe { libc::cfmakeraw(&mut raw) };
        // Keep output post-processing so tracing lines still wrap with \r\n.
        raw.c_oflag |= libc::OPOST;

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(std::io::Error::last_os_error());
        }

        Ok(Self { fd, saved })
    }

    /// Wait up to `timeout_ms` for a key press; `None` on timeout.
    pub fn poll_key(&self, timeout_ms: i32) -> std::io::Result<Option<u8>> {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `pfd` is a single valid pollfd and the count matches.
        let ready = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        if ready < 0 {
            return Err(std::io::Error::last_os_error());
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let n = std::io::stdin().read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        // SAFETY: restoring the attributes we saved from the same fd.
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSANOW, &self.saved);
        }
    }
}
