//! Blocking UDP socket used by both ends of a MUDP link.

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

/// Winsock's `WSAEMSGSIZE`: the datagram did not fit the receive buffer.
const WSAEMSGSIZE: i32 = 10040;

/// Error type for socket operations.
#[derive(Debug)]
pub enum SocketError {
    /// Underlying I/O error
    Io(io::Error),
}

impl SocketError {
    /// Whether the error is a read/write timeout rather than a hard failure.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Io(err) => matches!(
                err.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
        }
    }

    /// Whether the platform rejected a datagram longer than the receive buffer.
    ///
    /// Unix truncates such datagrams silently; Windows reports `WSAEMSGSIZE`.
    #[must_use]
    pub fn is_oversize(&self) -> bool {
        match self {
            Self::Io(err) => cfg!(windows) && err.raw_os_error() == Some(WSAEMSGSIZE),
        }
    }
}

impl fmt::Display for SocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for SocketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for SocketError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// What a single `recv_from` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datagram {
    /// Datagram fit the buffer; `len` bytes are valid.
    Complete {
        /// Bytes written into the buffer
        len: usize,
        /// Sender address
        source: SocketAddr,
    },
    /// Datagram filled (or overflowed) the buffer and was cut short.
    Oversize {
        /// Bytes the platform reported
        len: usize,
    },
}

/// Shared blocking UDP socket.
#[derive(Debug, Clone)]
pub struct SocketBinding {
    socket: Arc<UdpSocket>,
}

impl SocketBinding {
    /// Bind to the provided address with the given timeouts.
    pub fn bind(
        addr: SocketAddr,
        read_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> Result<Self, SocketError> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(false)?;
        socket.set_read_timeout(read_timeout)?;
        socket.set_write_timeout(write_timeout)?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    /// Bind an ephemeral port on the unspecified address matching `target`'s family.
    pub fn ephemeral_for(
        target: SocketAddr,
        read_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> Result<Self, SocketError> {
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        Self::bind(local, read_timeout, write_timeout)
    }

    /// Send one datagram to `addr`.
    pub fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, SocketError> {
        Ok(self.socket.send_to(buf, addr)?)
    }

    /// Receive one datagram, classifying anything that fills `buf` as oversize.
    ///
    /// Pass a buffer one byte longer than the largest acceptable datagram.
    pub fn recv_datagram(&self, buf: &mut [u8]) -> Result<Datagram, SocketError> {
        match self.socket.recv_from(buf) {
            Ok((len, _)) if len >= buf.len() => Ok(Datagram::Oversize { len }),
            Ok((len, source)) => Ok(Datagram::Complete { len, source }),
            Err(err) => {
                let err = SocketError::from(err);
                if err.is_oversize() {
                    Ok(Datagram::Oversize { len: buf.len() })
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Access the local address for this binding.
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        Ok(self.socket.local_addr()?)
    }
}
