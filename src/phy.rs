//! Physical-link abstraction: any byte-oriented channel the protocol
//! interpreter is served over.
//!
//! Concrete implementations live in the host:
//! - UART serial driver (or USB CDC)
//! - TCP listener + accepted client sockets
//!
//! The server core is generic over [`PhyLink`], so adding a new transport
//! requires zero changes to the dispatch logic.  The serial configuration
//! wraps one fixed peer in [`SerialPhy`]; the network configuration uses
//! the [`ConnMux`](crate::mux::ConnMux) multiplexer.

use crate::error::{Error, Result};

/// Blocking byte-oriented link: a serial line or one accepted client.
pub trait ByteLink {
    /// Read into `buf`, blocking until at least one byte arrives.
    /// `Ok(0)` means the peer performed an orderly close.
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write `data` to the link.  Returns the byte count written.
    fn send(&mut self, data: &[u8]) -> Result<usize>;
}

/// Non-blocking connection acceptor for the network phy.
pub trait Listener {
    type Link: ByteLink;

    /// Poll for a pending client.  `Ok(None)` when nothing is waiting.
    fn accept(&mut self) -> Result<Option<Self::Link>>;
}

/// One physical-link configuration of the server core.
pub trait PhyLink {
    /// Rotate connection state ahead of one dispatch step.  A no-op for
    /// single-peer links.
    fn rotate(&mut self) -> Result<()>;

    /// Read exactly `buf.len()` bytes, or fewer on a transport failure.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write `data` to the current peer.
    fn write(&mut self, data: &[u8]) -> Result<usize>;
}

/// Serial passthrough: one fixed peer, no multiplexing.
pub struct SerialPhy<L: ByteLink> {
    link: L,
}

impl<L: ByteLink> SerialPhy<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }
}

impl<L: ByteLink> PhyLink for SerialPhy<L> {
    fn rotate(&mut self) -> Result<()> {
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut done = 0;
        while done < buf.len() {
            match self.link.recv(&mut buf[done..])? {
                0 => return Err(Error::Disconnected),
                n => done += n,
            }
        }
        Ok(done)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.link.send(data)
    }
}
