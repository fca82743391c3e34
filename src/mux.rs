//! Connection multiplexer: fair multi-client service over one network phy.
//!
//! Accepted clients wait in a bounded FIFO; exactly one is the *current*
//! connection that phy reads and writes operate against.  Each dispatch
//! step rotates the current connection back to the queue tail, so every
//! connected client gets exactly one service opportunity per full sweep
//! and a chatty client cannot starve the others.
//!
//! ```text
//!              accept (poll)          rotate
//!  listener ──────────────▶ ┌─────────────────┐
//!                           │  FIFO (≤ 4)     │──▶ current ──▶ phy r/w
//!                           └─────────────────┘      │
//!                                    ▲               │ peer reset
//!                                    └── requeue ────┴──▶ Dead (released)
//! ```
//!
//! The accept-poll loop is the core's sole suspension point: with zero
//! clients connected a dispatch step has no useful work until one arrives.
//! The UART phy bypasses this module entirely.

use heapless::Deque;
use log::{info, warn};

use crate::error::{Error, Result};
use crate::phy::{ByteLink, Listener, PhyLink};

/// Capacity of the waiting-client queue; bounds memory under a
/// connection flood.
pub const MAX_CLIENTS: usize = 4;

/// Byte written at the start of the destination buffer when a read is
/// aborted by a transport error, so the command interpreter never parses
/// a half-filled buffer as a valid command.
pub const ABORT_SENTINEL: u8 = b'*';

/// State of the current-connection slot.
enum Current<L> {
    /// No connection selected; the next read pops one from the queue.
    Empty,
    /// Connection being serviced by this dispatch step.
    Active(L),
    /// The serviced connection died mid-step; released, never requeued.
    Dead,
}

/// Bounded round-robin multiplexer over accepted client links.
pub struct ConnMux<A: Listener> {
    listener: A,
    queue: Deque<A::Link, MAX_CLIENTS>,
    current: Current<A::Link>,
}

impl<A: Listener> ConnMux<A> {
    pub fn new(listener: A) -> Self {
        Self {
            listener,
            queue: Deque::new(),
            current: Current::Empty,
        }
    }

    /// Clients waiting in the queue (excluding the current connection).
    pub fn queued_clients(&self) -> usize {
        self.queue.len()
    }

    /// True while a connection is selected for service.
    pub fn has_active(&self) -> bool {
        matches!(self.current, Current::Active(_))
    }

    /// Drain pending accepts into the queue, then select the head as the
    /// current connection.  Polls the listener for as long as no client
    /// at all is connected; once the queue is full, acceptance is
    /// deferred to a later step instead of dropping a connection.
    fn next_client(&mut self) -> Result<()> {
        loop {
            if self.queue.is_full() {
                break;
            }
            match self.listener.accept()? {
                Some(link) => {
                    // Fullness was checked above, so the push cannot fail.
                    self.queue.push_back(link).map_err(|_| Error::OutOfMemory)?;
                    info!("mux: client connected ({} queued)", self.queue.len());
                }
                None if self.queue.is_empty() => {
                    // Sole suspension point: poll until a client connects.
                    continue;
                }
                None => break,
            }
        }

        let link = self.queue.pop_front().ok_or(Error::Io)?;
        self.current = Current::Active(link);
        Ok(())
    }
}

enum ReadOutcome {
    Complete,
    PeerClosed,
    Aborted,
}

impl<A: Listener> PhyLink for ConnMux<A> {
    /// Requeue the serviced connection (if still alive) and clear the
    /// slot, giving the next queued client its turn.
    fn rotate(&mut self) -> Result<()> {
        match core::mem::replace(&mut self.current, Current::Empty) {
            // The current link came out of the queue, so a slot is free.
            Current::Active(link) => self
                .queue
                .push_back(link)
                .map_err(|_| Error::OutOfMemory),
            Current::Empty | Current::Dead => Ok(()),
        }
    }

    /// Read `buf.len()` bytes from the current connection, selecting one
    /// first if the slot is empty.
    ///
    /// A peer reset releases the connection (it never reappears in the
    /// queue) and returns the partial count; any other transport error
    /// aborts the read, marks `buf` with [`ABORT_SENTINEL`], and also
    /// returns the partial count.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if matches!(self.current, Current::Dead) {
            return Err(Error::Disconnected);
        }
        if matches!(self.current, Current::Empty) {
            self.next_client()?;
        }
        let Current::Active(link) = &mut self.current else {
            return Err(Error::Disconnected);
        };

        let mut done = 0;
        let mut outcome = ReadOutcome::Complete;
        while done < buf.len() {
            match link.recv(&mut buf[done..]) {
                Ok(0) | Err(Error::Disconnected) => {
                    outcome = ReadOutcome::PeerClosed;
                    break;
                }
                Ok(n) => done += n,
                Err(e) => {
                    warn!("mux: read error, aborting command: {}", e);
                    outcome = ReadOutcome::Aborted;
                    break;
                }
            }
        }

        match outcome {
            ReadOutcome::Complete => {}
            ReadOutcome::PeerClosed => {
                info!("mux: client disconnected");
                self.current = Current::Dead;
            }
            ReadOutcome::Aborted => buf[0] = ABORT_SENTINEL,
        }
        Ok(done)
    }

    /// Write to the current connection.  Calling this with an `Empty` or
    /// `Dead` slot is a caller error.
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        match &mut self.current {
            Current::Active(link) => link.send(data),
            Current::Empty | Current::Dead => {
                warn!("mux: write with no active client");
                Err(Error::Disconnected)
            }
        }
    }
}
