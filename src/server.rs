//! Server core: registry + physical link, one dispatch step at a time.
//!
//! [`Core`] is the object the protocol command interpreter drives.  It
//! composes the device registry with exactly one phy (a serial passthrough
//! or the network multiplexer) and exposes the full callback surface the
//! interpreter needs: attribute access, bulk transfer, capability XML and
//! raw phy I/O.
//!
//! ```text
//!   host main loop ──▶ core.step(|core| interpreter.service(core))
//!                         │
//!                         ├── phy.rotate()       (fairness)
//!                         └── service_fn(core)   (one command)
//! ```
//!
//! The model is single-threaded: one command runs to completion before the
//! next begins, so handlers never observe concurrent access.

use crate::dispatch;
use crate::error::Result;
use crate::phy::PhyLink;
use crate::registry::{Interface, Registry};
use crate::transfer;
use crate::xml;

/// Dispatch core bound to one physical-link configuration.
pub struct Core<P: PhyLink> {
    registry: Registry,
    phy: P,
}

impl<P: PhyLink> Core<P> {
    pub fn new(phy: P) -> Self {
        Self {
            registry: Registry::new(),
            phy,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── device lifecycle ───────────────────────────────────────

    /// Register a device interface with the core.
    pub fn register(&mut self, iface: Interface) -> Result<()> {
        self.registry.register(iface)
    }

    /// Remove a device interface by name.
    pub fn unregister(&mut self, name: &str) -> Result<()> {
        self.registry.unregister(name)
    }

    /// True iff `device` is currently registered.
    pub fn is_supported(&self, device: &str) -> bool {
        self.registry.is_supported(device)
    }

    // ── attribute access ───────────────────────────────────────

    /// Read a device-scope attribute; empty `attr` reads the whole scope.
    pub fn read_attr(&self, device: &str, attr: &str, out: &mut [u8]) -> Result<usize> {
        dispatch::read_attr(&self.registry, device, attr, out)
    }

    /// Write a device-scope attribute; empty `attr` writes the whole scope.
    pub fn write_attr(&self, device: &str, attr: &str, data: &[u8]) -> Result<usize> {
        dispatch::write_attr(&self.registry, device, attr, data)
    }

    /// Read a channel-scope attribute; empty `attr` reads the whole scope.
    pub fn ch_read_attr(
        &self,
        device: &str,
        channel: &str,
        output: bool,
        attr: &str,
        out: &mut [u8],
    ) -> Result<usize> {
        dispatch::ch_read_attr(&self.registry, device, channel, output, attr, out)
    }

    /// Write a channel-scope attribute; empty `attr` writes the whole scope.
    pub fn ch_write_attr(
        &self,
        device: &str,
        channel: &str,
        output: bool,
        attr: &str,
        data: &[u8],
    ) -> Result<usize> {
        dispatch::ch_write_attr(&self.registry, device, channel, output, attr, data)
    }

    // ── bulk transfer ──────────────────────────────────────────

    /// Open `device` for bulk transfer on the channels in `mask`.
    pub fn open_dev(&mut self, device: &str, sample_size: usize, mask: u32) -> Result<()> {
        transfer::open(&mut self.registry, device, sample_size, mask)
    }

    /// Close `device`, clearing its open-channel mask.
    pub fn close_dev(&mut self, device: &str) -> Result<()> {
        transfer::close(&mut self.registry, device)
    }

    /// Channels currently opened on `device`.
    pub fn get_mask(&self, device: &str) -> Result<u32> {
        transfer::get_mask(&self.registry, device)
    }

    /// Capture `bytes_count` bytes from the device into its staging area.
    pub fn transfer_dev_to_mem(&self, device: &str, bytes_count: usize) -> Result<usize> {
        transfer::transfer_dev_to_mem(&self.registry, device, bytes_count)
    }

    /// Read one chunk of captured samples out of the staging area.
    pub fn read_dev(
        &self,
        device: &str,
        out: &mut [u8],
        offset: usize,
        bytes_count: usize,
    ) -> Result<usize> {
        transfer::read_dev(&self.registry, device, out, offset, bytes_count)
    }

    /// Push the staging area out to the device.
    pub fn transfer_mem_to_dev(&self, device: &str, bytes_count: usize) -> Result<usize> {
        transfer::transfer_mem_to_dev(&self.registry, device, bytes_count)
    }

    /// Write one chunk of outgoing samples into the staging area.
    pub fn write_dev(
        &self,
        device: &str,
        data: &[u8],
        offset: usize,
        bytes_count: usize,
    ) -> Result<usize> {
        transfer::write_dev(&self.registry, device, data, offset, bytes_count)
    }

    // ── self-description ───────────────────────────────────────

    /// Build the capability-descriptor XML for every registered device.
    pub fn context_xml(&self) -> Result<String> {
        xml::context_xml(&self.registry)
    }

    // ── phy I/O ────────────────────────────────────────────────

    /// Read exactly `buf.len()` bytes from the current peer (fewer on a
    /// transport failure; see the phy's contract).
    pub fn phy_read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.phy.read(buf)
    }

    /// Write `data` to the current peer.
    pub fn phy_write(&mut self, data: &[u8]) -> Result<usize> {
        self.phy.write(data)
    }

    /// Run one dispatch step: rotate the phy's connection state, then let
    /// `service` interpret and execute one command against this core.
    pub fn step<F>(&mut self, service: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.phy.rotate()?;
        service(self)
    }
}
