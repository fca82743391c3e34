//! Device interface registry.
//!
//! Maps device names to interface records (descriptor + driver
//! capabilities + open-channel mask).  Device counts are embedded-scale,
//! so lookup is a linear scan over a fixed-capacity vector; registration
//! past capacity reports [`Error::OutOfMemory`] instead of growing.

use heapless::Vec;
use log::{info, warn};

use crate::device::{DeviceDescriptor, DeviceOps};
use crate::error::{Error, Result};

/// Maximum number of simultaneously registered device interfaces.
pub const MAX_DEVICES: usize = 8;

// ───────────────────────────────────────────────────────────────
// Interface record
// ───────────────────────────────────────────────────────────────

/// Registry entry binding a device name to its descriptor, driver
/// capabilities, and current open-channel mask.
pub struct Interface {
    name: &'static str,
    descriptor: DeviceDescriptor,
    ops: Box<dyn DeviceOps>,
    ch_mask: u32,
}

impl Interface {
    pub fn new(
        name: &'static str,
        descriptor: DeviceDescriptor,
        ops: impl DeviceOps + 'static,
    ) -> Self {
        Self {
            name,
            descriptor,
            ops: Box::new(ops),
            ch_mask: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Channels currently opened for bulk sample transfer.
    pub fn ch_mask(&self) -> u32 {
        self.ch_mask
    }

    pub(crate) fn ops(&self) -> &dyn DeviceOps {
        self.ops.as_ref()
    }

    pub(crate) fn set_ch_mask(&mut self, mask: u32) {
        self.ch_mask = mask;
    }
}

// ───────────────────────────────────────────────────────────────
// Registry
// ───────────────────────────────────────────────────────────────

/// Set of interface records keyed by device name.
///
/// Mutated only by [`register`](Registry::register) and
/// [`unregister`](Registry::unregister); single-threaded access by design.
pub struct Registry {
    interfaces: Vec<Interface, MAX_DEVICES>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            interfaces: Vec::new(),
        }
    }

    /// Register a device interface.
    ///
    /// Duplicate names are rejected with [`Error::InvalidArgument`] so a
    /// lookup result is never ambiguous; a full registry reports
    /// [`Error::OutOfMemory`].
    pub fn register(&mut self, iface: Interface) -> Result<()> {
        if self.lookup(iface.name).is_some() {
            warn!("registry: duplicate device name '{}'", iface.name);
            return Err(Error::InvalidArgument);
        }
        let name = iface.name;
        self.interfaces
            .push(iface)
            .map_err(|_| Error::OutOfMemory)?;
        info!("registry: registered '{}'", name);
        Ok(())
    }

    /// Remove the interface registered under `name`.
    ///
    /// All remaining records keep their relative order.
    pub fn unregister(&mut self, name: &str) -> Result<()> {
        let idx = self
            .interfaces
            .iter()
            .position(|i| i.name == name)
            .ok_or(Error::NotFound)?;
        self.interfaces.remove(idx);
        info!("registry: unregistered '{}'", name);
        Ok(())
    }

    /// Find an interface by device name.
    pub fn lookup(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.iter_mut().find(|i| i.name == name)
    }

    /// True iff a device with this name is registered.
    pub fn is_supported(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Interfaces in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
