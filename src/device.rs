//! Device descriptor data model and driver capability traits.
//!
//! ```text
//!   Driver ──▶ capability traits ──▶ dispatch core (domain)
//! ```
//!
//! Device drivers implement [`AttrHandler`] once per attribute and
//! [`DeviceOps`] once per device.  The dispatch core consumes them through
//! the registry, so it never touches hardware directly.  Handlers capture
//! their device state (typically `Rc<RefCell<..>>`) and take `&self`; the
//! dispatch model is single-threaded, one command at a time.

use crate::error::{Error, Result};

// ───────────────────────────────────────────────────────────────
// Channel context
// ───────────────────────────────────────────────────────────────

/// Channel-scope context passed to attribute handlers.
///
/// `number` is derived from the channel name's last run of decimal digits
/// ("voltage2" → 2, "altvoltage10" → 10); a name without digits carries
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChanInfo {
    /// Numeric channel id, if the name carries one.
    pub number: Option<u32>,
    /// `true` for output channels.
    pub output: bool,
}

// ───────────────────────────────────────────────────────────────
// Attribute handler (driver → core)
// ───────────────────────────────────────────────────────────────

/// Show/store handler backing one named attribute.
///
/// Either method may be left at its default for a write-only or read-only
/// attribute; the default reports [`Error::NotSupported`].
pub trait AttrHandler {
    /// Read the attribute value into `out`.  Returns the byte count
    /// produced, or any negative-coded error the driver chooses.
    fn show(&self, out: &mut [u8], ch: Option<&ChanInfo>) -> Result<usize> {
        let _ = (out, ch);
        Err(Error::NotSupported)
    }

    /// Write `data` as the new attribute value.  Returns bytes consumed.
    fn store(&self, data: &[u8], ch: Option<&ChanInfo>) -> Result<usize> {
        let _ = (data, ch);
        Err(Error::NotSupported)
    }
}

/// Named, show/store-backed value scoped to a device or a channel.
///
/// Identity is `name`, unique within its owning scope.
pub struct Attribute {
    /// Attribute name, unique within the owning device or channel.
    pub name: &'static str,
    handler: Box<dyn AttrHandler>,
}

impl Attribute {
    pub fn new(name: &'static str, handler: impl AttrHandler + 'static) -> Self {
        Self {
            name,
            handler: Box::new(handler),
        }
    }

    /// Invoke the driver's show handler.
    pub fn show(&self, out: &mut [u8], ch: Option<&ChanInfo>) -> Result<usize> {
        self.handler.show(out, ch)
    }

    /// Invoke the driver's store handler.
    pub fn store(&self, data: &[u8], ch: Option<&ChanInfo>) -> Result<usize> {
        self.handler.store(data, ch)
    }
}

impl core::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Attribute").field("name", &self.name).finish()
    }
}

// ───────────────────────────────────────────────────────────────
// Channels and descriptors
// ───────────────────────────────────────────────────────────────

/// Direction-tagged sub-unit of a device with its own attribute list.
///
/// Identity is `(name, output)`, unique within a device.
pub struct Channel {
    pub name: &'static str,
    /// `true` for output channels.
    pub output: bool,
    pub attributes: Vec<Attribute>,
}

/// Immutable description of a device: its device-level attributes and its
/// channels, both in driver-declared order.  The aggregate read/write wire
/// format depends on this ordering.
#[derive(Default)]
pub struct DeviceDescriptor {
    pub attributes: Vec<Attribute>,
    pub channels: Vec<Channel>,
}

impl DeviceDescriptor {
    /// Locate a channel by exact `(name, output)` identity.
    pub fn channel(&self, name: &str, output: bool) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.name == name && c.output == output)
    }
}

// ───────────────────────────────────────────────────────────────
// Device capabilities (bulk transfer + self-description)
// ───────────────────────────────────────────────────────────────

/// Optional bulk-transfer and self-description capabilities of a device.
///
/// Every method defaults to [`Error::NotSupported`]; a driver overrides
/// only what its hardware provides.  `ch_mask` is the open-channel bitset
/// stored by the transfer coordinator's `open`.
pub trait DeviceOps {
    /// Capture `bytes_count` bytes from the device into its staging area.
    fn transfer_dev_to_mem(&self, bytes_count: usize, ch_mask: u32) -> Result<usize> {
        let _ = (bytes_count, ch_mask);
        Err(Error::NotSupported)
    }

    /// Copy one chunk out of the staging area.  The caller owns `offset`
    /// and advances it across repeated calls.
    fn read_dev(
        &self,
        out: &mut [u8],
        offset: usize,
        bytes_count: usize,
        ch_mask: u32,
    ) -> Result<usize> {
        let _ = (out, offset, bytes_count, ch_mask);
        Err(Error::NotSupported)
    }

    /// Push the staging area out to the device.
    fn transfer_mem_to_dev(&self, bytes_count: usize, ch_mask: u32) -> Result<usize> {
        let _ = (bytes_count, ch_mask);
        Err(Error::NotSupported)
    }

    /// Copy one chunk into the staging area at `offset`.
    fn write_dev(
        &self,
        data: &[u8],
        offset: usize,
        bytes_count: usize,
        ch_mask: u32,
    ) -> Result<usize> {
        let _ = (data, offset, bytes_count, ch_mask);
        Err(Error::NotSupported)
    }

    /// Append this device's capability-descriptor XML fragment to `out`.
    fn xml_fragment(&self, out: &mut String) -> Result<()> {
        let _ = out;
        Err(Error::NotSupported)
    }
}
