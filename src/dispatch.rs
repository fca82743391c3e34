//! Attribute resolution and read/write dispatch.
//!
//! Resolves `(device, channel, attribute)` tuples against the registry and
//! a device's descriptor, then performs a single handler invocation or an
//! aggregate walk over the resolved scope:
//!
//! ```text
//!   device ──▶ interface ──▶ scope (device attrs │ channel attrs)
//!                                 │
//!            attribute name ──────┤  exact match → one show/store
//!            empty name ──────────┘  aggregate   → framing walk
//! ```
//!
//! Handler results are propagated unmodified; driver-chosen negative codes
//! travel as [`Error::Driver`].

use log::debug;

use crate::device::{Attribute, ChanInfo};
use crate::error::{Error, Result};
use crate::framing;
use crate::registry::{Interface, Registry};

// ───────────────────────────────────────────────────────────────
// Channel-number extraction
// ───────────────────────────────────────────────────────────────

/// Extract a channel's numeric id from its name: the last contiguous run
/// of decimal digits anywhere in the name.
///
/// `"voltage2"` → `Some(2)`, `"altvoltage10"` → `Some(10)`,
/// `"temp"` → `None`.
pub fn channel_number(name: &str) -> Option<u32> {
    let bytes = name.as_bytes();
    let mut number = None;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            number = name[start..i].parse().ok().or(number);
        } else {
            i += 1;
        }
    }

    number
}

// ───────────────────────────────────────────────────────────────
// Entry points (protocol callback surface)
// ───────────────────────────────────────────────────────────────

/// Read a device-scope attribute (aggregate when `attr` is empty).
pub fn read_attr(reg: &Registry, device: &str, attr: &str, out: &mut [u8]) -> Result<usize> {
    debug!("dispatch: read '{}'/'{}'", device, attr);
    access(reg, device, "", false, attr, Access::Read(out))
}

/// Write a device-scope attribute (aggregate when `attr` is empty).
pub fn write_attr(reg: &Registry, device: &str, attr: &str, data: &[u8]) -> Result<usize> {
    debug!("dispatch: write '{}'/'{}'", device, attr);
    access(reg, device, "", false, attr, Access::Write(data))
}

/// Read a channel-scope attribute (aggregate when `attr` is empty).
pub fn ch_read_attr(
    reg: &Registry,
    device: &str,
    channel: &str,
    output: bool,
    attr: &str,
    out: &mut [u8],
) -> Result<usize> {
    debug!("dispatch: read '{}'/{}:'{}'/'{}'", device, output, channel, attr);
    access(reg, device, channel, output, attr, Access::Read(out))
}

/// Write a channel-scope attribute (aggregate when `attr` is empty).
pub fn ch_write_attr(
    reg: &Registry,
    device: &str,
    channel: &str,
    output: bool,
    attr: &str,
    data: &[u8],
) -> Result<usize> {
    debug!("dispatch: write '{}'/{}:'{}'/'{}'", device, output, channel, attr);
    access(reg, device, channel, output, attr, Access::Write(data))
}

// ───────────────────────────────────────────────────────────────
// Resolution
// ───────────────────────────────────────────────────────────────

enum Access<'a> {
    Read(&'a mut [u8]),
    Write(&'a [u8]),
}

fn access(
    reg: &Registry,
    device: &str,
    channel: &str,
    output: bool,
    attr: &str,
    access: Access<'_>,
) -> Result<usize> {
    let iface = reg.lookup(device).ok_or(Error::NotFound)?;
    let (attrs, ch) = resolve_scope(iface, channel, output)?;
    let ch = ch.as_ref();

    if attr.is_empty() {
        return match access {
            Access::Read(out) => framing::read_all(attrs, out, ch),
            Access::Write(data) => framing::write_all(attrs, data, ch),
        };
    }

    let attribute = attrs
        .iter()
        .find(|a| a.name == attr)
        .ok_or(Error::NotFound)?;
    match access {
        Access::Read(out) => attribute.show(out, ch),
        Access::Write(data) => attribute.store(data, ch),
    }
}

/// Resolve the attribute scope: the device's own list for an empty channel
/// name, otherwise the list of the channel matching `(channel, output)`.
fn resolve_scope<'a>(
    iface: &'a Interface,
    channel: &str,
    output: bool,
) -> Result<(&'a [Attribute], Option<ChanInfo>)> {
    if channel.is_empty() {
        return Ok((&iface.descriptor().attributes, None));
    }
    let ch = iface
        .descriptor()
        .channel(channel, output)
        .ok_or(Error::NotFound)?;
    let info = ChanInfo {
        number: channel_number(channel),
        output,
    };
    Ok((&ch.attributes, Some(info)))
}
