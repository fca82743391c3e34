//! Buffer-transfer coordination.
//!
//! Thin dispatch from device-level bulk-transfer requests to the driver's
//! [`DeviceOps`](crate::device::DeviceOps) capabilities, honoring the
//! interface's open-channel mask.  The coordinator is stateless with
//! respect to transfer progress: the caller owns `offset` and advances it
//! across repeated chunk calls.

use log::info;

use crate::error::{Error, Result};
use crate::registry::Registry;

/// Open a device for bulk sample transfer on the channels in `mask`.
///
/// `sample_size` is accepted for interface symmetry with the protocol
/// surface; chunk geometry is the driver's concern.  Mask bits beyond the
/// device's channel count are rejected with [`Error::InvalidArgument`].
pub fn open(reg: &mut Registry, device: &str, sample_size: usize, mask: u32) -> Result<()> {
    let _ = sample_size;
    let iface = reg.lookup_mut(device).ok_or(Error::NotFound)?;

    let num_ch = iface.descriptor().channels.len();
    let valid = if num_ch >= 32 {
        u32::MAX
    } else if num_ch == 0 {
        0
    } else {
        u32::MAX >> (32 - num_ch as u32)
    };
    if mask & !valid != 0 {
        return Err(Error::InvalidArgument);
    }

    iface.set_ch_mask(mask);
    info!("transfer: '{}' open, mask {:#06x}", device, mask);
    Ok(())
}

/// Close a device: clears its open-channel mask.
pub fn close(reg: &mut Registry, device: &str) -> Result<()> {
    let iface = reg.lookup_mut(device).ok_or(Error::NotFound)?;
    iface.set_ch_mask(0);
    info!("transfer: '{}' closed", device);
    Ok(())
}

/// Channels currently opened on `device`.
pub fn get_mask(reg: &Registry, device: &str) -> Result<u32> {
    Ok(reg.lookup(device).ok_or(Error::NotFound)?.ch_mask())
}

/// Capture `bytes_count` bytes from the device into its staging area.
pub fn transfer_dev_to_mem(reg: &Registry, device: &str, bytes_count: usize) -> Result<usize> {
    let iface = reg.lookup(device).ok_or(Error::NotFound)?;
    iface.ops().transfer_dev_to_mem(bytes_count, iface.ch_mask())
}

/// Read one chunk of captured samples out of the staging area.
pub fn read_dev(
    reg: &Registry,
    device: &str,
    out: &mut [u8],
    offset: usize,
    bytes_count: usize,
) -> Result<usize> {
    let iface = reg.lookup(device).ok_or(Error::NotFound)?;
    iface.ops().read_dev(out, offset, bytes_count, iface.ch_mask())
}

/// Push the staging area out to the device.
pub fn transfer_mem_to_dev(reg: &Registry, device: &str, bytes_count: usize) -> Result<usize> {
    let iface = reg.lookup(device).ok_or(Error::NotFound)?;
    iface.ops().transfer_mem_to_dev(bytes_count, iface.ch_mask())
}

/// Write one chunk of outgoing samples into the staging area.
pub fn write_dev(
    reg: &Registry,
    device: &str,
    data: &[u8],
    offset: usize,
    bytes_count: usize,
) -> Result<usize> {
    let iface = reg.lookup(device).ok_or(Error::NotFound)?;
    iface.ops().write_dev(data, offset, bytes_count, iface.ch_mask())
}
