//! Mock device driver for integration tests.
//!
//! Models a four-channel ADC: a shared state cell backs the attribute
//! handlers, and a byte staging area backs the bulk-transfer capability.
//! Nothing here touches real hardware.

use std::cell::RefCell;
use std::rc::Rc;

use attrlink::device::{AttrHandler, Attribute, ChanInfo, Channel, DeviceDescriptor, DeviceOps};
use attrlink::{Error, Interface, Result};

pub const NUM_CHANNELS: usize = 4;

// ── Shared driver state ───────────────────────────────────────

pub struct AdcState {
    pub sampling_frequency: u32,
    pub raw: [i32; NUM_CHANNELS],
    pub staging: Vec<u8>,
}

pub type Shared = Rc<RefCell<AdcState>>;

pub fn shared_state() -> Shared {
    Rc::new(RefCell::new(AdcState {
        sampling_frequency: 2000,
        raw: [100, 200, 300, 400],
        staging: Vec::new(),
    }))
}

fn show_number(value: impl ToString, out: &mut [u8]) -> Result<usize> {
    let text = value.to_string();
    if text.len() > out.len() {
        return Err(Error::OutOfMemory);
    }
    out[..text.len()].copy_from_slice(text.as_bytes());
    Ok(text.len())
}

fn parse_number<T: core::str::FromStr>(data: &[u8]) -> Result<T> {
    core::str::from_utf8(data)
        .ok()
        .and_then(|s| s.trim_end_matches('\0').trim().parse().ok())
        .ok_or(Error::InvalidArgument)
}

// ── Attribute handlers ────────────────────────────────────────

pub struct FreqAttr(pub Shared);

impl AttrHandler for FreqAttr {
    fn show(&self, out: &mut [u8], _ch: Option<&ChanInfo>) -> Result<usize> {
        show_number(self.0.borrow().sampling_frequency, out)
    }

    fn store(&self, data: &[u8], _ch: Option<&ChanInfo>) -> Result<usize> {
        self.0.borrow_mut().sampling_frequency = parse_number(data)?;
        Ok(data.len())
    }
}

/// Channel-scope `raw` value; indexes the state array by the channel
/// number carried in the dispatch context.
pub struct RawAttr(pub Shared);

impl RawAttr {
    fn index(ch: Option<&ChanInfo>) -> Result<usize> {
        let number = ch.and_then(|c| c.number).ok_or(Error::InvalidArgument)?;
        let idx = number as usize;
        if idx >= NUM_CHANNELS {
            return Err(Error::InvalidArgument);
        }
        Ok(idx)
    }
}

impl AttrHandler for RawAttr {
    fn show(&self, out: &mut [u8], ch: Option<&ChanInfo>) -> Result<usize> {
        let idx = Self::index(ch)?;
        show_number(self.0.borrow().raw[idx], out)
    }

    fn store(&self, data: &[u8], ch: Option<&ChanInfo>) -> Result<usize> {
        let idx = Self::index(ch)?;
        self.0.borrow_mut().raw[idx] = parse_number(data)?;
        Ok(data.len())
    }
}

// ── Bulk transfer + self-description ──────────────────────────

pub struct AdcOps(pub Shared);

impl DeviceOps for AdcOps {
    fn transfer_dev_to_mem(&self, bytes_count: usize, _ch_mask: u32) -> Result<usize> {
        // Deterministic ramp pattern, enough to assert chunked reads on.
        let mut state = self.0.borrow_mut();
        state.staging = (0..bytes_count).map(|i| i as u8).collect();
        Ok(bytes_count)
    }

    fn read_dev(
        &self,
        out: &mut [u8],
        offset: usize,
        bytes_count: usize,
        _ch_mask: u32,
    ) -> Result<usize> {
        let state = self.0.borrow();
        let end = (offset + bytes_count).min(state.staging.len());
        if offset >= end {
            return Ok(0);
        }
        let n = (end - offset).min(out.len());
        out[..n].copy_from_slice(&state.staging[offset..offset + n]);
        Ok(n)
    }

    fn write_dev(
        &self,
        data: &[u8],
        offset: usize,
        bytes_count: usize,
        _ch_mask: u32,
    ) -> Result<usize> {
        let mut state = self.0.borrow_mut();
        let n = bytes_count.min(data.len());
        if state.staging.len() < offset + n {
            state.staging.resize(offset + n, 0);
        }
        state.staging[offset..offset + n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    fn transfer_mem_to_dev(&self, bytes_count: usize, _ch_mask: u32) -> Result<usize> {
        Ok(bytes_count.min(self.0.borrow().staging.len()))
    }

    fn xml_fragment(&self, out: &mut String) -> Result<()> {
        out.push_str("<device id=\"adc0\" name=\"mock-adc\" >");
        for i in 0..NUM_CHANNELS {
            out.push_str(&format!(
                "<channel id=\"voltage{}\" type=\"input\" ><attribute name=\"raw\" /></channel>",
                i
            ));
        }
        out.push_str("<attribute name=\"sampling_frequency\" /></device>");
        Ok(())
    }
}

// ── Phy stub ──────────────────────────────────────────────────

/// No-op phy for tests that exercise dispatch without transport traffic.
pub struct NullPhy;

impl attrlink::phy::PhyLink for NullPhy {
    fn rotate(&mut self) -> Result<()> {
        Ok(())
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        Ok(data.len())
    }
}

// ── Interface builder ─────────────────────────────────────────

/// Assemble the full mock ADC interface around one shared state cell.
pub fn adc_interface(state: &Shared) -> Interface {
    let channel_names = ["voltage0", "voltage1", "voltage2", "voltage3"];
    let channels = channel_names
        .into_iter()
        .map(|name| Channel {
            name,
            output: false,
            attributes: vec![Attribute::new("raw", RawAttr(state.clone()))],
        })
        .collect();

    let descriptor = DeviceDescriptor {
        attributes: vec![Attribute::new(
            "sampling_frequency",
            FreqAttr(state.clone()),
        )],
        channels,
    };

    Interface::new("adc0", descriptor, AdcOps(state.clone()))
}
