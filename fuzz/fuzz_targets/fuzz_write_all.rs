//! Fuzz target: aggregate-write frame parsing.
//!
//! Drives arbitrary byte streams through `write_all` and asserts that the
//! parser never panics, never consumes past the input, and delivers only
//! in-bounds value slices to the attribute stores.
//!
//! cargo fuzz run fuzz_write_all

#![no_main]

use attrlink::device::{AttrHandler, Attribute, ChanInfo};
use attrlink::framing::write_all;
use attrlink::Result;
use libfuzzer_sys::fuzz_target;

struct BoundsCheck;

impl AttrHandler for BoundsCheck {
    fn store(&self, data: &[u8], _ch: Option<&ChanInfo>) -> Result<usize> {
        assert!(data.len() <= i32::MAX as usize, "length field overflow");
        Ok(data.len())
    }
}

struct RejectAll;

impl AttrHandler for RejectAll {}

fuzz_target!(|data: &[u8]| {
    let attrs = vec![
        Attribute::new("a", BoundsCheck),
        Attribute::new("b", RejectAll),
        Attribute::new("c", BoundsCheck),
    ];

    // Any outcome is fine; consumption past the input is not.
    if let Ok(consumed) = write_all(&attrs, data, None) {
        assert!(consumed <= data.len(), "consumed past end of stream");
    }
});
