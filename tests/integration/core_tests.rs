//! End-to-end dispatch tests: protocol callback surface against the mock
//! ADC driver, exactly the call sequences a command interpreter issues.

use crate::mock_dev::{adc_interface, shared_state, NullPhy};
use attrlink::{Core, Error};

fn adc_core() -> Core<NullPhy> {
    let state = shared_state();
    let mut core = Core::new(NullPhy);
    core.register(adc_interface(&state)).unwrap();
    core
}

// ── attribute access ──────────────────────────────────────────

#[test]
fn device_attribute_read_write_round_trip() {
    let core = adc_core();
    let mut buf = [0u8; 16];

    let n = core.read_attr("adc0", "sampling_frequency", &mut buf).unwrap();
    assert_eq!(&buf[..n], b"2000");

    core.write_attr("adc0", "sampling_frequency", b"48000").unwrap();
    let n = core.read_attr("adc0", "sampling_frequency", &mut buf).unwrap();
    assert_eq!(&buf[..n], b"48000");
}

#[test]
fn channel_attribute_resolves_by_name_digits() {
    let core = adc_core();
    let mut buf = [0u8; 16];

    let n = core
        .ch_read_attr("adc0", "voltage2", false, "raw", &mut buf)
        .unwrap();
    assert_eq!(&buf[..n], b"300", "voltage2 maps to raw[2]");

    core.ch_write_attr("adc0", "voltage2", false, "raw", b"-17")
        .unwrap();
    let n = core
        .ch_read_attr("adc0", "voltage2", false, "raw", &mut buf)
        .unwrap();
    assert_eq!(&buf[..n], b"-17");

    // Neighboring channels are untouched.
    let n = core
        .ch_read_attr("adc0", "voltage1", false, "raw", &mut buf)
        .unwrap();
    assert_eq!(&buf[..n], b"200");
}

#[test]
fn aggregate_channel_read_frames_every_attribute() {
    let core = adc_core();
    let mut buf = [0u8; 64];

    // voltage0 has one attribute: "raw" = "100".
    let total = core
        .ch_read_attr("adc0", "voltage0", false, "", &mut buf)
        .unwrap();
    assert_eq!(total, 8, "4-byte header + 3 value bytes padded to 4");
    assert_eq!(&buf[..4], &3i32.to_be_bytes());
    assert_eq!(&buf[4..7], b"100");
    assert_eq!(buf[7], 0);
}

#[test]
fn aggregate_write_applies_in_descriptor_order() {
    let core = adc_core();

    let mut data = Vec::new();
    data.extend_from_slice(&3i32.to_be_bytes());
    data.extend_from_slice(b"999\0");

    let consumed = core
        .ch_write_attr("adc0", "voltage3", false, "", &data)
        .unwrap();
    assert_eq!(consumed, 8);

    let mut buf = [0u8; 16];
    let n = core
        .ch_read_attr("adc0", "voltage3", false, "raw", &mut buf)
        .unwrap();
    assert_eq!(&buf[..n], b"999");
}

#[test]
fn resolution_failures_are_not_found() {
    let core = adc_core();
    let mut buf = [0u8; 16];

    assert_eq!(
        core.read_attr("dac0", "sampling_frequency", &mut buf),
        Err(Error::NotFound)
    );
    assert_eq!(
        core.read_attr("adc0", "nonexistent", &mut buf),
        Err(Error::NotFound)
    );
    assert_eq!(
        core.ch_read_attr("adc0", "voltage0", true, "raw", &mut buf),
        Err(Error::NotFound),
        "direction is part of channel identity"
    );
}

// ── bulk transfer ─────────────────────────────────────────────

#[test]
fn capture_then_chunked_read_out() {
    let mut core = adc_core();
    core.open_dev("adc0", 2, 0b1010).unwrap();
    assert_eq!(core.get_mask("adc0"), Ok(0b1010));

    assert_eq!(core.transfer_dev_to_mem("adc0", 16), Ok(16));

    // The caller owns the offset across chunk reads.
    let mut chunk = [0u8; 8];
    assert_eq!(core.read_dev("adc0", &mut chunk, 0, 8), Ok(8));
    assert_eq!(&chunk, &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(core.read_dev("adc0", &mut chunk, 8, 8), Ok(8));
    assert_eq!(&chunk, &[8, 9, 10, 11, 12, 13, 14, 15]);

    core.close_dev("adc0").unwrap();
    assert_eq!(core.get_mask("adc0"), Ok(0));
}

#[test]
fn outbound_chunks_then_push_to_device() {
    let mut core = adc_core();
    core.open_dev("adc0", 2, 0b0001).unwrap();

    assert_eq!(core.write_dev("adc0", &[1, 2, 3, 4], 0, 4), Ok(4));
    assert_eq!(core.write_dev("adc0", &[5, 6, 7, 8], 4, 4), Ok(4));
    assert_eq!(core.transfer_mem_to_dev("adc0", 8), Ok(8));
}

#[test]
fn open_rejects_mask_beyond_channel_count() {
    let mut core = adc_core();
    assert_eq!(
        core.open_dev("adc0", 2, 0b1_0000),
        Err(Error::InvalidArgument)
    );
    assert_eq!(core.get_mask("adc0"), Ok(0));
}

// ── self-description ──────────────────────────────────────────

#[test]
fn context_xml_describes_the_registered_device() {
    let core = adc_core();
    let doc = core.context_xml().unwrap();

    assert!(doc.starts_with("<?xml version=\"1.0\""));
    assert!(doc.contains("<!DOCTYPE context ["));
    assert!(doc.contains("<device id=\"adc0\""));
    assert!(doc.contains("<channel id=\"voltage3\""));
    assert!(doc.ends_with("</context>"));
}

// ── lifecycle ─────────────────────────────────────────────────

#[test]
fn unregister_removes_the_whole_surface() {
    let mut core = adc_core();
    core.unregister("adc0").unwrap();

    let mut buf = [0u8; 8];
    assert!(!core.is_supported("adc0"));
    assert_eq!(
        core.read_attr("adc0", "sampling_frequency", &mut buf),
        Err(Error::NotFound)
    );
    assert_eq!(core.get_mask("adc0"), Err(Error::NotFound));
    assert!(!core.context_xml().unwrap().contains("<device"));
}
