//! Binary aggregate-attribute framing.
//!
//! Wire format, one record per attribute in descriptor order:
//! ```text
//! ┌────────────┬───────────────────┬──────────────────┐
//! │ length (4B)│ value bytes (N B) │ zero pad to 4B   │
//! │ BE i32     │ only if length ≥ 0│ record boundary  │
//! └────────────┴───────────────────┴──────────────────┘
//! ```
//!
//! A negative length is an attribute handler's failure code; such a
//! record carries no value bytes.  Both directions walk the attribute
//! list in order, so the peer and the server agree on record identity by
//! position alone.  This layout is the bit-exact wire contract of the
//! read-all / write-all paths.

use log::warn;

use crate::device::{Attribute, ChanInfo};
use crate::error::{Error, Result};

/// Records are padded to this alignment.
pub const RECORD_ALIGN: usize = 4;

/// Staging buffer for a single attribute value.  No supported driver
/// produces a longer value; handler return counts are clamped to it.
const SHOW_SCRATCH: usize = 256;

/// Round `len` up to the next record boundary.
const fn pad_len(len: usize) -> usize {
    (len + RECORD_ALIGN - 1) & !(RECORD_ALIGN - 1)
}

/// Read every attribute in `attrs`, framing each into `out`.
///
/// Returns the total byte count produced.  A handler failure is encoded
/// in-stream as a negative length record and does not abort the walk;
/// only an exhausted `out` buffer does.
pub fn read_all(attrs: &[Attribute], out: &mut [u8], ch: Option<&ChanInfo>) -> Result<usize> {
    let mut scratch = [0u8; SHOW_SCRATCH];
    let mut cursor = 0usize;

    for attr in attrs {
        let shown = attr.show(&mut scratch, ch);
        let declared: i32 = match shown {
            Ok(n) => n.min(scratch.len()) as i32,
            Err(e) => e.code(),
        };

        if cursor + 4 > out.len() {
            return Err(Error::OutOfMemory);
        }
        out[cursor..cursor + 4].copy_from_slice(&declared.to_be_bytes());
        cursor += 4;

        if declared >= 0 {
            let n = declared as usize;
            let padded = pad_len(n);
            if cursor + padded > out.len() {
                return Err(Error::OutOfMemory);
            }
            out[cursor..cursor + n].copy_from_slice(&scratch[..n]);
            out[cursor + n..cursor + padded].fill(0);
            cursor += padded;
        }
    }

    Ok(cursor)
}

/// Write every attribute in `attrs` from the framed stream in `data`.
///
/// Mirror of [`read_all`]: a negative declared length marks a record the
/// peer could not produce; its store is skipped.  A store failure is
/// logged and the walk continues; the peer already committed the rest of
/// the stream.  Returns the byte count consumed from `data`.
pub fn write_all(attrs: &[Attribute], data: &[u8], ch: Option<&ChanInfo>) -> Result<usize> {
    let mut cursor = 0usize;

    for attr in attrs {
        if cursor + 4 > data.len() {
            warn!("framing: stream truncated before '{}'", attr.name);
            return Err(Error::Io);
        }
        let declared = i32::from_be_bytes([
            data[cursor],
            data[cursor + 1],
            data[cursor + 2],
            data[cursor + 3],
        ]);
        cursor += 4;

        if declared < 0 {
            continue;
        }

        let n = declared as usize;
        if cursor + n > data.len() {
            warn!("framing: record for '{}' exceeds stream", attr.name);
            return Err(Error::Io);
        }
        if let Err(e) = attr.store(&data[cursor..cursor + n], ch) {
            warn!("framing: store '{}' failed: {}", attr.name, e);
        }
        cursor = pad_len(cursor + n);
    }

    Ok(cursor.min(data.len()))
}
