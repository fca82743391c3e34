//! Unified error types for the attrlink core.
//!
//! Follows embedded practice: a single `Error` enum that every subsystem
//! can convert into, keeping the server core's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed through dispatch
//! without allocation.  Each variant additionally carries a stable negative
//! wire code, because the aggregate attribute framing transmits handler
//! failure codes to the peer in its length fields.

use core::fmt;

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Unknown device, channel, attribute, or connection target.
    NotFound,
    /// The device driver does not implement the requested capability.
    NotSupported,
    /// A channel-mask bit is set outside the device's channel range.
    InvalidArgument,
    /// Bounded storage (registry, connection queue, descriptor buffer)
    /// cannot grow.
    OutOfMemory,
    /// The peer reset or closed the connection.
    Disconnected,
    /// Generic transport or framing I/O failure.
    Io,
    /// Opaque code chosen by a device driver, passed through unchanged.
    Driver(i32),
}

impl Error {
    /// Stable negative code written into the aggregate-framing length field
    /// when an attribute handler fails.
    pub const fn code(self) -> i32 {
        match self {
            Self::NotFound => -2,
            Self::Io => -5,
            Self::OutOfMemory => -12,
            Self::InvalidArgument => -22,
            Self::NotSupported => -95,
            Self::Disconnected => -107,
            // Driver codes are negative by contract; a misbehaving
            // non-negative code is folded onto the generic I/O code.
            Self::Driver(code) => {
                if code < 0 {
                    code
                } else {
                    -5
                }
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::NotSupported => write!(f, "capability not supported"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::Disconnected => write!(f, "peer disconnected"),
            Self::Io => write!(f, "I/O error"),
            Self::Driver(code) => write!(f, "driver error {}", code),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
