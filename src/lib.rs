//! attrlink: device-independent dispatch core of a remote attribute-access
//! server for industrial I/O hardware.
//!
//! The host firmware wires a protocol command interpreter and concrete
//! transport drivers around this crate; the crate resolves device, channel
//! and attribute identities, frames aggregate reads/writes, coordinates
//! bulk sample transfer and multiplexes client connections.
//!
//! ```text
//!   interpreter ──▶ Core ──▶ dispatch ──▶ registry ──▶ driver handlers
//!                     │          │
//!                     │          └──▶ framing (aggregate wire format)
//!                     └──▶ phy (serial │ ConnMux over a listener)
//! ```

#![deny(unused_must_use)]

pub mod config;
pub mod device;
pub mod dispatch;
pub mod framing;
pub mod mux;
pub mod phy;
pub mod registry;
pub mod server;
pub mod transfer;
pub mod xml;

mod error;

pub use error::{Error, Result};
pub use registry::{Interface, Registry, MAX_DEVICES};
pub use server::Core;
