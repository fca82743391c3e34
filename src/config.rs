//! Server transport configuration
//!
//! All tunable parameters for the attribute server's physical link.
//! Values can be overridden by the host before the transport drivers are
//! brought up; the dispatch core itself never opens sockets or UARTs.

use serde::{Deserialize, Serialize};

/// Default TCP listen port for the network phy.
pub const DEFAULT_PORT: u16 = 30431;

/// Which physical link the server core is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhyKind {
    /// Single fixed peer over a serial line; no connection multiplexing.
    Uart,
    /// TCP listener with a bounded multi-client queue.
    Network,
}

/// Transport configuration for the server core.
///
/// The client-queue capacity is compile-time
/// ([`MAX_CLIENTS`](crate::mux::MAX_CLIENTS)) so the multiplexer's memory
/// is bounded without an allocator; it is not a runtime tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Physical link the protocol interpreter is served over.
    pub phy: PhyKind,
    /// TCP listen port (network phy).
    pub listen_port: u16,
    /// UART baud rate (serial phy).
    pub uart_baud: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            phy: PhyKind::Network,
            listen_port: DEFAULT_PORT,
            uart_baud: 115_200,
        }
    }
}
