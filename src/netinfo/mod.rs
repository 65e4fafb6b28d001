//! Host network diagnostics.
//!
//! # Data Flow
//! ```text
//! link.rs      /sys/class/net/<if>/{operstate,carrier,address}
//! routes.rs    /proc/net/route   (default gateway, interface, netmask)
//! neighbors.rs /proc/net/arp     (ARP/neighbor table)
//! resolver.rs  /etc/resolv.conf + OS resolver (hostname lookup)
//! probe.rs     live sockets      (primary IP, ARP provocation, ad-hoc send)
//! ```
//!
//! # Design Decisions
//! - Every table reader is split into a pure parser over file content
//!   (unit-testable without a live network) and a thin filesystem wrapper
//! - Resolution work (ARP, DNS) is delegated to the OS stack; this
//!   module only triggers it and reports what the OS recorded

pub mod link;
pub mod neighbors;
pub mod probe;
pub mod resolver;
pub mod routes;

use std::net::Ipv4Addr;

use thiserror::Error;

/// Error surface for the diagnostics queries.
#[derive(Debug, Error)]
pub enum NetInfoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed entry in {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("Socket error: {0}")]
    Socket(#[from] std::io::Error),

    #[error("No default route present")]
    NoDefaultRoute,

    #[error("Interface {0} has no on-link route")]
    NoOnLinkRoute(String),

    #[error("No neighbor entry for {0}")]
    NeighborNotFound(Ipv4Addr),

    #[error("Hostname {0} did not resolve to any address")]
    NoAddresses(String),
}
