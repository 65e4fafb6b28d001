//! ARP/neighbor table, read from `/proc/net/arp`.

use std::net::Ipv4Addr;

use serde::Serialize;

use super::link::MacAddr;
use super::NetInfoError;

const ARP_TABLE_PATH: &str = "/proc/net/arp";

/// ATF_COM: the entry holds a resolved hardware address.
const ATF_COM: u16 = 0x02;

/// One row of the kernel neighbor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborEntry {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub flags: u16,
    pub device: String,
}

impl NeighborEntry {
    /// True when the kernel finished resolving this entry.
    pub fn is_complete(&self) -> bool {
        self.flags & ATF_COM != 0
    }
}

/// Parse the full content of `/proc/net/arp`.
///
/// Incomplete rows (flags without ATF_COM carry an all-zero MAC) are
/// kept; callers decide whether they care.
pub fn parse_arp_table(content: &str) -> Result<Vec<NeighborEntry>, NetInfoError> {
    let mut entries = Vec::new();
    // First line is the column header.
    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 6 {
            return Err(NetInfoError::Parse {
                path: ARP_TABLE_PATH.to_string(),
                detail: format!("short row {:?}", line),
            });
        }
        let ip: Ipv4Addr = fields[0].parse().map_err(|_| NetInfoError::Parse {
            path: ARP_TABLE_PATH.to_string(),
            detail: format!("bad address {:?}", fields[0]),
        })?;
        let flags = u16::from_str_radix(fields[2].trim_start_matches("0x"), 16).map_err(|_| {
            NetInfoError::Parse {
                path: ARP_TABLE_PATH.to_string(),
                detail: format!("bad flags {:?}", fields[2]),
            }
        })?;
        let mac: MacAddr = fields[3].parse().map_err(|detail| NetInfoError::Parse {
            path: ARP_TABLE_PATH.to_string(),
            detail,
        })?;
        entries.push(NeighborEntry {
            ip,
            mac,
            flags,
            device: fields[5].to_string(),
        });
    }
    Ok(entries)
}

/// Read and parse the live neighbor table.
pub fn arp_table() -> Result<Vec<NeighborEntry>, NetInfoError> {
    let content = std::fs::read_to_string(ARP_TABLE_PATH).map_err(|source| NetInfoError::Read {
        path: ARP_TABLE_PATH.to_string(),
        source,
    })?;
    parse_arp_table(&content)
}

/// Find the neighbor entry for `ip`.
pub fn lookup(entries: &[NeighborEntry], ip: Ipv4Addr) -> Result<&NeighborEntry, NetInfoError> {
    entries
        .iter()
        .find(|e| e.ip == ip)
        .ok_or(NetInfoError::NeighborNotFound(ip))
}
