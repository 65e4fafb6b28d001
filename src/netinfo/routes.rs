//! IPv4 routing table, read from `/proc/net/route`.
//!
//! The kernel exports addresses as little-endian hex words; parsing is a
//! pure function over the file content so it can be tested on captures.

use std::net::Ipv4Addr;

use serde::Serialize;

use super::NetInfoError;

const ROUTE_TABLE_PATH: &str = "/proc/net/route";

/// RTF_UP: route is usable.
const RTF_UP: u16 = 0x0001;
/// RTF_GATEWAY: destination is reached via a gateway.
const RTF_GATEWAY: u16 = 0x0002;

/// One row of the kernel routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub iface: String,
    pub destination: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub flags: u16,
    pub mask: Ipv4Addr,
}

impl RouteEntry {
    pub fn is_up(&self) -> bool {
        self.flags & RTF_UP != 0
    }

    pub fn is_via_gateway(&self) -> bool {
        self.flags & RTF_GATEWAY != 0
    }

    /// True for the all-zeroes destination row.
    pub fn is_default(&self) -> bool {
        self.destination.is_unspecified() && self.mask.is_unspecified()
    }
}

fn parse_hex_ipv4(field: &str, path: &str) -> Result<Ipv4Addr, NetInfoError> {
    let word = u32::from_str_radix(field, 16).map_err(|_| NetInfoError::Parse {
        path: path.to_string(),
        detail: format!("bad hex address {:?}", field),
    })?;
    // Stored little-endian.
    Ok(Ipv4Addr::from(word.to_le_bytes()))
}

fn parse_hex_u16(field: &str, path: &str) -> Result<u16, NetInfoError> {
    u16::from_str_radix(field, 16).map_err(|_| NetInfoError::Parse {
        path: path.to_string(),
        detail: format!("bad hex flags {:?}", field),
    })
}

/// Parse the full content of `/proc/net/route`.
pub fn parse_route_table(content: &str) -> Result<Vec<RouteEntry>, NetInfoError> {
    let mut entries = Vec::new();
    // First line is the column header.
    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 8 {
            return Err(NetInfoError::Parse {
                path: ROUTE_TABLE_PATH.to_string(),
                detail: format!("short row {:?}", line),
            });
        }
        entries.push(RouteEntry {
            iface: fields[0].to_string(),
            destination: parse_hex_ipv4(fields[1], ROUTE_TABLE_PATH)?,
            gateway: parse_hex_ipv4(fields[2], ROUTE_TABLE_PATH)?,
            flags: parse_hex_u16(fields[3], ROUTE_TABLE_PATH)?,
            mask: parse_hex_ipv4(fields[7], ROUTE_TABLE_PATH)?,
        });
    }
    Ok(entries)
}

/// Read and parse the live routing table.
pub fn route_table() -> Result<Vec<RouteEntry>, NetInfoError> {
    let content = std::fs::read_to_string(ROUTE_TABLE_PATH).map_err(|source| NetInfoError::Read {
        path: ROUTE_TABLE_PATH.to_string(),
        source,
    })?;
    parse_route_table(&content)
}

/// The default gateway address and the interface it is reached on.
pub fn default_gateway(entries: &[RouteEntry]) -> Result<(Ipv4Addr, String), NetInfoError> {
    entries
        .iter()
        .find(|e| e.is_up() && e.is_via_gateway() && e.is_default())
        .map(|e| (e.gateway, e.iface.clone()))
        .ok_or(NetInfoError::NoDefaultRoute)
}

/// The interface the default route leaves on.
pub fn default_interface(entries: &[RouteEntry]) -> Result<String, NetInfoError> {
    default_gateway(entries).map(|(_, iface)| iface)
}

/// The netmask of `iface`'s on-link (non-gateway) route.
pub fn netmask_for(entries: &[RouteEntry], iface: &str) -> Result<Ipv4Addr, NetInfoError> {
    entries
        .iter()
        .find(|e| e.iface == iface && e.is_up() && !e.is_via_gateway() && !e.mask.is_unspecified())
        .map(|e| e.mask)
        .ok_or_else(|| NetInfoError::NoOnLinkRoute(iface.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Captured from a machine with one NIC on 192.168.0.0/24 behind
    // 192.168.0.1.
    const CAPTURE: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t00000000\t0100A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0000A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
";

    #[test]
    fn parses_little_endian_addresses() {
        let entries = parse_route_table(CAPTURE).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].gateway, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(entries[1].destination, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(entries[1].mask, Ipv4Addr::new(255, 255, 255, 0));
    }

    #[test]
    fn finds_default_gateway_and_interface() {
        let entries = parse_route_table(CAPTURE).unwrap();
        let (gateway, iface) = default_gateway(&entries).unwrap();
        assert_eq!(gateway, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(iface, "eth0");
        assert_eq!(default_interface(&entries).unwrap(), "eth0");
    }

    #[test]
    fn finds_on_link_netmask() {
        let entries = parse_route_table(CAPTURE).unwrap();
        let mask = netmask_for(&entries, "eth0").unwrap();
        assert_eq!(mask, Ipv4Addr::new(255, 255, 255, 0));
    }

    #[test]
    fn missing_default_route_is_an_error() {
        let entries = parse_route_table(
            "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n\
             eth0\t0000A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0\n",
        )
        .unwrap();
        assert!(matches!(default_gateway(&entries), Err(NetInfoError::NoDefaultRoute)));
    }

    #[test]
    fn unknown_interface_has_no_netmask() {
        let entries = parse_route_table(CAPTURE).unwrap();
        assert!(matches!(
            netmask_for(&entries, "wlan0"),
            Err(NetInfoError::NoOnLinkRoute(_))
        ));
    }

    #[test]
    fn rejects_short_rows() {
        assert!(parse_route_table("header\neth0\t00000000\n").is_err());
    }

    #[test]
    fn header_only_table_is_empty() {
        let entries = parse_route_table("Iface\tDestination\n").unwrap();
        assert!(entries.is_empty());
    }
}
