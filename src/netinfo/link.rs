//! Link state and MAC address, read from sysfs.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use super::NetInfoError;

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl std::fmt::Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

impl Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for MacAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.trim().split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(|| format!("too few octets in {:?}", s))?;
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| format!("invalid octet {:?} in {:?}", part, s))?;
        }
        if parts.next().is_some() {
            return Err(format!("too many octets in {:?}", s));
        }
        Ok(MacAddr(octets))
    }
}

/// Link state of one interface.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStatus {
    pub interface: String,
    /// Kernel operational state string (`up`, `down`, `unknown`, ...).
    pub operstate: String,
    /// Physical carrier, when the kernel reports one.
    pub carrier: Option<bool>,
    /// True when the operational state is `up`.
    pub up: bool,
}

fn read_sysfs(iface: &str, attribute: &str) -> Result<String, NetInfoError> {
    let path = format!("/sys/class/net/{}/{}", iface, attribute);
    let content = std::fs::read_to_string(Path::new(&path))
        .map_err(|source| NetInfoError::Read { path: path.clone(), source })?;
    Ok(content.trim().to_string())
}

/// Report the link state of `iface`.
pub fn link_status(iface: &str) -> Result<LinkStatus, NetInfoError> {
    let operstate = read_sysfs(iface, "operstate")?;
    // Reading carrier fails with EINVAL while the interface is down.
    let carrier = read_sysfs(iface, "carrier").ok().map(|v| v == "1");
    let up = operstate == "up";
    Ok(LinkStatus {
        interface: iface.to_string(),
        operstate,
        carrier,
        up,
    })
}

/// Report the MAC address of `iface`.
pub fn mac_address(iface: &str) -> Result<MacAddr, NetInfoError> {
    let raw = read_sysfs(iface, "address")?;
    raw.parse().map_err(|detail| NetInfoError::Parse {
        path: format!("/sys/class/net/{}/address", iface),
        detail,
    })
}
