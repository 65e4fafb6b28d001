//! Active probes: primary IP discovery, ARP provocation, ad-hoc sends.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tokio::net::UdpSocket;

use super::NetInfoError;

/// The UDP discard port; a datagram sent here is dropped by the peer.
const DISCARD_PORT: u16 = 9;

/// The primary outbound IPv4 address.
///
/// Connecting a UDP socket to a public address selects the outbound
/// interface and source address without sending any packet.
pub async fn primary_ipv4() -> Result<Ipv4Addr, NetInfoError> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect("8.8.8.8:53").await?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(_) => Err(NetInfoError::Socket(std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "no IPv4 source address",
        ))),
    }
}

/// Provoke ARP resolution for an on-link address.
///
/// Sends one throwaway datagram to the discard port; the kernel performs
/// the actual ARP exchange and records the answer in its neighbor table.
pub async fn provoke_arp(target: Ipv4Addr) -> Result<(), NetInfoError> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.send_to(&[0u8], SocketAddr::from((target, DISCARD_PORT))).await?;
    Ok(())
}

/// Send one ad-hoc UDP datagram carrying `text` to `target`.
pub async fn send_datagram(text: &str, target: SocketAddr) -> Result<usize, NetInfoError> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    let sent = socket.send_to(text.as_bytes(), target).await?;
    Ok(sent)
}
