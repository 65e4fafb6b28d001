//! DNS configuration and hostname lookup.
//!
//! Nameservers come from `/etc/resolv.conf`; the lookup itself is
//! delegated to the OS resolver via tokio.

use std::net::IpAddr;

use tokio::net::lookup_host;

use super::NetInfoError;

const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Extract the nameserver addresses from resolv.conf content.
///
/// Unparseable nameserver values and unrelated directives are skipped.
pub fn parse_resolv_conf(content: &str) -> Vec<IpAddr> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| line.strip_prefix("nameserver"))
        .filter_map(|rest| rest.trim().parse().ok())
        .collect()
}

/// Read the configured nameservers from the live resolv.conf.
pub fn nameservers() -> Result<Vec<IpAddr>, NetInfoError> {
    let content = std::fs::read_to_string(RESOLV_CONF_PATH).map_err(|source| NetInfoError::Read {
        path: RESOLV_CONF_PATH.to_string(),
        source,
    })?;
    Ok(parse_resolv_conf(&content))
}

/// Resolve `host` to its addresses via the OS resolver.
pub async fn lookup(host: &str) -> Result<Vec<IpAddr>, NetInfoError> {
    // lookup_host wants a port; it plays no role in the answer.
    let addrs: Vec<IpAddr> = lookup_host((host, 0)).await?.map(|a| a.ip()).collect();
    if addrs.is_empty() {
        return Err(NetInfoError::NoAddresses(host.to_string()));
    }
    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn parses_nameservers() {
        let content = "\
# generated by dhclient
search lan
nameserver 192.168.0.1
nameserver 8.8.8.8
options edns0
";
        let servers = parse_resolv_conf(content);
        assert_eq!(
            servers,
            vec![
                IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1)),
                IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
            ]
        );
    }

    #[test]
    fn skips_comments_and_junk() {
        let content = "\
; comment
# nameserver 1.1.1.1
nameserver not-an-address
nameserver 2606:4700:4700::1111
";
        let servers = parse_resolv_conf(content);
        assert_eq!(servers.len(), 1);
        assert!(servers[0].is_ipv6());
    }

    #[test]
    fn empty_file_yields_no_servers() {
        assert!(parse_resolv_conf("").is_empty());
    }

    #[tokio::test]
    async fn lookup_resolves_localhost() {
        let addrs = lookup("localhost").await.unwrap();
        assert!(addrs.iter().any(|a| a.is_loopback()));
    }
}
