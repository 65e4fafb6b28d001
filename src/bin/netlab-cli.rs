use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use netlab::netinfo::{link, neighbors, probe, resolver, routes, NetInfoError};

#[derive(Parser)]
#[command(name = "netlab-cli")]
#[command(about = "Host network status queries and ad-hoc sends", long_about = None)]
struct Cli {
    /// Print results as pretty JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report link up/down state of an interface
    Status {
        /// Interface name (defaults to the default route's interface)
        #[arg(short, long)]
        interface: Option<String>,
    },
    /// Print the MAC address of an interface
    Mac {
        #[arg(short, long)]
        interface: Option<String>,
    },
    /// Print the primary outbound IPv4 address
    Ip,
    /// Print the default gateway
    Gateway,
    /// Print the configured DNS servers
    Dns,
    /// Print the netmask of an interface
    Netmask {
        #[arg(short, long)]
        interface: Option<String>,
    },
    /// Provoke ARP resolution for an address and report the neighbor entry
    Arp { address: Ipv4Addr },
    /// Resolve a hostname via the OS resolver
    Lookup { host: String },
    /// Send one UDP datagram
    Send {
        text: String,
        /// Target address (defaults to the local datagram logger)
        #[arg(long, default_value = "127.0.0.1:9930")]
        to: SocketAddr,
    },
}

/// Resolve `-i` to a concrete interface, falling back to the one the
/// default route leaves on.
fn pick_interface(explicit: Option<String>) -> Result<String, NetInfoError> {
    match explicit {
        Some(iface) => Ok(iface),
        None => {
            let table = routes::route_table()?;
            routes::default_interface(&table)
        }
    }
}

fn emit(as_json: bool, value: Value, plain: String) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", plain);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status { interface } => {
            let iface = pick_interface(interface)?;
            let status = link::link_status(&iface)?;
            let plain = format!(
                "{}: {}",
                status.interface,
                if status.up { "up" } else { "down" }
            );
            emit(cli.json, json!(status), plain)?;
        }
        Commands::Mac { interface } => {
            let iface = pick_interface(interface)?;
            let mac = link::mac_address(&iface)?;
            emit(
                cli.json,
                json!({ "interface": iface, "mac": mac }),
                mac.to_string(),
            )?;
        }
        Commands::Ip => {
            let addr = probe::primary_ipv4().await?;
            emit(cli.json, json!({ "ip": addr }), addr.to_string())?;
        }
        Commands::Gateway => {
            let table = routes::route_table()?;
            let (gateway, iface) = routes::default_gateway(&table)?;
            emit(
                cli.json,
                json!({ "gateway": gateway, "interface": iface }),
                format!("{} via {}", gateway, iface),
            )?;
        }
        Commands::Dns => {
            let servers = resolver::nameservers()?;
            let plain = servers
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            emit(cli.json, json!({ "nameservers": servers }), plain)?;
        }
        Commands::Netmask { interface } => {
            let iface = pick_interface(interface)?;
            let table = routes::route_table()?;
            let mask = routes::netmask_for(&table, &iface)?;
            emit(
                cli.json,
                json!({ "interface": iface, "netmask": mask }),
                mask.to_string(),
            )?;
        }
        Commands::Arp { address } => {
            // The kernel does the actual ARP exchange; give it a moment
            // to record the answer before reading the table.
            probe::provoke_arp(address).await?;
            let mut entry = None;
            for _ in 0..10 {
                let table = neighbors::arp_table()?;
                if let Ok(found) = neighbors::lookup(&table, address) {
                    if found.is_complete() {
                        entry = Some(found.clone());
                        break;
                    }
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            let entry = entry.ok_or(NetInfoError::NeighborNotFound(address))?;
            let plain = format!("{} is at {} on {}", entry.ip, entry.mac, entry.device);
            emit(cli.json, json!(entry), plain)?;
        }
        Commands::Lookup { host } => {
            let addrs = resolver::lookup(&host).await?;
            let plain = addrs
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            emit(cli.json, json!({ "host": host, "addresses": addrs }), plain)?;
        }
        Commands::Send { text, to } => {
            let sent = probe::send_datagram(&text, to).await?;
            emit(
                cli.json,
                json!({ "target": to, "bytes_sent": sent }),
                format!("sent {} bytes to {}", sent, to),
            )?;
        }
    }

    Ok(())
}
