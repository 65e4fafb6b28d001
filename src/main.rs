//! netlab daemon: runs the TCP echo service and the UDP datagram logger.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netlab::config::{validate, NetLabConfig};
use netlab::datagram::DatagramLogger;
use netlab::echo::EchoListener;
use netlab::lifecycle::Shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netlab=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("netlab v0.1.0 starting");

    // There is no config file; the defaults carry the lab constants.
    let config = NetLabConfig::default();
    if let Err(errors) = validate(&config) {
        for error in &errors {
            tracing::error!(%error, "Invalid configuration");
        }
        return Err("invalid configuration".into());
    }

    tracing::info!(
        echo_address = %config.echo.bind_address,
        datagram_address = %config.datagram.bind_address,
        receive_timeout_ms = config.echo.receive_timeout_ms,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();

    // Bind failures are fatal to startup, by design.
    let logger = DatagramLogger::bind(config.datagram.clone()).await?;
    tokio::spawn(logger.run(shutdown.subscribe()));

    let listener = EchoListener::bind(config.echo.clone()).await?;
    let accept_loop = tokio::spawn(listener.run(shutdown.subscribe()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    // Stop accepting; in-flight sessions run to their own end.
    shutdown.trigger();
    accept_loop.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
