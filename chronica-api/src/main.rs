use crate::server::ServerState;
use chronica_db::client::{DbClient, DbError};
use serde::Deserialize;
use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod server;

/// How many consecutive ports to try when the configured one is bound.
const MAX_BIND_ATTEMPTS: u16 = 10;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error setting up the database client: {0}")]
    Db(#[from] DbError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(io::Error),
    #[error("Every port from {first} to {last} is already bound")]
    PortsExhausted { first: u16, last: u16 },
    #[error("Error serving server: {0}")]
    TcpServe(io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Env {
    #[serde(default = "default_server_address")]
    server_address: IpAddr,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_mongodb_uri")]
    mongodb_uri: String,
    #[serde(default = "default_static_dir")]
    static_dir: PathBuf,
}

fn default_server_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017/historical-blogs".to_owned()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("chronica-api/public")
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chronica_api=debug,chronica_db=debug,\
                tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

/// Binds the first free port at or above `first_port`, bounded at
/// [`MAX_BIND_ATTEMPTS`] consecutive ports. Exhaustion is the one fatal
/// startup path.
async fn bind_listener(address: IpAddr, first_port: u16) -> Result<TcpListener, InitError> {
    let last_port = first_port.saturating_add(MAX_BIND_ATTEMPTS - 1);

    let mut port = first_port;
    loop {
        match TcpListener::bind(SocketAddr::new(address, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && port < last_port => {
                warn!("Port {port} is busy, trying {}...", port + 1);
                port += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                return Err(InitError::PortsExhausted {
                    first: first_port,
                    last: last_port,
                });
            }
            Err(e) => return Err(InitError::TcpBind(e)),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    // The driver connects lazily, so an unreachable server does not prevent
    // startup; static assets keep being served and API requests report the
    // failure per-request.
    let db_client = DbClient::connect(&env.mongodb_uri).await?;
    let state = ServerState {
        store: Arc::new(db_client),
    };

    let app = server::app(state, &env.static_dir).layer(TraceLayer::new_for_http());

    let listener = bind_listener(env.server_address, env.port).await?;
    let local_addr = listener.local_addr().map_err(InitError::TcpBind)?;
    info!("Server is running on port {}", local_addr.port());
    info!(
        "Visit http://localhost:{} to view the application",
        local_addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
