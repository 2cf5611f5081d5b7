//! Campus Server - student records API over HTTP.
//!
//! This binary hosts the four student handlers (create, read, update,
//! delete) behind a small HTTP gateway, backed by an in-memory map or a
//! DynamoDB table.
//!
//! # Usage
//!
//! ```text
//! GATEWAY_LISTEN=0.0.0.0:4566 campus-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4566` | Bind address |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `STUDENT_STORE` | `memory` | `memory` or `dynamodb` |
//! | `STUDENTS_TABLE` | `Students` | DynamoDB table name |
//! | `DYNAMODB_ENDPOINT_URL` | *(unset)* | DynamoDB endpoint override |
//! | `DEFAULT_REGION` | `us-east-1` | AWS region |
//! | `STUDENTS_BASE_PATH` | `/students` | Collection path |
//! | `MAX_BODY_BYTES` | `1048576` | Request body limit |

mod gateway;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use campus_student_core::config::{StoreBackend, StudentConfig};
use campus_student_core::handler::CampusStudentHandler;
use campus_student_core::provider::StudentProvider;
use campus_student_core::store::{InMemoryStudentStore, StudentStore};
use campus_student_http::service::{StudentHttpConfig, StudentHttpService};

use crate::gateway::GatewayService;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }

    Ok(())
}

/// Build the [`StudentHttpConfig`] from the [`StudentConfig`].
fn build_http_config(config: &StudentConfig) -> StudentHttpConfig {
    StudentHttpConfig {
        base_path: config.base_path.clone(),
        max_body_bytes: config.max_body_bytes,
    }
}

/// Construct the configured Student Store.
async fn build_store(config: &StudentConfig) -> Result<Arc<dyn StudentStore>> {
    match config.store {
        StoreBackend::Memory => Ok(Arc::new(InMemoryStudentStore::new())),
        #[cfg(feature = "dynamodb")]
        StoreBackend::DynamoDb => {
            info!(
                table = %config.table_name,
                region = %config.default_region,
                endpoint = config.dynamodb_endpoint_url.as_deref().unwrap_or("default"),
                "connecting to DynamoDB",
            );
            let store =
                campus_student_core::store::DynamoDbStudentStore::from_config(config).await;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "dynamodb"))]
        StoreBackend::DynamoDb => {
            anyhow::bail!("STUDENT_STORE=dynamodb requires the \"dynamodb\" feature")
        }
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: GatewayService<CampusStudentHandler>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Probe the running server's health endpoint.
///
/// Succeeds only on a 200 response reporting `"running"`.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

/// Read the gateway listen address from the environment.
fn gateway_listen_addr() -> String {
    std::env::var("GATEWAY_LISTEN").unwrap_or_else(|_| "0.0.0.0:4566".to_string())
}

/// Turn a wildcard bind address into one a local client can dial.
fn probe_addr(listen_addr: &str) -> String {
    listen_addr.replace("0.0.0.0", "127.0.0.1")
}

#[tokio::main]
async fn main() -> Result<()> {
    let listen_addr = gateway_listen_addr();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let healthy = run_health_check(&probe_addr(&listen_addr)).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = LogFormat::parse(&std::env::var("LOG_FORMAT").unwrap_or_default());
    init_tracing(&log_level, log_format)?;

    let config = StudentConfig::from_env().context("invalid student service configuration")?;
    info!(
        store = %config.store,
        base_path = %config.base_path,
        max_body_bytes = config.max_body_bytes,
        "initializing student service",
    );

    let store = build_store(&config).await?;
    let store_backend = store.backend_name();
    let provider = StudentProvider::new(store);
    let handler = CampusStudentHandler::new(Arc::new(provider));
    let students = StudentHttpService::new(Arc::new(handler), build_http_config(&config));
    let gateway = GatewayService::new(students, store_backend);

    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {listen_addr}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, store = store_backend, version = VERSION, "starting Campus Server");

    serve(listener, gateway).await
}
