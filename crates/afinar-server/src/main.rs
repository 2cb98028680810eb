//! afinar server - HTTP API for model fine-tuning recipes

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;
mod state;

use afinar_core::RuntimeConfig;
use state::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "afinar-server",
    about = "HTTP API server for model fine-tuning recipes",
    version = env!("CARGO_PKG_VERSION")
)]
struct ServerArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BindConfig {
    host: String,
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "afinar_server=info,afinar_core=info,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting afinar server");

    // Load configuration
    let state = AppState::new(RuntimeConfig::from_env());
    info!("Assets directory: {:?}", state.config.assets_dir);
    info!(
        recipes = state.registry.all().len(),
        "Recipe registry initialized"
    );

    // Build router
    let app = api::create_router(state);

    // Start server
    let bind = resolve_bind_config(args);
    let addr = format!("{}:{}", bind.host, bind.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    info!("Server ready. Press Ctrl+C to stop.");
    server.await?;

    Ok(())
}

fn resolve_bind_config(args: ServerArgs) -> BindConfig {
    BindConfig {
        host: args.host.unwrap_or_else(host_from_env_or_default),
        port: args.port.unwrap_or_else(port_from_env_or_default),
    }
}

fn host_from_env_or_default() -> String {
    match std::env::var("AFINAR_HOST") {
        Ok(raw) => {
            let host = raw.trim();
            if host.is_empty() {
                warn!("Empty AFINAR_HOST, falling back to 0.0.0.0");
                "0.0.0.0".to_string()
            } else {
                host.to_string()
            }
        }
        Err(_) => "0.0.0.0".to_string(),
    }
}

fn port_from_env_or_default() -> u16 {
    match std::env::var("AFINAR_PORT") {
        Ok(raw) => match raw.trim().parse::<u16>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid AFINAR_PORT='{}', falling back to 8080", raw);
                8080
            }
        },
        Err(_) => 8080,
    }
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .expect("environment lock poisoned")
    }

    fn clear_bind_env() {
        std::env::remove_var("AFINAR_HOST");
        std::env::remove_var("AFINAR_PORT");
    }

    fn parse(args: &[&str]) -> ServerArgs {
        ServerArgs::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn cli_values_override_environment() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("AFINAR_HOST", "0.0.0.0");
        std::env::set_var("AFINAR_PORT", "8081");

        let bind = resolve_bind_config(parse(&[
            "afinar-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ]));

        assert_eq!(bind.host, "127.0.0.1");
        assert_eq!(bind.port, 9000);
        clear_bind_env();
    }

    #[test]
    fn environment_fills_missing_arguments() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("AFINAR_HOST", "10.0.0.5");
        std::env::set_var("AFINAR_PORT", "9090");

        let bind = resolve_bind_config(parse(&["afinar-server"]));

        assert_eq!(bind.host, "10.0.0.5");
        assert_eq!(bind.port, 9090);
        clear_bind_env();
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let _guard = env_lock();
        clear_bind_env();

        let bind = resolve_bind_config(parse(&["afinar-server"]));

        assert_eq!(bind.host, "0.0.0.0");
        assert_eq!(bind.port, 8080);
    }

    #[test]
    fn invalid_port_env_falls_back_to_default() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("AFINAR_PORT", "not-a-port");

        let bind = resolve_bind_config(parse(&["afinar-server"]));

        assert_eq!(bind.port, 8080);
        clear_bind_env();
    }
}
