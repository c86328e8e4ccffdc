use anyhow::{Context, Result};
use clap::Parser;
use microbot::config;
use microbot::irc::{Client, TracingObserver};
use microbot::plugins::{self, mastodon::Mastodon, Plugin};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "microbot", version, about = "Relay social feed events into IRC")]
struct Args {
    /// Location of config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let path = args.config.unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(&path)?;

    let client = Client::connect(cfg.irc.connection_config(), Arc::new(TracingObserver))
        .await
        .context("Failed to initialize client")?;

    let plugins: Vec<Box<dyn Plugin>> = cfg
        .mastodon
        .into_iter()
        .map(|feed| Box::new(Mastodon::new(client.clone(), feed)) as Box<dyn Plugin>)
        .collect();

    let cancel = CancellationToken::new();
    let handles = plugins::spawn_all(plugins, &cancel);

    tokio::select! {
        _ = shutdown_signal() => tracing::info!("shutting down"),
        _ = client.wait_closed() => tracing::warn!("connection to server lost"),
    }

    cancel.cancel();
    client.disconnect().await;
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
