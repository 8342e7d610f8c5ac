//! Open IdP server binary.

use anyhow::Context;
use open_idp::app::{build_service, shutdown_signal};
use open_idp::config::Config;
use open_idp::http::{AppState, router};
use open_idp::telemetry::{TracingConfig, init_tracing};
use std::future::IntoFuture;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    init_tracing(&TracingConfig::from(&config));

    info!("Starting Open IdP");

    if config.signing_key_ephemeral {
        warn!("SIGNING_KEY not set, using an ephemeral key; tokens will not survive a restart");
    }

    let service = build_service(&config)
        .await
        .context("initializing token service")?;
    let app = router(AppState::new(service));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(addr = %addr, "Open IdP listening");

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    });

    // Once a signal arrives, in-flight requests get `shutdown_timeout` to finish.
    let shutdown_timeout = config.shutdown_timeout;
    let drain_deadline = async move {
        if signalled_rx.await.is_ok() {
            info!(timeout = ?shutdown_timeout, "Draining in-flight requests");
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server.into_future() => result.context("serving HTTP")?,
        () = drain_deadline => warn!("Shutdown timeout elapsed, abandoning in-flight requests"),
    }

    info!("Open IdP stopped");
    Ok(())
}
