use std::net::SocketAddr;

use todo_api::{MetricsProviderGuard, Settings, StartupError, TracingProviderGuard};

use thiserror::Error;
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Debug, Error)]
enum RoutingAppError {
    #[error("Startup error")]
    Startup(#[from] StartupError),

    #[error("Io error")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), RoutingAppError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .max_blocking_threads(num_cpus::get() * 2)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

#[cfg(unix)]
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!(error = %e, "failed to bind to SIGTERM");
            let _ = signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM received.");
        },
    }
}

async fn async_main() -> Result<(), RoutingAppError> {
    let settings = Settings::new()?;

    let _tracing_provider_guard = settings
        .tracing_enabled()
        .then(|| TracingProviderGuard::new(&settings))
        .transpose()?;

    if !settings.tracing_enabled() && settings.stdout_tracing_enabled() {
        todo_api::init_stdout_tracing()?;
    }

    let _metrics_provider_guard = settings
        .metrics_enabled()
        .then(|| MetricsProviderGuard::new(&settings))
        .transpose()?;

    let server_addr = settings.server_addr();
    let (app, service) = todo_api::init_app(settings).await?;

    let listener = TcpListener::bind(&server_addr).await?;
    info!(addr = %server_addr, "listening");

    let shutdown_signal = async {
        #[cfg(unix)]
        shutdown_signal().await;
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    if let Err(e) = service.close_storage().await {
        error!(error = %e, "failed to close storage");
    }

    Ok(())
}
