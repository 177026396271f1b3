// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use tokio::sync::watch;

/// Start the shutdown signal listener.
///
/// Spawns a background task that flips `shutdown` to `true` on the first
/// SIGTERM or SIGINT.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: watch::Sender<bool>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("Failed to register signal handlers: {e}, falling back to Ctrl+C");
                    wait_for_ctrl_c(&shutdown).await;
                    return;
                }
            };

        tracing::debug!("Signal handlers registered (pid {})", std::process::id());

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        tracing::info!("{name} received, initiating graceful shutdown");
        let _ = shutdown.send(true);
    });
}

/// Fallback for platforms without Unix signals - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: watch::Sender<bool>) {
    tokio::spawn(async move {
        wait_for_ctrl_c(&shutdown).await;
    });
}

async fn wait_for_ctrl_c(shutdown: &watch::Sender<bool>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
            let _ = shutdown.send(true);
        }
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            // Dropping the sender would read as a shutdown request
            std::future::pending::<()>().await;
        }
    }
}
