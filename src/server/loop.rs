// Server loop module
// Accepts connections until shutdown, then drains in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// How often the drain phase re-checks the active connection count
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Serve connections from `listener` until `shutdown` becomes `true`
/// (or its sender is dropped).
///
/// After shutdown the listener is closed immediately and in-flight
/// connections get `performance.shutdown_timeout` seconds to finish.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let mut stop = shutdown.clone();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            shutdown.clone(),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = stop.changed() => break,
        }
    }

    drop(listener);
    drain_connections(&active_connections, state.config.performance.shutdown_timeout).await;
    Ok(())
}

/// Wait for the active connection count to reach zero, up to `grace_secs`
async fn drain_connections(active_connections: &AtomicUsize, grace_secs: u64) {
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst), grace_secs);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(grace_secs);
    while active_connections.load(Ordering::SeqCst) > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }

    logger::log_shutdown_complete(active_connections.load(Ordering::SeqCst));
}
