// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop for the activities server.
///
/// Runs until `shutdown` is notified. The listener is then closed and
/// active connections get up to `performance.shutdown_timeout` seconds to
/// finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    // Stop accepting before draining
    drop(listener);

    let deadline = Duration::from_secs(state.config.performance.shutdown_timeout);
    let remaining = drain_connections(&active_connections, deadline).await;
    logger::log_shutdown_complete(remaining);
}

/// Wait until the counter reaches zero or `deadline` passes.
///
/// Returns the number of connections still open.
async fn drain_connections(active_connections: &AtomicUsize, deadline: Duration) -> usize {
    let drain_deadline = tokio::time::Instant::now() + deadline;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            return 0;
        }
        logger::log_debug(&format!("[Shutdown] Waiting for {active} connection(s)"));

        tokio::select! {
            () = tokio::time::sleep(DRAIN_POLL_INTERVAL) => {}
            () = tokio::time::sleep_until(drain_deadline) => {
                return active_connections.load(Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_at_deadline() {
        let counter = AtomicUsize::new(2);
        assert_eq!(
            drain_connections(&counter, Duration::from_millis(120)).await,
            2
        );
    }

    #[tokio::test]
    async fn test_serves_http_until_shutdown() {
        let mut cfg = Config::load_from("no-such-config-file-for-tests").unwrap();
        cfg.logging.access_log = false;
        cfg.performance.shutdown_timeout = 1;
        let state = Arc::new(AppState::new(cfg));

        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let server = tokio::spawn(start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            Arc::clone(&shutdown),
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 302"));
        assert!(raw.to_ascii_lowercase().contains("location: /static/index.html"));

        shutdown.notify_one();
        server.await.unwrap();
    }
}
