// Server module entry
// Accept loop for the local edge emulator

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::bind_listener;
pub use signal::shutdown_signal;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections until `shutdown` resolves.
///
/// Must run inside a `tokio::task::LocalSet`; connections are served by
/// `spawn_local` tasks. Returns the number of connections still open when
/// the loop stopped.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()>,
) -> usize {
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                logger::log_server_stop();
                break;
            }
        }
    }

    active_connections.load(Ordering::SeqCst)
}
