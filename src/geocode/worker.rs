//! Geocoder Worker Thread
//!
//! Runs geocoder searches in a background thread so typing never blocks on
//! the network. Receives requests via channel, performs the HTTP call and
//! sends the outcome back tagged with the request id.
//!
//! Uses a current-thread tokio runtime for async HTTP with cancellation support.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

use tokio_util::sync::CancellationToken;

use super::client::{GeocodeClient, GeocodeError};
use super::types::{GeocodeRequest, GeocodeResponse};

/// Spawn the geocoder worker thread
///
/// The thread exits when `request_rx` is closed. Panics are caught and
/// logged so they cannot be printed over the terminal UI.
pub fn spawn_worker(
    client: GeocodeClient,
    request_rx: Receiver<GeocodeRequest>,
    response_tx: Sender<GeocodeResponse>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create geocoder runtime: {}", e);
                    return;
                }
            };

            rt.block_on(worker_loop(client, request_rx, response_tx));
        }));

        if let Err(e) = result {
            let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("Geocoder worker thread panicked: {}", panic_msg);
        }
    })
}

/// Process requests until the channel is closed
///
/// Blocking `recv()` is fine here since this runs on a dedicated thread. A
/// request superseded while queued is answered with `Cancelled` without
/// touching the network.
async fn worker_loop(
    client: GeocodeClient,
    request_rx: Receiver<GeocodeRequest>,
    response_tx: Sender<GeocodeResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        match request {
            GeocodeRequest::Search {
                query,
                request_id,
                cancel_token,
            } => {
                handle_search(&client, &query, request_id, cancel_token, &response_tx).await;
            }
        }
    }
    log::debug!("Geocoder request channel closed, worker exiting");
}

async fn handle_search(
    client: &GeocodeClient,
    query: &str,
    request_id: u64,
    cancel_token: CancellationToken,
    response_tx: &Sender<GeocodeResponse>,
) {
    let response = match client.search_with_cancel(query, &cancel_token).await {
        Ok(places) => {
            log::debug!(
                "Geocoder request {} returned {} places",
                request_id,
                places.len()
            );
            GeocodeResponse::Suggestions { places, request_id }
        }
        Err(GeocodeError::Cancelled) => GeocodeResponse::Cancelled { request_id },
        Err(e) => GeocodeResponse::Failed {
            message: e.to_string(),
            request_id,
        },
    };

    // Receiver gone means the UI has shut down
    let _ = response_tx.send(response);
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
