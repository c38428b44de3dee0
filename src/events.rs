use std::time::Duration;

use tauri::{AppHandle, Emitter, Runtime};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::constants::{EVENT_NETWORK_CHANGED, NETWORK_CHANGE_DEBOUNCE_MS};
use crate::models::NetworkInfo;

/// Forward network change snapshots from the host plugin to the webview.
///
/// Bursts collapse to the last snapshot of the burst via a trailing
/// debounce. The task ends when the snapshot stream closes.
pub fn spawn_network_change_emitter<R: Runtime>(
    app: AppHandle<R>,
    snapshots: mpsc::Receiver<NetworkInfo>,
) {
    tauri::async_runtime::spawn(async move {
        let window = Duration::from_millis(NETWORK_CHANGE_DEBOUNCE_MS);
        debounce_network_changes(snapshots, window, |info| {
            debug!(network = %info.name, "emitting network change");
            if let Err(e) = app.emit(EVENT_NETWORK_CHANGED, &info) {
                error!(error = %e, "failed to emit network change event");
            }
        })
        .await;
    });
}

/// Trailing debounce over a snapshot stream.
///
/// Each snapshot restarts the window; `emit` fires with the latest snapshot
/// once the window passes without another one arriving. A snapshot still
/// pending when the stream closes is discarded.
async fn debounce_network_changes(
    mut snapshots: mpsc::Receiver<NetworkInfo>,
    window: Duration,
    mut emit: impl FnMut(NetworkInfo),
) {
    let mut pending: Option<NetworkInfo> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        match deadline {
            Some(at) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(at) => {
                        if let Some(info) = pending.take() {
                            emit(info);
                        }
                        deadline = None;
                    }
                    next = snapshots.recv() => match next {
                        Some(info) => {
                            pending = Some(info);
                            deadline = Some(Instant::now() + window);
                        }
                        None => break,
                    },
                }
            }
            None => match snapshots.recv().await {
                Some(info) => {
                    pending = Some(info);
                    deadline = Some(Instant::now() + window);
                }
                None => break,
            },
        }
    }
}
