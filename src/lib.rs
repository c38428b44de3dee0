use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

use commands::{
    connect_to_wifi, delete_wifi_connection, disconnect_from_wifi, get_network_state,
    get_saved_wifi_networks, get_wireless_enabled, is_wireless_available, list_wifi_networks,
    set_wireless_enabled, toggle_network,
};

pub mod bridge;
pub mod constants;

mod commands;
mod error;
mod events;
mod models;
mod proxy;
#[cfg(unix)]
mod socket;

pub use crate::bridge::{MockBridge, NetworkBridge};
pub use crate::error::{NetworkError, Result as NetworkResult};
pub use crate::events::spawn_network_change_emitter;
pub use crate::models::{NetworkInfo, WiFiConnectionConfig, WiFiSecurityType};
pub use crate::proxy::NetworkProxy;
#[cfg(unix)]
pub use crate::socket::UnixSocketBridge;

/// Plugin configuration, read from the `plugins.network-bridge` section of
/// `tauri.conf.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Socket of the host network plugin. Falls back to
    /// [`constants::DEFAULT_SOCKET_PATH`] when unset.
    pub socket_path: Option<PathBuf>,
}

/// Managed state holding the command proxy shared by all plugin commands.
pub struct NetworkBridgeState {
    proxy: NetworkProxy,
}

fn plugin_builder<R: Runtime, C: DeserializeOwned>() -> Builder<R, C> {
    Builder::<R, C>::new("network-bridge").invoke_handler(tauri::generate_handler![
        get_network_state,
        list_wifi_networks,
        connect_to_wifi,
        toggle_network,
        disconnect_from_wifi,
        get_saved_wifi_networks,
        delete_wifi_connection,
        get_wireless_enabled,
        set_wireless_enabled,
        is_wireless_available,
    ])
}

/// Initializes the plugin against the host network plugin's socket.
///
/// Also subscribes to the host's network change stream and re-emits
/// debounced `network-changed` events to the webview. A host that does not
/// accept the subscription is logged and otherwise ignored; commands keep
/// working without events.
#[cfg(unix)]
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    plugin_builder::<R, Option<Config>>()
        .setup(|app, api| -> Result<(), Box<dyn std::error::Error>> {
            let config = api.config().clone().unwrap_or_default();
            let socket_path = config
                .socket_path
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SOCKET_PATH));

            let bridge = UnixSocketBridge::new(socket_path);
            app.manage(NetworkBridgeState {
                proxy: NetworkProxy::new(Arc::new(bridge.clone())),
            });

            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                match bridge.listen_network_changes().await {
                    Ok(snapshots) => spawn_network_change_emitter(app, snapshots),
                    Err(e) => {
                        tracing::warn!(error = %e, "network change notifications unavailable")
                    }
                }
            });

            Ok(())
        })
        .build()
}

/// Initializes the plugin around a caller-supplied bridge.
///
/// Meant for platforms without the socket transport and for tests. No
/// network change events are emitted; those are a capability of the socket
/// transport.
pub fn init_with_bridge<R: Runtime, B: NetworkBridge + 'static>(bridge: B) -> TauriPlugin<R> {
    plugin_builder::<R, ()>()
        .setup(move |app, _api| -> Result<(), Box<dyn std::error::Error>> {
            app.manage(NetworkBridgeState {
                proxy: NetworkProxy::new(Arc::new(bridge)),
            });
            Ok(())
        })
        .build()
}

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`]
/// to access the network bridge APIs.
pub trait NetworkBridgeExt<R: Runtime> {
    /// A clone of the proxy shared with the plugin's commands.
    fn network_proxy(&self) -> NetworkResult<NetworkProxy>;
}

impl<R: Runtime, T: Manager<R>> NetworkBridgeExt<R> for T {
    fn network_proxy(&self) -> NetworkResult<NetworkProxy> {
        self.try_state::<NetworkBridgeState>()
            .map(|state| state.proxy.clone())
            .ok_or(NetworkError::NotInitialized)
    }
}
