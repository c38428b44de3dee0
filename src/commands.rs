use tauri::State;

use crate::error::Result;
use crate::models::{NetworkInfo, WiFiConnectionConfig, WiFiSecurityType};
use crate::NetworkBridgeState;

/// Get the current network state
#[tauri::command]
pub async fn get_network_state(state: State<'_, NetworkBridgeState>) -> Result<NetworkInfo> {
    state.proxy.get_current_network_state().await
}

/// List available WiFi networks
#[tauri::command]
pub async fn list_wifi_networks(state: State<'_, NetworkBridgeState>) -> Result<Vec<NetworkInfo>> {
    state.proxy.list_wifi_networks().await
}

/// Connect to a WiFi network
///
/// The webview passes the same record the host plugin receives, so the
/// argument keys stay snake_case.
#[tauri::command(rename_all = "snake_case")]
pub async fn connect_to_wifi(
    state: State<'_, NetworkBridgeState>,
    ssid: String,
    password: Option<String>,
    security_type: WiFiSecurityType,
    username: Option<String>,
) -> Result<()> {
    state
        .proxy
        .connect_to_wifi(WiFiConnectionConfig {
            ssid,
            password,
            security_type,
            username,
        })
        .await
}

/// Toggle network on or off
#[tauri::command]
pub async fn toggle_network(state: State<'_, NetworkBridgeState>, enable: bool) -> Result<()> {
    state.proxy.toggle_network(enable).await
}

/// Disconnect from the active WiFi network
#[tauri::command]
pub async fn disconnect_from_wifi(state: State<'_, NetworkBridgeState>) -> Result<()> {
    state.proxy.disconnect_from_wifi().await
}

/// List saved WiFi connection profiles
#[tauri::command]
pub async fn get_saved_wifi_networks(
    state: State<'_, NetworkBridgeState>,
) -> Result<Vec<NetworkInfo>> {
    state.proxy.get_saved_wifi_networks().await
}

/// Delete a saved WiFi connection profile
#[tauri::command]
pub async fn delete_wifi_connection(
    state: State<'_, NetworkBridgeState>,
    ssid: String,
) -> Result<bool> {
    state.proxy.delete_wifi_connection(&ssid).await
}

/// Report whether the wireless radio is enabled
#[tauri::command]
pub async fn get_wireless_enabled(state: State<'_, NetworkBridgeState>) -> Result<bool> {
    state.proxy.get_wireless_enabled().await
}

/// Enable or disable the wireless radio
#[tauri::command]
pub async fn set_wireless_enabled(
    state: State<'_, NetworkBridgeState>,
    enabled: bool,
) -> Result<()> {
    state.proxy.set_wireless_enabled(enabled).await
}

/// Report whether a wireless device is available
#[tauri::command]
pub async fn is_wireless_available(state: State<'_, NetworkBridgeState>) -> Result<bool> {
    state.proxy.is_wireless_available().await
}
