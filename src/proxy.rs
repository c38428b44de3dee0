use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::bridge::{
    ConnectParams, DeleteConnectionParams, NetworkBridge, SetWirelessParams, ToggleParams,
};
use crate::constants::{
    CMD_CONNECT_TO_WIFI, CMD_DELETE_WIFI_CONNECTION, CMD_DISCONNECT_FROM_WIFI,
    CMD_GET_NETWORK_STATE, CMD_GET_SAVED_WIFI_NETWORKS, CMD_GET_WIRELESS_ENABLED,
    CMD_IS_WIRELESS_AVAILABLE, CMD_LIST_WIFI_NETWORKS, CMD_SET_WIRELESS_ENABLED,
    CMD_TOGGLE_NETWORK,
};
use crate::error::Result;
use crate::models::{NetworkInfo, WiFiConnectionConfig};

/// Typed client for the host network plugin.
///
/// Every method is a stateless pass-through: it serializes the documented
/// argument record, issues a single bridge invocation and hands back the
/// decoded reply or the unmodified failure. Clones are cheap and share one
/// bridge.
#[derive(Clone)]
pub struct NetworkProxy {
    bridge: Arc<dyn NetworkBridge>,
}

impl NetworkProxy {
    pub fn new(bridge: Arc<dyn NetworkBridge>) -> Self {
        Self { bridge }
    }

    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value> {
        debug!(command, "forwarding command to host plugin");
        self.bridge.invoke(command, args).await
    }

    async fn query<T: DeserializeOwned>(&self, command: &str) -> Result<T> {
        let reply = self.invoke(command, None).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Get the current network state
    pub async fn get_current_network_state(&self) -> Result<NetworkInfo> {
        self.query(CMD_GET_NETWORK_STATE).await
    }

    /// List the WiFi networks currently visible to the host plugin.
    ///
    /// An empty list is a normal reply, not a failure.
    pub async fn list_wifi_networks(&self) -> Result<Vec<NetworkInfo>> {
        self.query(CMD_LIST_WIFI_NETWORKS).await
    }

    /// Ask the host plugin to associate with a WiFi network.
    pub async fn connect_to_wifi(&self, config: WiFiConnectionConfig) -> Result<()> {
        let args = serde_json::to_value(ConnectParams::from(config))?;
        self.invoke(CMD_CONNECT_TO_WIFI, Some(args)).await?;
        Ok(())
    }

    /// Enable or disable networking as a whole.
    pub async fn toggle_network(&self, enable: bool) -> Result<()> {
        let args = serde_json::to_value(ToggleParams { enable })?;
        self.invoke(CMD_TOGGLE_NETWORK, Some(args)).await?;
        Ok(())
    }

    /// Drop the active WiFi connection.
    pub async fn disconnect_from_wifi(&self) -> Result<()> {
        self.invoke(CMD_DISCONNECT_FROM_WIFI, None).await?;
        Ok(())
    }

    /// List the connection profiles saved on the host.
    pub async fn get_saved_wifi_networks(&self) -> Result<Vec<NetworkInfo>> {
        self.query(CMD_GET_SAVED_WIFI_NETWORKS).await
    }

    /// Delete a saved connection profile, resolving with whether one existed.
    pub async fn delete_wifi_connection(&self, ssid: &str) -> Result<bool> {
        let args = serde_json::to_value(DeleteConnectionParams {
            ssid: ssid.to_string(),
        })?;
        let reply = self.invoke(CMD_DELETE_WIFI_CONNECTION, Some(args)).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Whether the wireless radio is enabled.
    pub async fn get_wireless_enabled(&self) -> Result<bool> {
        self.query(CMD_GET_WIRELESS_ENABLED).await
    }

    /// Switch the wireless radio on or off.
    pub async fn set_wireless_enabled(&self, enabled: bool) -> Result<()> {
        let args = serde_json::to_value(SetWirelessParams { enabled })?;
        self.invoke(CMD_SET_WIRELESS_ENABLED, Some(args)).await?;
        Ok(())
    }

    /// Whether a usable wireless device is present on the host.
    pub async fn is_wireless_available(&self) -> Result<bool> {
        self.query(CMD_IS_WIRELESS_AVAILABLE).await
    }
}
