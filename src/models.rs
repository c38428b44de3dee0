use serde::{Deserialize, Serialize};

/// Snapshot of a network as reported by the host plugin.
///
/// Values come from the host side and are handed through without
/// modification. Fields absent from a host reply stay `None` and are omitted
/// again when the snapshot is serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: String,
    pub signal_strength: u8,
    pub icon: String,
    pub is_connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_type: Option<WiFiSecurityType>,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            name: String::from("Unknown"),
            signal_strength: 0,
            icon: String::from("network-offline-symbolic"),
            is_connected: false,
            ip_address: None,
            mac_address: None,
            ssid: None,
            connection_type: None,
            security_type: None,
        }
    }
}

/// Security protocol of a WiFi network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WiFiSecurityType {
    #[default]
    None,
    Wep,
    WpaPsk,
    WpaEap,
    Wpa2Psk,
    Wpa3Psk,
}

/// Parameters of a WiFi connection attempt.
///
/// Only the SSID is mandatory. Whether the remaining fields are required for
/// a given `security_type` is judged by the host plugin, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiFiConnectionConfig {
    pub ssid: String,
    pub password: Option<String>,
    pub security_type: WiFiSecurityType,
    /// Identity for enterprise (`wpa-eap`) networks.
    pub username: Option<String>,
}
