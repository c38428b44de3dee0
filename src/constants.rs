// Command identifiers understood by the host network plugin
pub const CMD_GET_NETWORK_STATE: &str = "get_network_state";
pub const CMD_LIST_WIFI_NETWORKS: &str = "list_wifi_networks";
pub const CMD_CONNECT_TO_WIFI: &str = "connect_to_wifi";
pub const CMD_TOGGLE_NETWORK: &str = "toggle_network";
pub const CMD_DISCONNECT_FROM_WIFI: &str = "disconnect_from_wifi";
pub const CMD_GET_SAVED_WIFI_NETWORKS: &str = "get_saved_wifi_networks";
pub const CMD_DELETE_WIFI_CONNECTION: &str = "delete_wifi_connection";
pub const CMD_GET_WIRELESS_ENABLED: &str = "get_wireless_enabled";
pub const CMD_SET_WIRELESS_ENABLED: &str = "set_wireless_enabled";
pub const CMD_IS_WIRELESS_AVAILABLE: &str = "is_wireless_available";
pub const CMD_LISTEN_NETWORK_CHANGES: &str = "listen_network_changes";

// Notification method pushed by the host plugin on a listen stream
pub const NOTIFY_NETWORK_CHANGED: &str = "network_changed";

// Event name re-emitted to the webview
pub const EVENT_NETWORK_CHANGED: &str = "network-changed";

// Socket the host network plugin listens on unless configured otherwise
pub const DEFAULT_SOCKET_PATH: &str = "/run/network-bridge.sock";

// Trailing debounce window for network change events
pub const NETWORK_CHANGE_DEBOUNCE_MS: u64 = 500;
