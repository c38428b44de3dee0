const COMMANDS: &[&str] = &[
  "get_network_state",
  "list_wifi_networks",
  "connect_to_wifi",
  "toggle_network",
  "disconnect_from_wifi",
  "get_saved_wifi_networks",
  "delete_wifi_connection",
  "get_wireless_enabled",
  "set_wireless_enabled",
  "is_wireless_available",
];

fn main() {
  tauri_plugin::Builder::new(COMMANDS).build();
}
