#![cfg(unix)]

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tauri_plugin_network_bridge::constants::{
    CMD_CONNECT_TO_WIFI, CMD_GET_NETWORK_STATE, CMD_LISTEN_NETWORK_CHANGES, CMD_TOGGLE_NETWORK,
    NOTIFY_NETWORK_CHANGED,
};
use tauri_plugin_network_bridge::{NetworkBridge, NetworkError, UnixSocketBridge};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixListener;

fn bridge_in(dir: &TempDir) -> (UnixSocketBridge, UnixListener) {
    let path = dir.path().join("host.sock");
    let listener = UnixListener::bind(&path).unwrap();
    (UnixSocketBridge::new(path), listener)
}

async fn accept_frame(
    listener: &UnixListener,
) -> (Value, BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let (stream, _) = listener.accept().await.unwrap();
    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    (
        serde_json::from_str(line.trim_end()).unwrap(),
        reader,
        write_half,
    )
}

async fn send_line(write_half: &mut OwnedWriteHalf, value: &Value) {
    let mut line = serde_json::to_string(value).unwrap();
    line.push('\n');
    write_half.write_all(line.as_bytes()).await.unwrap();
}

#[tokio::test]
async fn invoke_round_trips_over_the_socket() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (frame, _reader, mut write_half) = accept_frame(&listener).await;
        assert_eq!(frame["jsonrpc"], json!("2.0"));
        assert_eq!(frame["method"], json!(CMD_GET_NETWORK_STATE));
        assert!(frame.get("params").is_none());

        let id = frame["id"].clone();
        send_line(
            &mut write_half,
            &json!({
                "jsonrpc": "2.0",
                "result": {
                    "name": "Wired",
                    "signal_strength": 0,
                    "icon": "network-wired-symbolic",
                    "is_connected": true,
                },
                "id": id,
            }),
        )
        .await;
    });

    let reply = bridge.invoke(CMD_GET_NETWORK_STATE, None).await.unwrap();
    assert_eq!(reply["name"], json!("Wired"));
    host.await.unwrap();
}

#[tokio::test]
async fn args_travel_in_the_params_member() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (frame, _reader, mut write_half) = accept_frame(&listener).await;
        assert_eq!(frame["method"], json!(CMD_TOGGLE_NETWORK));
        assert_eq!(frame["params"], json!({"enable": true}));

        let id = frame["id"].clone();
        send_line(
            &mut write_half,
            &json!({"jsonrpc": "2.0", "result": null, "id": id}),
        )
        .await;
    });

    let reply = bridge
        .invoke(CMD_TOGGLE_NETWORK, Some(json!({"enable": true})))
        .await
        .unwrap();
    assert_eq!(reply, Value::Null);
    host.await.unwrap();
}

#[tokio::test]
async fn host_errors_pass_through_verbatim() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (frame, _reader, mut write_half) = accept_frame(&listener).await;
        let id = frame["id"].clone();
        send_line(
            &mut write_half,
            &json!({
                "jsonrpc": "2.0",
                "error": {"code": -32000, "message": "radio is soft-blocked"},
                "id": id,
            }),
        )
        .await;
    });

    let err = bridge
        .invoke(
            CMD_CONNECT_TO_WIFI,
            Some(json!({"ssid": "Cafe", "security_type": "none"})),
        )
        .await
        .unwrap_err();
    match err {
        NetworkError::Host { code, message } => {
            assert_eq!(code, -32000);
            assert_eq!(message, "radio is soft-blocked");
        }
        other => panic!("expected host error, got {other:?}"),
    }
    host.await.unwrap();
}

#[tokio::test]
async fn mismatched_reply_ids_are_protocol_violations() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (_frame, _reader, mut write_half) = accept_frame(&listener).await;
        send_line(
            &mut write_half,
            &json!({"jsonrpc": "2.0", "result": null, "id": "not-the-request"}),
        )
        .await;
    });

    let err = bridge.invoke(CMD_GET_NETWORK_STATE, None).await.unwrap_err();
    assert!(matches!(err, NetworkError::Protocol(_)));
    host.await.unwrap();
}

#[tokio::test]
async fn closing_without_a_reply_is_a_protocol_violation() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (_frame, _reader, _write_half) = accept_frame(&listener).await;
        // Dropped without replying.
    });

    let err = bridge.invoke(CMD_GET_NETWORK_STATE, None).await.unwrap_err();
    assert!(matches!(err, NetworkError::Protocol(_)));
    host.await.unwrap();
}

#[tokio::test]
async fn unreachable_sockets_are_bridge_errors() {
    let dir = TempDir::new().unwrap();
    let bridge = UnixSocketBridge::new(dir.path().join("missing.sock"));

    let err = bridge.invoke(CMD_GET_NETWORK_STATE, None).await.unwrap_err();
    assert!(matches!(err, NetworkError::Bridge(_)));
}

#[tokio::test]
async fn listen_forwards_network_change_notifications() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (frame, _reader, mut write_half) = accept_frame(&listener).await;
        assert_eq!(frame["method"], json!(CMD_LISTEN_NETWORK_CHANGES));

        let id = frame["id"].clone();
        send_line(
            &mut write_half,
            &json!({"jsonrpc": "2.0", "result": null, "id": id}),
        )
        .await;
        send_line(
            &mut write_half,
            &json!({
                "jsonrpc": "2.0",
                "method": NOTIFY_NETWORK_CHANGED,
                "params": {
                    "name": "wlan0",
                    "signal_strength": 61,
                    "icon": "network-wireless-signal-good-symbolic",
                    "is_connected": true,
                },
            }),
        )
        .await;
        send_line(
            &mut write_half,
            &json!({
                "jsonrpc": "2.0",
                "method": NOTIFY_NETWORK_CHANGED,
                "params": {
                    "name": "wlan0",
                    "signal_strength": 54,
                    "icon": "network-wireless-signal-good-symbolic",
                    "is_connected": true,
                },
            }),
        )
        .await;
    });

    let mut snapshots = bridge.listen_network_changes().await.unwrap();
    let first = snapshots.recv().await.unwrap();
    assert_eq!(first.name, "wlan0");
    assert_eq!(first.signal_strength, 61);
    let second = snapshots.recv().await.unwrap();
    assert_eq!(second.signal_strength, 54);

    host.await.unwrap();
    assert!(snapshots.recv().await.is_none());
}

#[tokio::test]
async fn malformed_notifications_are_skipped() {
    let dir = TempDir::new().unwrap();
    let (bridge, listener) = bridge_in(&dir);

    let host = tokio::spawn(async move {
        let (frame, _reader, mut write_half) = accept_frame(&listener).await;
        let id = frame["id"].clone();
        send_line(
            &mut write_half,
            &json!({"jsonrpc": "2.0", "result": null, "id": id}),
        )
        .await;

        write_half.write_all(b"definitely not json\n").await.unwrap();
        send_line(
            &mut write_half,
            &json!({"jsonrpc": "2.0", "method": "wireless_toggled", "params": {}}),
        )
        .await;
        send_line(
            &mut write_half,
            &json!({
                "jsonrpc": "2.0",
                "method": NOTIFY_NETWORK_CHANGED,
                "params": {
                    "name": "wlan0",
                    "signal_strength": 48,
                    "icon": "network-wireless-signal-ok-symbolic",
                    "is_connected": false,
                },
            }),
        )
        .await;
    });

    let mut snapshots = bridge.listen_network_changes().await.unwrap();
    let only = snapshots.recv().await.unwrap();
    assert_eq!(only.signal_strength, 48);

    host.await.unwrap();
    assert!(snapshots.recv().await.is_none());
}
