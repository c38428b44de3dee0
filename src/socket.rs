use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::{CMD_LISTEN_NETWORK_CHANGES, NOTIFY_NETWORK_CHANGED};
use crate::error::{NetworkError, Result};
use crate::models::NetworkInfo;
use crate::NetworkBridge;

const JSONRPC_VERSION: &str = "2.0";

/// Outgoing command frame, one JSON object per line.
#[derive(Debug, Serialize)]
struct CommandFrame<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
    id: String,
}

/// Incoming reply frame. Unknown members are ignored.
#[derive(Debug, Deserialize)]
struct ReplyFrame {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ReplyError>,
    #[serde(default)]
    id: Option<Value>,
}

/// Error object attached to a failed reply.
#[derive(Debug, Deserialize)]
struct ReplyError {
    code: i32,
    message: String,
}

/// Incoming notification frame on a listen stream.
#[derive(Debug, Deserialize)]
struct NotificationFrame {
    method: String,
    #[serde(default)]
    params: Value,
}

/// Bridge to a host network plugin listening on a Unix domain socket.
///
/// Speaks line-delimited JSON-RPC 2.0 and opens a fresh connection for every
/// invocation, so concurrent calls never share a stream and the host is free
/// to serialize or interleave them. Calls carry no timeout; they settle when
/// the host replies or the connection drops.
#[derive(Debug, Clone)]
pub struct UnixSocketBridge {
    socket_path: PathBuf,
}

impl UnixSocketBridge {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn send_command(
        &self,
        command: &str,
        args: Option<Value>,
    ) -> Result<(BufReader<OwnedReadHalf>, OwnedWriteHalf, String)> {
        let id = Uuid::new_v4().to_string();
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (read_half, mut write_half) = stream.into_split();

        let frame = serde_json::to_string(&CommandFrame {
            jsonrpc: JSONRPC_VERSION,
            method: command,
            params: args,
            id: id.clone(),
        })?;
        write_half.write_all(frame.as_bytes()).await?;
        write_half.write_all(b"\n").await?;
        write_half.flush().await?;

        Ok((BufReader::new(read_half), write_half, id))
    }

    /// Subscribe to the host plugin's network change stream.
    ///
    /// Sends the listen command on a dedicated connection, awaits the
    /// acknowledgement, then forwards every `network_changed` notification
    /// until the host closes the stream. The receiver ends on that close.
    pub async fn listen_network_changes(&self) -> Result<mpsc::Receiver<NetworkInfo>> {
        let (mut reader, write_half, id) =
            self.send_command(CMD_LISTEN_NETWORK_CHANGES, None).await?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(NetworkError::Protocol(String::from(
                "host closed the listen stream before acknowledging",
            )));
        }
        decode_reply(&line, &id)?;
        debug!(%id, "subscribed to network change notifications");

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            // Dropping the write half would half-close the socket, so it
            // stays owned here for the lifetime of the stream.
            let _write_half = write_half;
            let mut line = String::new();
            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break,
                    Ok(_) => match serde_json::from_str::<NotificationFrame>(line.trim_end()) {
                        Ok(frame) if frame.method == NOTIFY_NETWORK_CHANGED => {
                            match serde_json::from_value::<NetworkInfo>(frame.params) {
                                Ok(info) => {
                                    if tx.send(info).await.is_err() {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    warn!(error = %e, "skipping malformed network change payload")
                                }
                            }
                        }
                        Ok(frame) => {
                            warn!(method = %frame.method, "ignoring unexpected notification")
                        }
                        Err(e) => warn!(error = %e, "skipping malformed notification line"),
                    },
                    Err(e) => {
                        warn!(error = %e, "network change stream failed");
                        break;
                    }
                }
            }
            debug!("network change stream closed");
        });

        Ok(rx)
    }
}

#[async_trait]
impl NetworkBridge for UnixSocketBridge {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value> {
        let (mut reader, _write_half, id) = self.send_command(command, args).await?;
        debug!(command, %id, "sent command frame");

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(NetworkError::Protocol(format!(
                "host closed the connection before replying to {command}"
            )));
        }
        decode_reply(&line, &id)
    }
}

fn decode_reply(line: &str, request_id: &str) -> Result<Value> {
    let reply: ReplyFrame = serde_json::from_str(line.trim_end())?;

    // A host failure may carry a null id (JSON-RPC parse errors do), so it
    // is checked before the id.
    if let Some(err) = reply.error {
        return Err(NetworkError::Host {
            code: err.code,
            message: err.message,
        });
    }
    match reply.id {
        Some(Value::String(id)) if id == request_id => {}
        other => {
            return Err(NetworkError::Protocol(format!(
                "reply id {other:?} does not match request id {request_id}"
            )));
        }
    }
    Ok(reply.result.unwrap_or(Value::Null))
}
