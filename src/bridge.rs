use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{NetworkError, Result};
use crate::models::{WiFiConnectionConfig, WiFiSecurityType};

/// Transport seam between the typed proxy and the host network plugin.
///
/// An implementation delivers a named command together with its argument
/// record and resolves with the host's reply. It must not retry, impose
/// timeouts or rewrite either side of the exchange; failures reach the
/// caller as-is.
#[async_trait]
pub trait NetworkBridge: Send + Sync {
    /// Invoke `command` on the host plugin and await its reply.
    ///
    /// `args` is `None` for commands that take no argument record.
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value>;
}

/// Argument record of the `connect_to_wifi` command.
///
/// Unset members are left out of the record entirely; the host contract
/// distinguishes an absent password from an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectParams {
    pub ssid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub security_type: WiFiSecurityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<WiFiConnectionConfig> for ConnectParams {
    fn from(config: WiFiConnectionConfig) -> Self {
        Self {
            ssid: config.ssid,
            password: config.password,
            security_type: config.security_type,
            username: config.username,
        }
    }
}

/// Argument record of the `toggle_network` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleParams {
    pub enable: bool,
}

/// Argument record of the `delete_wifi_connection` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConnectionParams {
    pub ssid: String,
}

/// Argument record of the `set_wireless_enabled` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWirelessParams {
    pub enabled: bool,
}

#[derive(Debug, Clone)]
enum MockReply {
    Value(Value),
    HostError { code: i32, message: String },
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<String, VecDeque<MockReply>>,
    invocations: Vec<(String, Option<Value>)>,
}

/// In-memory bridge for tests.
///
/// Records every invocation in order and replays scripted replies per
/// command, first in first out. Commands without a scripted reply resolve
/// to `null`, matching the host's acknowledgement of void operations.
#[derive(Debug, Clone, Default)]
pub struct MockBridge {
    inner: Arc<Mutex<MockState>>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next reply for `command`.
    pub async fn respond_with(&self, command: &str, reply: Value) {
        self.inner
            .lock()
            .await
            .replies
            .entry(command.to_string())
            .or_default()
            .push_back(MockReply::Value(reply));
    }

    /// Script the next invocation of `command` to fail as a host error.
    pub async fn fail_with(&self, command: &str, code: i32, message: &str) {
        self.inner
            .lock()
            .await
            .replies
            .entry(command.to_string())
            .or_default()
            .push_back(MockReply::HostError {
                code,
                message: message.to_string(),
            });
    }

    /// Every `(command, args)` pair seen so far, in invocation order.
    pub async fn invocations(&self) -> Vec<(String, Option<Value>)> {
        self.inner.lock().await.invocations.clone()
    }
}

#[async_trait]
impl NetworkBridge for MockBridge {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value> {
        let mut state = self.inner.lock().await;
        state.invocations.push((command.to_string(), args));
        match state
            .replies
            .get_mut(command)
            .and_then(|queue| queue.pop_front())
        {
            Some(MockReply::Value(value)) => Ok(value),
            Some(MockReply::HostError { code, message }) => {
                Err(NetworkError::Host { code, message })
            }
            None => Ok(Value::Null),
        }
    }
}
