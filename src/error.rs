use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors surfaced by the network bridge.
///
/// Host failures keep the host plugin's code and message verbatim; nothing
/// here translates or reinterprets them.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Failure reported by the host plugin for a delivered command.
    #[error("{message}")]
    Host { code: i32, message: String },

    /// The transport to the host plugin failed.
    #[error("bridge transport failed: {0}")]
    Bridge(#[from] std::io::Error),

    /// A frame or reply payload could not be encoded or decoded.
    #[error("invalid bridge payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The host replied with a well-formed but contract-violating frame.
    #[error("bridge protocol violation: {0}")]
    Protocol(String),

    /// Plugin state was accessed before the plugin was registered.
    #[error("network bridge plugin is not initialized")]
    NotInitialized,
}

impl serde::Serialize for NetworkError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
