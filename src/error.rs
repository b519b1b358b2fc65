use thiserror::Error;

/// Failures the display engine can observe. None of them is fatal: the
/// poller and the video renderer log them and keep the last good state.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Request rejected by the transport or answered with a non-2xx status.
    #[error("network failure on {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("invalid JSON from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Autoplay policy refused to start the video.
    #[error("playback blocked for {src}: {reason}")]
    PlaybackBlocked { src: String, reason: String },
}

impl DisplayError {
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DisplayError::Network { .. } => "network",
            DisplayError::Parse { .. } => "parse",
            DisplayError::PlaybackBlocked { .. } => "playback_blocked",
        }
    }
}
