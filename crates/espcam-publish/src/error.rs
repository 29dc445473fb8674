use std::fmt;

#[derive(Debug)]
pub enum PublishError {
    /// The broker refused or never answered the connection.
    Connect(String),
    /// The background connection has failed or been closed.
    Disconnected,
    /// The outgoing queue is full; the event was dropped.
    QueueFull,
    Client(String),
    Serialize(String),
    InvalidQos(u8),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Connect(msg) => write!(f, "connect error: {msg}"),
            PublishError::Disconnected => write!(f, "broker connection lost"),
            PublishError::QueueFull => write!(f, "outgoing queue full, event dropped"),
            PublishError::Client(msg) => write!(f, "client error: {msg}"),
            PublishError::Serialize(msg) => write!(f, "serialize error: {msg}"),
            PublishError::InvalidQos(level) => write!(f, "invalid qos level: {level}"),
        }
    }
}

impl std::error::Error for PublishError {}

impl From<rumqttc::ClientError> for PublishError {
    fn from(err: rumqttc::ClientError) -> Self {
        PublishError::Client(err.to_string())
    }
}

impl From<rumqttc::ConnectionError> for PublishError {
    fn from(err: rumqttc::ConnectionError) -> Self {
        PublishError::Connect(err.to_string())
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        PublishError::Serialize(err.to_string())
    }
}
