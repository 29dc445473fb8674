use crate::PublishError;
use rumqttc::QoS;
use std::time::Duration;

/// Broker connection settings. Immutable once the publisher is connected.
#[derive(Clone, Debug)]
pub struct PublisherConfig {
    host: String,
    port: u16,
    topic: String,
    credentials: Option<(String, String)>,
    qos: u8,
    client_id: String,
    keep_alive: Duration,
    connect_timeout: Duration,
}

impl PublisherConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 1883,
            topic: "camera/detections".to_string(),
            credentials: None,
            qos: 0,
            client_id: format!("espcam-{}", std::process::id()),
            keep_alive: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Username and password. A username without a password sends an empty one.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    /// Delivery quality level, 0 to 2.
    pub fn with_qos(mut self, qos: u8) -> Self {
        self.qos = qos;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Bound on waiting for the broker's CONNACK.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    // Getters
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(user, password)| (user.as_str(), password.as_str()))
    }

    pub fn qos(&self) -> u8 {
        self.qos
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub(crate) fn mqtt_qos(&self) -> Result<QoS, PublishError> {
        match self.qos {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            other => Err(PublishError::InvalidQos(other)),
        }
    }
}
