use crate::{DetectionEvent, MqttPublisher, PublishError, PublisherConfig};

/// Detection publishing for one session, or none.
///
/// Connection and publish failures are logged and switch the publisher to
/// `Disabled`; the processing loop is never interrupted.
pub enum Publisher {
    Mqtt(MqttPublisher),
    Disabled,
}

impl Publisher {
    /// Connect when a broker is configured; otherwise, or on failure, `Disabled`.
    pub async fn connect(config: Option<&PublisherConfig>) -> Self {
        let Some(config) = config else {
            return Publisher::Disabled;
        };
        match MqttPublisher::connect(config).await {
            Ok(mqtt) => Publisher::Mqtt(mqtt),
            Err(err) => {
                log::warn!(
                    "mqtt publishing disabled, cannot connect to {}:{}: {}",
                    config.host(),
                    config.port(),
                    err
                );
                Publisher::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Publisher::Mqtt(_))
    }

    /// Publish a batch. Returns whether it was handed to the broker client.
    ///
    /// A full outgoing queue drops this batch only; any other failure
    /// disables publishing for the session.
    pub async fn publish(&mut self, event: &DetectionEvent) -> bool {
        let Publisher::Mqtt(mqtt) = self else {
            return false;
        };
        match mqtt.publish(event) {
            Ok(()) => true,
            Err(PublishError::QueueFull) => {
                log::warn!("mqtt queue full, dropping detections for frame {:?}", event.frame);
                false
            }
            Err(err) => {
                log::warn!("mqtt publishing disabled for this session: {}", err);
                if let Publisher::Mqtt(mqtt) = std::mem::replace(self, Publisher::Disabled) {
                    mqtt.close().await;
                }
                false
            }
        }
    }

    /// Release the broker connection, if any.
    pub async fn close(self) {
        if let Publisher::Mqtt(mqtt) = self {
            mqtt.close().await;
        }
    }
}
