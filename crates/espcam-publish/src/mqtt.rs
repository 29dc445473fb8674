use crate::{DetectionEvent, PublishError, PublisherConfig};
use rumqttc::{
    AsyncClient, ClientError, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::task::JoinHandle;

// capacity of the client request channel
const REQUEST_CAPACITY: usize = 16;

// how long close() waits for the event loop to flush the disconnect
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// An open broker session.
///
/// The MQTT event loop (keepalive, acks, socket writes) runs on a background
/// task from `connect` until `close`.
pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
    qos: QoS,
    alive: Arc<AtomicBool>,
    event_task: Option<JoinHandle<()>>,
}

impl MqttPublisher {
    /// Connect and wait for the broker to accept the session.
    ///
    /// # Errors
    ///
    /// `PublishError::Connect` if the broker is unreachable, rejects the
    /// credentials, or does not answer within the connect timeout.
    pub async fn connect(config: &PublisherConfig) -> Result<Self, PublishError> {
        let qos = config.mqtt_qos()?;

        let mut options = MqttOptions::new(config.client_id(), config.host(), config.port());
        options.set_keep_alive(config.keep_alive());
        if let Some((user, password)) = config.credentials() {
            options.set_credentials(user, password);
        }

        let (client, mut event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);

        tokio::time::timeout(config.connect_timeout(), wait_for_connack(&mut event_loop))
            .await
            .map_err(|_| {
                PublishError::Connect(format!(
                    "no answer from {}:{} within {:?}",
                    config.host(),
                    config.port(),
                    config.connect_timeout()
                ))
            })??;

        log::info!(
            "connected to mqtt broker {}:{}, topic {}",
            config.host(),
            config.port(),
            config.topic()
        );

        let alive = Arc::new(AtomicBool::new(true));
        let event_task = tokio::spawn(drive(event_loop, Arc::clone(&alive)));

        Ok(Self {
            client,
            topic: config.topic().to_string(),
            qos,
            alive,
            event_task: Some(event_task),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Serialize and queue one event for the broker without waiting.
    ///
    /// # Errors
    ///
    /// `PublishError::QueueFull` when the event loop has not drained earlier
    /// events yet.
    /// `PublishError::Disconnected` once the connection is gone.
    pub fn publish(&self, event: &DetectionEvent) -> Result<(), PublishError> {
        if !self.is_alive() {
            return Err(PublishError::Disconnected);
        }
        let payload = event.to_json()?;
        if let Err(err) = self
            .client
            .try_publish(self.topic.as_str(), self.qos, false, payload)
        {
            return Err(match err {
                ClientError::TryRequest(_) if self.is_alive() => PublishError::QueueFull,
                ClientError::TryRequest(_) => PublishError::Disconnected,
                other => other.into(),
            });
        }
        log::debug!("queued {} faces for {}", event.faces.len(), self.topic);
        Ok(())
    }

    /// Disconnect and stop the background event loop.
    pub async fn close(mut self) {
        if self.is_alive() {
            if let Err(err) = self.client.try_disconnect() {
                log::debug!("mqtt disconnect: {}", err);
            }
        }
        if let Some(mut task) = self.event_task.take() {
            if tokio::time::timeout(CLOSE_GRACE, &mut task).await.is_err() {
                log::debug!("mqtt event loop did not stop in time");
                task.abort();
            }
        }
        log::info!("mqtt publisher closed");
    }
}

impl Drop for MqttPublisher {
    fn drop(&mut self) {
        // close() already took the task on the normal path
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
    }
}

async fn wait_for_connack(event_loop: &mut EventLoop) -> Result<(), PublishError> {
    loop {
        match event_loop.poll().await? {
            Event::Incoming(Packet::ConnAck(ack)) => {
                return match ack.code {
                    ConnectReturnCode::Success => Ok(()),
                    code => Err(PublishError::Connect(format!("broker refused: {code:?}"))),
                };
            }
            _ => continue,
        }
    }
}

async fn drive(mut event_loop: EventLoop, alive: Arc<AtomicBool>) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
            Ok(_) => {}
            Err(err) => {
                log::warn!("mqtt connection lost: {}", err);
                break;
            }
        }
    }
    alive.store(false, Ordering::Relaxed);
}
