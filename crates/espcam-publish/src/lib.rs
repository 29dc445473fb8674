//! Optional republishing of detection results to an MQTT broker.

pub mod config;
pub mod error;
pub mod event;
pub mod mqtt;
pub mod publisher;

pub use config::PublisherConfig;
pub use error::PublishError;
pub use event::{DetectionEvent, FaceBox, FrameRef};
pub use mqtt::MqttPublisher;
pub use publisher::Publisher;
