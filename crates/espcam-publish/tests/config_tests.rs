use espcam_publish::{PublishError, PublisherConfig};
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = PublisherConfig::new("broker.local");
    assert_eq!(config.host(), "broker.local");
    assert_eq!(config.port(), 1883);
    assert_eq!(config.topic(), "camera/detections");
    assert_eq!(config.qos(), 0);
    assert_eq!(config.keep_alive(), Duration::from_secs(10));
    assert!(config.credentials().is_none());
    assert!(config.client_id().starts_with("espcam-"));
}

#[test]
fn test_builder() {
    let config = PublisherConfig::new("10.0.0.5")
        .with_port(8883)
        .with_topic("lab/faces")
        .with_credentials("cam", "secret")
        .with_qos(1)
        .with_client_id("door-cam");

    assert_eq!(config.port(), 8883);
    assert_eq!(config.topic(), "lab/faces");
    assert_eq!(config.credentials(), Some(("cam", "secret")));
    assert_eq!(config.qos(), 1);
    assert_eq!(config.client_id(), "door-cam");
}

#[test]
fn test_error_display() {
    assert_eq!(PublishError::InvalidQos(3).to_string(), "invalid qos level: 3");
    assert_eq!(PublishError::Disconnected.to_string(), "broker connection lost");
    assert_eq!(PublishError::QueueFull.to_string(), "outgoing queue full, event dropped");
    assert!(PublishError::Connect("refused".into()).to_string().contains("refused"));
}
