use espcam_detect::Detection;
use espcam_publish::{DetectionEvent, FaceBox, FrameRef};

#[test]
fn test_stream_event_json_shape() {
    let detections = [Detection::new(10, 20, 110, 140, 0.875)];
    let event = DetectionEvent::new("192.168.4.1", FrameRef::Index(42), &detections);

    let value: serde_json::Value = serde_json::from_slice(&event.to_json().unwrap()).unwrap();

    assert!(value["timestamp"].as_f64().unwrap() > 1_600_000_000.0);
    assert_eq!(value["source"], "192.168.4.1");
    assert_eq!(value["frame"], 42);
    let faces = value["faces"].as_array().unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0]["x1"], 10);
    assert_eq!(faces[0]["y1"], 20);
    assert_eq!(faces[0]["x2"], 110);
    assert_eq!(faces[0]["y2"], 140);
    assert_eq!(faces[0]["confidence"], 0.875);
}

#[test]
fn test_capture_event_uses_file_name() {
    let event = DetectionEvent::new("cam", FrameRef::Name("capture_1700000000.jpg".to_string()), &[]);
    let value: serde_json::Value = serde_json::from_slice(&event.to_json().unwrap()).unwrap();

    assert_eq!(value["frame"], "capture_1700000000.jpg");
    assert_eq!(value["faces"], serde_json::json!([]));
}

#[test]
fn test_event_parses_back() {
    let json = r#"{"timestamp":1.5,"source":"cam","frame":"a.jpg","faces":[{"x1":1,"y1":2,"x2":3,"y2":4,"confidence":0.5}]}"#;
    let event: DetectionEvent = serde_json::from_str(json).unwrap();

    assert_eq!(event.frame, FrameRef::Name("a.jpg".to_string()));
    assert_eq!(
        event.faces,
        vec![FaceBox {
            x1: 1,
            y1: 2,
            x2: 3,
            y2: 4,
            confidence: 0.5
        }]
    );
}
