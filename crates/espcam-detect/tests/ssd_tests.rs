use espcam_base::Tensor;
use espcam_detect::ssd::{INPUT_SIZE, MEAN_BGR, postprocess, preprocess};
use espcam_detect::{DetectError, Detection, finalize};

#[test]
fn test_preprocess_shape_and_mean() {
    // 2x2 frame, every pixel R=10 G=20 B=30
    let frame = Tensor::new(vec![2, 2, 3], [10u8, 20, 30].repeat(4)).unwrap();
    let blob = preprocess(&frame).unwrap();

    assert_eq!(blob.shape(), &[1, 3, INPUT_SIZE, INPUT_SIZE]);
    assert_eq!(blob[[0, 0, 0, 0]], 30.0 - MEAN_BGR[0]);
    assert_eq!(blob[[0, 1, 150, 150]], 20.0 - MEAN_BGR[1]);
    assert_eq!(blob[[0, 2, 299, 299]], 10.0 - MEAN_BGR[2]);
}

#[test]
fn test_preprocess_nearest_neighbour_quadrants() {
    // Left column red, right column blue
    let data = vec![255, 0, 0, 0, 0, 255, 255, 0, 0, 0, 0, 255];
    let frame = Tensor::new(vec![2, 2, 3], data).unwrap();
    let blob = preprocess(&frame).unwrap();

    // channel 2 is red
    assert_eq!(blob[[0, 2, 10, 10]], 255.0 - MEAN_BGR[2]);
    assert_eq!(blob[[0, 2, 10, 290]], 0.0 - MEAN_BGR[2]);
    // channel 0 is blue
    assert_eq!(blob[[0, 0, 290, 290]], 255.0 - MEAN_BGR[0]);
}

#[test]
fn test_preprocess_rejects_grayscale() {
    let frame = Tensor::new(vec![2, 2, 1], vec![0u8; 4]).unwrap();
    assert!(matches!(preprocess(&frame), Err(DetectError::Shape(_))));
}

#[test]
fn test_postprocess_scales_rows() {
    let rows = vec![
        0.0, 1.0, 0.9, 0.25, 0.5, 0.75, 1.0, //
        0.0, 1.0, 0.1, 0.0, 0.0, 0.1, 0.1,
    ];
    let output = Tensor::new(vec![1, 1, 2, 7], rows).unwrap();
    let detections = postprocess(&output, 640, 480).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0], Detection::new(160, 240, 480, 480, 0.9));

    // y2 == height lands on the last row once finalized
    let kept = finalize(detections, 0.5, 640, 480);
    assert_eq!(kept, vec![Detection::new(160, 240, 480, 479, 0.9)]);
}

#[test]
fn test_postprocess_rejects_wrong_layout() {
    let output = Tensor::new(vec![1, 10], vec![0.0f32; 10]).unwrap();
    assert!(matches!(postprocess(&output, 10, 10), Err(DetectError::Shape(_))));
}
