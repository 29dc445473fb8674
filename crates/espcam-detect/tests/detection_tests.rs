use espcam_detect::{Detection, finalize};

#[test]
fn test_finalize_threshold_and_bounds() {
    let (width, height) = (320usize, 240usize);
    let candidates = vec![
        Detection::new(10, 10, 50, 60, 0.95),
        Detection::new(-20, -5, 400, 300, 0.7),
        Detection::new(100, 100, 140, 150, 0.49),
        Detection::new(5, 5, 15, 15, 0.5),
        Detection::new(0, 0, 10, 10, f32::NAN),
    ];

    for threshold in [0.0f32, 0.3, 0.5, 0.8, 1.0] {
        let kept = finalize(candidates.clone(), threshold, width, height);
        for d in &kept {
            assert!(d.confidence >= threshold);
            assert!(d.x1 >= 0 && (d.x1 as usize) < width);
            assert!(d.x2 >= 0 && (d.x2 as usize) < width);
            assert!(d.y1 >= 0 && (d.y1 as usize) < height);
            assert!(d.y2 >= 0 && (d.y2 as usize) < height);
        }
    }
}

#[test]
fn test_finalize_keeps_equal_to_threshold() {
    let kept = finalize(vec![Detection::new(1, 1, 5, 5, 0.5)], 0.5, 10, 10);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_finalize_clips_overhanging_box() {
    let kept = finalize(vec![Detection::new(-20, -5, 400, 300, 0.7)], 0.5, 320, 240);
    assert_eq!(kept, vec![Detection::new(0, 0, 319, 239, 0.7)]);
}

#[test]
fn test_finalize_drops_box_outside_frame() {
    let kept = finalize(
        vec![
            Detection::new(-80, -60, -10, -5, 0.95),
            Detection::new(500, 10, 600, 20, 0.9),
            Detection::new(10, 300, 40, 400, 0.9),
            Detection::new(50, 50, 40, 60, 0.9),
            Detection::new(12, 12, 30, 40, 0.9),
        ],
        0.1,
        320,
        240,
    );
    assert_eq!(kept, vec![Detection::new(12, 12, 30, 40, 0.9)]);
}

#[test]
fn test_clipped_drops_zero_area() {
    assert_eq!(Detection::new(5, 5, 5, 20, 0.9).clipped(100, 100), None);
    assert_eq!(Detection::new(5, 5, 20, 5, 0.9).clipped(100, 100), None);
    assert_eq!(
        Detection::new(5, 5, 6, 6, 0.9).clipped(100, 100),
        Some(Detection::new(5, 5, 6, 6, 0.9))
    );
}

#[test]
fn test_finalize_preserves_order() {
    let kept = finalize(
        vec![
            Detection::new(1, 1, 2, 2, 0.6),
            Detection::new(3, 3, 4, 4, 0.9),
        ],
        0.5,
        10,
        10,
    );
    assert_eq!(kept[0].confidence, 0.6);
    assert_eq!(kept[1].confidence, 0.9);
}

#[test]
fn test_clipped_empty_frame() {
    assert_eq!(Detection::new(0, 0, 1, 1, 1.0).clipped(0, 10), None);
}

#[test]
fn test_detection_size() {
    let d = Detection::new(10, 20, 40, 80, 0.9);
    assert_eq!(d.width(), 30);
    assert_eq!(d.height(), 60);
}
