use espcam_base::Tensor;
use espcam_detect::Detection;
use espcam_view::overlay::{BOX_COLOR, FPS_COLOR, label_baseline};
use espcam_view::{FpsMeter, annotate, draw_fps, label_for};
use std::time::{Duration, Instant};

fn frame(width: usize, height: usize) -> Tensor<u8> {
    Tensor::zeros(vec![height, width, 3]).unwrap()
}

fn pixel(frame: &Tensor<u8>, x: usize, y: usize) -> [u8; 3] {
    let width = frame.shape[1];
    let i = (y * width + x) * 3;
    [frame.data[i], frame.data[i + 1], frame.data[i + 2]]
}

#[test]
fn test_label_for() {
    assert_eq!(label_for(&Detection::new(0, 0, 1, 1, 0.873)), "87.3%");
    assert_eq!(label_for(&Detection::new(0, 0, 1, 1, 1.0)), "100.0%");
    assert_eq!(label_for(&Detection::new(0, 0, 1, 1, 0.5)), "50.0%");
}

#[test]
fn test_label_baseline_above_or_inside() {
    assert_eq!(label_baseline(&Detection::new(0, 100, 10, 150, 0.9)), 90);
    assert_eq!(label_baseline(&Detection::new(0, 21, 10, 150, 0.9)), 11);
    assert_eq!(label_baseline(&Detection::new(0, 20, 10, 150, 0.9)), 30);
    assert_eq!(label_baseline(&Detection::new(0, 0, 10, 150, 0.9)), 10);
}

#[test]
fn test_annotate_draws_boxes() {
    let mut img = frame(100, 80);
    annotate(&mut img, &[Detection::new(20, 30, 60, 70, 0.9)]);

    assert_eq!(pixel(&img, 20, 30), BOX_COLOR);
    assert_eq!(pixel(&img, 60, 70), BOX_COLOR);
    assert_eq!(pixel(&img, 21, 50), BOX_COLOR);
    assert_eq!(pixel(&img, 40, 50), [0, 0, 0]);
}

#[test]
fn test_annotate_without_detections_is_noop() {
    let mut img = frame(16, 16);
    annotate(&mut img, &[]);
    assert!(img.data.iter().all(|&v| v == 0));
}

#[test]
fn test_annotate_ignores_non_rgb() {
    let mut gray = Tensor::<u8>::zeros(vec![8, 8]).unwrap();
    annotate(&mut gray, &[Detection::new(0, 0, 7, 7, 0.9)]);
    assert!(gray.data.iter().all(|&v| v == 0));
}

#[test]
fn test_draw_fps_top_left() {
    let mut img = frame(160, 120);
    draw_fps(&mut img, 12.5);

    let mut found = false;
    for y in 0..30 {
        for x in 0..160 {
            if pixel(&img, x, y) == FPS_COLOR {
                found = true;
                assert!(y >= 6 && y < 20 && x >= 10);
            }
        }
    }
    assert!(found);
}

#[test]
fn test_fps_meter_updates_every_window() {
    let start = Instant::now();
    let mut meter = FpsMeter::starting_at(10, start);

    for i in 1..10 {
        assert_eq!(meter.tick_at(start + Duration::from_millis(50 * i)), None);
    }
    assert_eq!(meter.current(), None);

    let fps = meter.tick_at(start + Duration::from_millis(500)).unwrap();
    assert!((fps - 20.0).abs() < 0.01);
    assert_eq!(meter.current(), Some(fps));
    assert_eq!(meter.frames(), 10);

    for i in 1..10 {
        assert_eq!(meter.tick_at(start + Duration::from_millis(500 + 100 * i)), None);
    }
    assert_eq!(meter.current(), Some(fps));
    let fps = meter.tick_at(start + Duration::from_millis(1500)).unwrap();
    assert!((fps - 10.0).abs() < 0.01);
    assert_eq!(meter.frames(), 20);
}
