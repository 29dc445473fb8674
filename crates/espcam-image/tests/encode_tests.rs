use espcam_base::Tensor;
use espcam_image::{ImageError, decode_frame, encode_jpeg, save_jpeg};

fn gradient(width: usize, height: usize) -> Tensor<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128]);
        }
    }
    Tensor::new(vec![height, width, 3], data).unwrap()
}

#[test]
fn test_encode_produces_jpeg_markers() {
    let jpeg = encode_jpeg(&gradient(16, 8), 90).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);

    let decoded = decode_frame(&jpeg).unwrap();
    assert_eq!(decoded.shape, vec![8, 16, 3]);
}

#[test]
fn test_encode_rejects_non_rgb() {
    let gray = Tensor::new(vec![2, 2, 1], vec![0u8; 4]).unwrap();
    match encode_jpeg(&gray, 90) {
        Err(ImageError::NotRgb(shape)) => assert_eq!(shape, vec![2, 2, 1]),
        other => panic!("expected NotRgb, got {other:?}"),
    }
}

#[test]
fn test_save_jpeg_creates_directories() {
    let dir = std::env::temp_dir().join(format!("espcam-image-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("captures").join("frame_1.jpg");

    save_jpeg(&gradient(4, 4), &path, 80).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(&written[..2], &[0xFF, 0xD8]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_error_display() {
    let err = ImageError::Decode("bad huffman table".to_string());
    assert_eq!(err.to_string(), "not a decodable JPEG: bad huffman table");
}

#[test]
fn test_save_jpeg_reports_path() {
    let blocker = std::env::temp_dir().join(format!("espcam-image-blocker-{}", std::process::id()));
    std::fs::write(&blocker, b"file, not a directory").unwrap();
    let path = blocker.join("frame.jpg");

    match save_jpeg(&gradient(4, 4), &path, 80) {
        Err(ImageError::Write { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected Write error, got {other:?}"),
    }
    std::fs::remove_file(&blocker).ok();
}
