use clap::Parser;
use crates_image::ImageEncoder;
use espcam::capture::{run_capture, run_raw};
use espcam::{Cli, Pipeline};
use espcam_base::Shutdown;
use espcam_detect::Detector;
use espcam_publish::Publisher;
use espcam_stream::StreamConfig;
use espcam_view::Viewer;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::timeout;

fn test_jpeg() -> Vec<u8> {
    let img = crates_image::RgbImage::from_fn(16, 12, |x, y| {
        crates_image::Rgb([(x * 15) as u8, (y * 20) as u8, 128])
    });
    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();
    buffer
}

/// Answer one HTTP request with `status` and `body`; returns `host:port`.
async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.ok();
    });

    addr.to_string()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("espcam-{name}-{}", std::process::id()))
}

#[tokio::test]
async fn test_raw_download_is_byte_exact() {
    let body = b"not even a jpeg, saved as is".to_vec();
    let addr = serve_once("200 OK", body.clone()).await;
    let out = temp_path("raw.jpg");

    timeout(Duration::from_secs(5), run_raw(&StreamConfig::new(addr), &out))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), body);
    let _ = std::fs::remove_file(&out);
}

#[tokio::test]
async fn test_raw_download_error_status() {
    let addr = serve_once("404 Not Found", Vec::new()).await;
    let out = temp_path("raw-missing.jpg");
    let _ = std::fs::remove_file(&out);

    let result = timeout(Duration::from_secs(5), run_raw(&StreamConfig::new(addr), &out))
        .await
        .unwrap();
    assert!(result.is_err());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_capture_mode_saves_annotated_snapshot() {
    let addr = serve_once("200 OK", test_jpeg()).await;
    let outdir = temp_path("capture-dir");
    let _ = std::fs::remove_dir_all(&outdir);

    let mut pipeline = Pipeline::new(
        addr.clone(),
        Detector::Disabled,
        0.5,
        Publisher::Disabled,
        Viewer::new("test", true),
        outdir.clone(),
    );
    let path = timeout(
        Duration::from_secs(5),
        run_capture(&StreamConfig::new(addr), &mut pipeline, &Shutdown::new()),
    )
    .await
    .unwrap()
    .unwrap();

    let saved = espcam_image::decode_frame(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(saved.shape, vec![12, 16, 3]);
    pipeline.close().await;
    let _ = std::fs::remove_dir_all(&outdir);
}

#[tokio::test]
async fn test_capture_mode_rejects_undecodable_snapshot() {
    let addr = serve_once("200 OK", b"garbage".to_vec()).await;
    let mut pipeline = Pipeline::new(
        addr.clone(),
        Detector::Disabled,
        0.5,
        Publisher::Disabled,
        Viewer::new("test", true),
        temp_path("capture-bad"),
    );
    let result = timeout(
        Duration::from_secs(5),
        run_capture(&StreamConfig::new(addr), &mut pipeline, &Shutdown::new()),
    )
    .await
    .unwrap();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_app_raw_mode_end_to_end() {
    let body = test_jpeg();
    let addr = serve_once("200 OK", body.clone()).await;
    let out = temp_path("app-raw.jpg");
    let out_arg = out.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["espcam", "--ip", &addr, "--raw", "--out", &out_arg]).unwrap();
    timeout(Duration::from_secs(5), espcam::app::run(&cli.run, &Shutdown::new()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), body);
    let _ = std::fs::remove_file(&out);
}
