use crate::{DetectError, Detection};
use espcam_base::Tensor;
use ndarray::{Array4, ArrayViewD};
use ort::{inputs, session::Session, value::TensorRef};
use std::path::Path;

/// Network input edge length.
pub const INPUT_SIZE: usize = 300;

/// Per-channel mean subtracted from the BGR input.
pub const MEAN_BGR: [f32; 3] = [104.0, 177.0, 123.0];

// (image_id, label, confidence, x1, y1, x2, y2)
const ROW_LEN: usize = 7;

/// Single-shot SSD face detector (res10, 300x300) on ONNX Runtime.
pub struct SsdFaceDetector {
    session: Session,
}

impl SsdFaceDetector {
    /// Load the model from an ONNX file.
    ///
    /// # Errors
    ///
    /// `DetectError::ModelMissing` if the file does not exist,
    /// `DetectError::ModelLoad` if ONNX Runtime rejects it.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        if !path.is_file() {
            return Err(DetectError::ModelMissing(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| DetectError::ModelLoad(format!("failed to create session builder: {e}")))?
            .commit_from_file(path)
            .map_err(|e| {
                DetectError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?;

        Ok(Self { session })
    }

    /// Run the network and return every candidate box, unfiltered, scaled
    /// to the frame size.
    pub fn detect(&mut self, frame: &Tensor<u8>) -> Result<Vec<Detection>, DetectError> {
        let (height, width, _) = frame_dims(frame)?;
        let blob = preprocess(frame)?;

        let input = TensorRef::from_array_view(blob.view())?;
        let outputs = self.session.run(inputs![input])?;
        let raw = outputs[0].try_extract_array::<f32>()?;

        let output = ndarray_to_tensor(raw)?;
        postprocess(&output, width, height)
    }
}

fn frame_dims(frame: &Tensor<u8>) -> Result<(usize, usize, usize), DetectError> {
    match frame.hwc() {
        Some((h, w, 3)) if h > 0 && w > 0 => Ok((h, w, 3)),
        _ => Err(DetectError::Shape(format!(
            "expected [H, W, 3] frame, got {:?}",
            frame.shape
        ))),
    }
}

/// Build the `[1, 3, 300, 300]` network input from an RGB frame.
///
/// Nearest-neighbour resize, channels reordered to BGR, mean subtracted,
/// no scaling.
pub fn preprocess(frame: &Tensor<u8>) -> Result<Array4<f32>, DetectError> {
    let (h, w, _) = frame_dims(frame)?;
    let mut blob = Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for out_y in 0..INPUT_SIZE {
        let src_y = (out_y * h / INPUT_SIZE).min(h - 1);
        for out_x in 0..INPUT_SIZE {
            let src_x = (out_x * w / INPUT_SIZE).min(w - 1);
            let idx = (src_y * w + src_x) * 3;
            let (r, g, b) = (frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]);

            blob[[0, 0, out_y, out_x]] = b as f32 - MEAN_BGR[0];
            blob[[0, 1, out_y, out_x]] = g as f32 - MEAN_BGR[1];
            blob[[0, 2, out_y, out_x]] = r as f32 - MEAN_BGR[2];
        }
    }

    Ok(blob)
}

/// Convert the `[1, 1, N, 7]` detection output into pixel boxes.
///
/// Coordinates are normalized in the output and truncated after scaling.
pub fn postprocess(
    output: &Tensor<f32>,
    width: usize,
    height: usize,
) -> Result<Vec<Detection>, DetectError> {
    if output.shape.last() != Some(&ROW_LEN) {
        return Err(DetectError::Shape(format!(
            "expected [1, 1, N, {ROW_LEN}] output, got {:?}",
            output.shape
        )));
    }

    let (w, h) = (width as f32, height as f32);
    Ok(output
        .data
        .chunks_exact(ROW_LEN)
        .map(|row| {
            Detection::new(
                (row[3] * w) as i32,
                (row[4] * h) as i32,
                (row[5] * w) as i32,
                (row[6] * h) as i32,
                row[2],
            )
        })
        .collect())
}

fn ndarray_to_tensor(array: ArrayViewD<'_, f32>) -> Result<Tensor<f32>, DetectError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
