pub mod error;

pub use error::PreprocessError;

use fast_image_resize::{
    PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use ndarray::Array4;
use std::path::Path;

pub const INPUT_WIDTH: u32 = 224;
pub const INPUT_HEIGHT: u32 = 224;
pub const INPUT_CHANNELS: usize = 3;

/// Classifier input tensor of shape `[1, 224, 224, 3]` (NHWC, RGB).
///
/// Values are raw pixel intensities in `0.0..=255.0` — the models were
/// trained on unscaled Keras image arrays, so no mean subtraction or
/// `1/255` scaling is applied.
///
/// Only this crate can construct an `ImageTensor`, so one that exists
/// always has the shape every classifier in the registry expects.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor(Array4<f32>);

impl ImageTensor {
    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }
}

/// Decode an image file and normalize it to the classifier input tensor.
///
/// Arbitrary source resolutions are stretch-resized to 224x224 with
/// nearest-neighbor interpolation, matching the resize the models saw at
/// training time. The file is only read, never modified.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageTensor, PreprocessError> {
    let path = path.as_ref();

    let decoded = image::open(path).map_err(|source| PreprocessError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    tracing::trace!(
        path = %path.display(),
        width,
        height,
        "Decoded source image"
    );

    let resized = resize_to_input(rgb.as_raw(), width, height)?;
    Ok(ImageTensor(tensor_from_input_buffer(&resized)))
}

/// Build the input tensor from an in-memory RGB8 buffer.
///
/// The buffer must already be exactly 224x224 with a consistent byte
/// length; no resizing happens on this path.
pub fn tensor_from_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<ImageTensor, PreprocessError> {
    let expected_len = INPUT_WIDTH as usize * INPUT_HEIGHT as usize * INPUT_CHANNELS;

    if width != INPUT_WIDTH || height != INPUT_HEIGHT || pixels.len() != expected_len {
        return Err(PreprocessError::InvalidInputShape {
            width,
            height,
            byte_len: pixels.len(),
        });
    }

    Ok(ImageTensor(tensor_from_input_buffer(pixels)))
}

fn resize_to_input(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PreprocessError> {
    if width == INPUT_WIDTH && height == INPUT_HEIGHT {
        return Ok(pixels.to_vec());
    }

    let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;
    let mut dst = Image::new(INPUT_WIDTH, INPUT_HEIGHT, PixelType::U8x3);

    Resizer::new().resize(
        &src,
        &mut dst,
        &ResizeOptions::new().resize_alg(ResizeAlg::Nearest),
    )?;

    Ok(dst.buffer().to_vec())
}

fn tensor_from_input_buffer(pixels: &[u8]) -> Array4<f32> {
    let width = INPUT_WIDTH as usize;
    let height = INPUT_HEIGHT as usize;

    let mut tensor = Array4::<f32>::zeros((1, height, width, INPUT_CHANNELS));
    for (i, px) in pixels.chunks_exact(INPUT_CHANNELS).enumerate() {
        let y = i / width;
        let x = i % width;
        tensor[[0, y, x, 0]] = px[0] as f32;
        tensor[[0, y, x, 1]] = px[1] as f32;
        tensor[[0, y, x, 2]] = px[2] as f32;
    }

    tensor
}
