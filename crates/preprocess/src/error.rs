use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    /// In-memory input must already match the classifier input resolution.
    #[error("invalid input shape: got {width}x{height} ({byte_len} bytes), expected 224x224 RGB")]
    InvalidInputShape {
        width: u32,
        height: u32,
        byte_len: usize,
    },

    #[error("failed to read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to resize image: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),

    #[error("invalid image buffer: {0}")]
    ResizeBuffer(#[from] fast_image_resize::ImageBufferError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_display_names_dimensions() {
        let err = PreprocessError::InvalidInputShape {
            width: 100,
            height: 80,
            byte_len: 24_000,
        };
        assert_eq!(
            err.to_string(),
            "invalid input shape: got 100x80 (24000 bytes), expected 224x224 RGB",
            "InvalidInputShape should report offending and expected dimensions"
        );
    }
}
