use thiserror::Error;

/// Errors that can occur while loading a source image.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
}

/// Errors that can occur while exporting a board snapshot.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("snapshot region is empty")]
    EmptyRegion,
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}
