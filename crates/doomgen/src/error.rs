use thiserror::Error;

#[derive(Debug, Error)]
pub enum BannerError {
    #[error("font parse error: {0}")]
    FontParse(String),
    #[error("unknown font: {0}")]
    UnknownFont(String),
    #[error("unknown character: {0}")]
    UnknownChar(char),
    #[error("unknown palette: {0}")]
    UnknownPalette(String),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("unsupported snapshot version: {0}")]
    SnapshotVersion(u64),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("svg error: {0}")]
    Svg(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("webp encode error: {0}")]
    WebpEncode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BannerError>;
