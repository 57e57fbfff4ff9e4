use std::path::PathBuf;

pub mod assets;
pub mod decode;
pub mod exif;
pub mod settings;
pub mod thumbnail;

pub use assets::{build_assets, AssetLayout, BuildReport, BuildWarning};
pub use decode::{apply_orientation, decode_oriented, DecodedImage};
pub use settings::{PipelineSettings, ThumbSpec};
pub use thumbnail::{cover_square, encode_avif, render_thumbnail, Thumbnail};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("image encode failed: {0}")]
    Encode(String),
    #[error("color profile error: {0}")]
    Profile(String),
    #[error("color transform failed: {0}")]
    Transform(String),
    #[error("invalid pipeline settings: {0}")]
    Config(String),
    #[error("invalid image dimensions")]
    Dimensions,
}
