//! Image generation and media storage integrations

pub mod clipdrop;
pub mod cloudinary;
pub mod types;

pub use clipdrop::ClipdropClient;
pub use cloudinary::CloudinaryClient;
pub use types::{ImageGenerator, MediaError, MediaSource, MediaStore, UploadedMedia};
