use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("The requested image could not be found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ImageStoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageType {
    pub const ALL: [ImageType; 4] = [Self::Jpeg, Self::Png, Self::Gif, Self::Webp];

    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detects the type from the leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// Location of an image relative to the root of the image store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath {
    pub folder: String,
    pub file_name: String,
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.folder, self.file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: ImagePath,
    pub url: String,
    pub size: u64,
}

pub trait ImageGateway {
    /// URL prefix under which stored images are publicly served.
    fn public_prefix(&self) -> &str;

    fn store_image(&self, path: &ImagePath, data: &[u8]) -> Result<StoredImage>;
    fn load_image(&self, path: &ImagePath) -> Result<Vec<u8>>;
    fn list_images(&self, folder: Option<&str>) -> Result<Vec<StoredImage>>;
    fn delete_image(&self, path: &ImagePath) -> Result<()>;

    fn public_url(&self, path: &ImagePath) -> String {
        format!("{}/{}", self.public_prefix().trim_end_matches('/'), path)
    }
}
