use std::str::FromStr;
use crate::utils::ValidationError;

/// Image formats the service can write.
///
/// Input decoding is left entirely to libvips; this enum only covers the
/// encoders wired up in `processing::libvips::formats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    AVIF,
    TIFF,
}

impl ImageFormat {
    /// Quality used when a format is written without an explicit quality.
    pub fn default_quality(&self) -> u8 {
        match self {
            Self::JPEG => 85,
            Self::PNG => 100,  // PNG is written lossless unless asked otherwise
            Self::WebP => 80,
            Self::AVIF => 70,
            Self::TIFF => 90,
        }
    }

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
            Self::AVIF => &["avif"],
            Self::TIFF => &["tiff", "tif"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Detects the container format from the leading magic bytes.
    ///
    /// Returns `None` for anything that is not one of the writable formats,
    /// including formats libvips could still decode (GIF, HEIC, ...).
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::JPEG),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::PNG),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::WebP),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::TIFF),
            [_, _, _, _, b'f', b't', b'y', b'p', brand @ ..] if brand.len() >= 4 => {
                match &brand[..4] {
                    b"avif" | b"avis" => Some(Self::AVIF),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::JPEG => "jpeg",
            Self::PNG => "png",
            Self::WebP => "webp",
            Self::AVIF => "avif",
            Self::TIFF => "tiff",
        };
        f.write_str(name)
    }
}

impl FromStr for ImageFormat {
    type Err = ValidationError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.trim().to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            "avif" => Ok(Self::AVIF),
            "tif" | "tiff" => Ok(Self::TIFF),
            _ => Err(ValidationError::invalid(
                "format",
                format!("unsupported output format '{ext}'"),
            )),
        }
    }
}
