//! Output naming rules for transformed files.
//!
//! Names are computed from the client-supplied file name only; the bytes
//! are never consulted except to pick an extension when the name has none.

/// Name used for a part that arrives without a usable file name.
pub const UNNAMED_FILE: &str = "file";

/// Strips any directory components a client may have put in the name.
///
/// Archive entries are always flat so `../x.png` cannot escape the
/// extraction directory on the client side. A name that is only a
/// directory becomes [`UNNAMED_FILE`].
pub fn file_name(declared: &str) -> &str {
    match declared.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => UNNAMED_FILE,
    }
}

/// The name up to the first `.`, or the whole name when there is none.
pub fn base_name(name: &str) -> &str {
    let name = file_name(name);
    name.split('.').next().unwrap_or(name)
}

/// The text after the last `.`, if the name has one.
pub fn original_extension(name: &str) -> Option<&str> {
    let name = file_name(name);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// `{baseName}.{targetFormat}`
pub fn converted_name(name: &str, target: &str) -> String {
    format!("{}.{}", base_name(name), target)
}

/// `{baseName}-resized.{extension}`
pub fn resized_name(name: &str, extension: &str) -> String {
    format!("{}-resized.{}", base_name(name), extension)
}

/// `compressed-{originalFullName}`
pub fn compressed_name(name: &str) -> String {
    format!("compressed-{}", file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_splits_on_first_dot() {
        assert_eq!(base_name("a.png"), "a");
        assert_eq!(base_name("archive.tar.gz"), "archive");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name(".hidden"), "");
    }

    #[test]
    fn extension_is_after_last_dot() {
        assert_eq!(original_extension("photo.jpg"), Some("jpg"));
        assert_eq!(original_extension("my.photo.JPEG"), Some("JPEG"));
        assert_eq!(original_extension("noext"), None);
    }

    #[test]
    fn directories_are_dropped() {
        assert_eq!(file_name("../../etc/a.png"), "a.png");
        assert_eq!(file_name(r"C:\Users\me\b.jpg"), "b.jpg");
        assert_eq!(compressed_name("dir/c.png"), "compressed-c.png");
    }

    #[test]
    fn directory_only_names_fall_back() {
        assert_eq!(file_name("dir/"), "file");
        assert_eq!(file_name(r"a\b\"), "file");
        assert_eq!(converted_name("uploads/", "webp"), "file.webp");
        assert_eq!(resized_name("x/", "png"), "file-resized.png");
        assert_eq!(compressed_name("dir/"), "compressed-file");
    }

    #[test]
    fn output_names() {
        assert_eq!(converted_name("a.png", "webp"), "a.webp");
        assert_eq!(converted_name("my.photo.jpg", "png"), "my.png");
        assert_eq!(resized_name("photo.jpg", "jpg"), "photo-resized.jpg");
        assert_eq!(compressed_name("a.png"), "compressed-a.png");
    }
}
