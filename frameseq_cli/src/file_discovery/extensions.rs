//! Default sequence extensions
//!
//! Image formats that are commonly written as numbered frame sequences.
//! Only files with one of these extensions are grouped unless the caller
//! supplies its own list or disables the defaults.

/// Extensions grouped into sequences by default
pub const DEFAULT_SEQUENCE_EXTENSIONS: &[&str] = &[
    // Film and VFX
    "exr", "dpx", "cin", "hdr",
    // Still image
    "tif", "tiff", "png", "jpg", "jpeg", "tga", "bmp", "gif", "webp",
    // Legacy and application formats
    "sgi", "rgb", "rgba", "iff", "ppm", "pic", "psd", "rla", "rpf",
];

/// Lower-case an extension and make sure it carries its leading dot
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.starts_with('.') {
        trimmed.to_lowercase()
    } else {
        format!(".{}", trimmed.to_lowercase())
    }
}

/// Convert bare extensions to the dotted form the listing options expect
pub fn dotted_extensions(extensions: &[&str]) -> Vec<String> {
    extensions.iter().map(|ext| normalize_extension(ext)).collect()
}
