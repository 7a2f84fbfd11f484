//! Extension-based binary file classification.

use std::path::Path;

const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "ico", "icns", "webp", "avif", "heic",
    "heif", "psd", "raw", "cr2", "nef",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "lz", "lzma", "zst", "7z", "rar", "jar", "war",
    "ear", "apk", "cab",
    // executables and objects
    "exe", "dll", "so", "dylib", "bin", "o", "a", "lib", "obj", "class", "pyc", "pyo", "wasm",
    "elf", "com", "msi", "deb", "rpm",
    // audio and video
    "mp3", "wav", "flac", "ogg", "aac", "m4a", "wma", "mp4", "m4v", "mov", "avi", "mkv", "webm",
    "wmv", "flv", "mpg", "mpeg",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf", "epub",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // databases
    "db", "sqlite", "sqlite3", "mdb", "accdb", "dbf",
    // disk images
    "iso", "img", "dmg", "vmdk", "vdi", "qcow2",
];

/// Whether the file's lower-cased extension is on the binary denylist.
pub fn is_binary_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| is_binary_extension(&ext.to_ascii_lowercase()))
        .unwrap_or(false)
}

/// `ext` is expected without the leading dot and already lower-cased.
pub fn is_binary_extension(ext: &str) -> bool {
    BINARY_EXTENSIONS.contains(&ext)
}
