//! Path helpers, byte formatting and the standard-input path reader.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::io::{self, BufRead, Read};
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute and removes `.`/`..` components, duplicate and
/// trailing separators, without touching the filesystem.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

/// `path` relative to `base`, joined with `/`. The base itself is `""`;
/// a path outside `base` comes back unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Joins the normal components of `path` with `/`, the form globs and the
/// tree renderer work on on every platform.
pub fn slash_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Format a human-readable byte count.
pub fn format_bytes(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Reads input paths, one per line or NUL-separated. Blank entries are skipped.
pub fn read_paths<R: Read>(reader: R, null_separated: bool) -> io::Result<Vec<PathBuf>> {
    let mut reader = io::BufReader::new(reader);
    let mut paths = Vec::new();
    if null_separated {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        for chunk in buf.split(|b| *b == 0) {
            let entry = String::from_utf8_lossy(chunk);
            let entry = entry.trim_matches(['\n', '\r']);
            if !entry.is_empty() {
                paths.push(PathBuf::from(entry));
            }
        }
    } else {
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let entry = line.trim();
            if !entry.is_empty() {
                paths.push(PathBuf::from(entry));
            }
            line.clear();
        }
    }
    Ok(paths)
}

/// Orders directory entry names case-insensitively first, then by exact
/// spelling, so listings come out the same on every filesystem.
pub fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    let a = a.to_string_lossy();
    let b = b.to_string_lossy();
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}
