//! Deepest directory shared by a set of input paths.

use crate::utils::resolve_path;
use std::env;
use std::path::{Component, Path, PathBuf};

/// Computes the directory that anchors gitignore rules and the rendered tree.
///
/// * no paths: the current working directory;
/// * one path: the path itself if it is a directory, otherwise its parent;
/// * several paths: the longest run of leading components shared by all,
///   stepping up to the parent when that run is itself a file.
///
/// Components are compared as exact strings, so `C:` and `c:` differ even on
/// case-insensitive filesystems. Drive and UNC prefixes are compared as single
/// units; inputs with nothing in common (different drives or UNC shares)
/// produce an empty path.
pub fn common_ancestor<P: AsRef<Path>>(paths: &[P]) -> PathBuf {
    match paths {
        [] => env::current_dir().unwrap_or_default(),
        [single] => single_ancestor(&resolve(single.as_ref())),
        _ => {
            let resolved: Vec<PathBuf> = paths.iter().map(|p| resolve(p.as_ref())).collect();
            let common = shared_prefix(&resolved);
            // Identical file inputs share their full path; anchor at the directory.
            if resolved.contains(&common) {
                single_ancestor(&common)
            } else {
                common
            }
        }
    }
}

fn resolve(path: &Path) -> PathBuf {
    resolve_path(path).unwrap_or_else(|_| path.to_path_buf())
}

fn single_ancestor(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => path.to_path_buf(),
    }
}

fn shared_prefix(paths: &[PathBuf]) -> PathBuf {
    let split: Vec<Vec<Component<'_>>> = paths.iter().map(|p| p.components().collect()).collect();
    let shortest = split.iter().map(Vec::len).min().unwrap_or(0);
    let mut common = PathBuf::new();
    for depth in 0..shortest {
        let segment = split[0][depth].as_os_str();
        if split.iter().any(|parts| parts[depth].as_os_str() != segment) {
            break;
        }
        common.push(segment);
    }
    common
}
