//! Builds the directory tree preview shown before file contents.

use crate::engine::descend;
use crate::filter::FilterChain;
use crate::utils::slash_string;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Renders the files under `paths` that survive `filters` as a tree rooted at
/// the filter chain's base directory.
///
/// The walk is sequential and the result is sorted by relative path, so the
/// output does not depend on directory listing order. Entries that cannot be
/// read are left out; rendering never fails. Directories without any admitted
/// file do not appear.
///
/// ```text
/// .
/// ├── Cargo.toml
/// └── src
///     └── lib.rs
/// ```
pub fn build_tree<P: AsRef<Path>>(paths: &[P], filters: &FilterChain) -> String {
    let mut admitted = HashSet::new();
    for path in paths {
        collect(path.as_ref(), filters, &[], &mut admitted);
    }

    let mut relative: Vec<String> = admitted
        .iter()
        .map(|path| slash_string(&filters.relative(path)))
        .filter(|rel| !rel.is_empty())
        .collect();
    relative.sort();
    relative.dedup();

    let mut root = TreeNode::default();
    for rel in &relative {
        root.insert(rel.split('/'));
    }

    let mut lines = vec![".".to_string()];
    root.render("", &mut lines);
    lines.join("\n")
}

fn collect(
    path: &Path,
    filters: &FilterChain,
    ancestry: &[PathBuf],
    admitted: &mut HashSet<PathBuf>,
) {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("Tree: cannot access {}: {}", path.display(), e);
            return;
        }
    };
    if metadata.is_dir() {
        if !filters.check_directory(path).is_admitted() {
            return;
        }
        let Some(ancestry) = descend(path, ancestry) else {
            debug!("Tree: not following link cycle at {}", path.display());
            return;
        };
        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(e) => {
                debug!("Tree: cannot list {}: {}", path.display(), e);
                return;
            }
        };
        for entry in reader.flatten() {
            collect(&entry.path(), filters, &ancestry, admitted);
        }
    } else if metadata.is_file() && filters.check_file(path).is_admitted() {
        admitted.insert(path.to_path_buf());
    }
}

/// Children keep insertion order, which is sorted-path order.
#[derive(Debug, Default)]
struct TreeNode {
    children: Vec<(String, TreeNode)>,
}
impl TreeNode {
    fn insert<'s>(&mut self, mut segments: impl Iterator<Item = &'s str>) {
        let Some(first) = segments.next() else {
            return;
        };
        self.child_mut(first).insert(segments);
    }
    fn child_mut(&mut self, name: &str) -> &mut TreeNode {
        let index = match self.children.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.children.push((name.to_string(), TreeNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }
    fn render(&self, prefix: &str, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, (name, child)) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            let connector = if last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, connector, name));
            let extension = if last { "    " } else { "│   " };
            child.render(&format!("{}{}", prefix, extension), lines);
        }
    }
}
