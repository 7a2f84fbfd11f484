//! `.gitignore` rules anchored at the base directory.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// A gitignore matcher that never fails.
///
/// Paths are given relative to the base directory. Anything that cannot be
/// expressed relative to it (absolute paths, paths escaping through `..`, the
/// base itself) is answered with "not ignored" before it reaches the matcher.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    matcher: Option<Gitignore>,
}
impl IgnoreRules {
    /// A rule set that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads `<base>/.gitignore`. A missing or unreadable file yields an empty set.
    pub fn load(base: &Path) -> Self {
        let gitignore = base.join(".gitignore");
        match fs::read_to_string(&gitignore) {
            Ok(text) => Self::from_lines(base, text.lines()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No .gitignore at {}", gitignore.display());
                Self::empty()
            }
            Err(e) => {
                warn!("Could not read {}: {}", gitignore.display(), e);
                Self::empty()
            }
        }
    }

    /// Builds a rule set from raw gitignore lines. Blank lines and `#`
    /// comments are dropped; a line the matcher rejects is skipped.
    pub fn from_lines<I, S>(base: &Path, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(base);
        let mut added = 0usize;
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match builder.add_line(None, line) {
                Ok(_) => added += 1,
                Err(e) => warn!("Skipping gitignore rule '{}': {}", line, e),
            }
        }
        if added == 0 {
            return Self::empty();
        }
        match builder.build() {
            Ok(matcher) => {
                debug!("Loaded {} gitignore rules for {}", added, base.display());
                Self {
                    matcher: Some(matcher),
                }
            }
            Err(e) => {
                warn!("Failed to build gitignore rules: {}. Ignoring nothing.", e);
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.as_ref().is_none_or(|m| m.is_empty())
    }

    /// Whether `relative` (a path below the base) is excluded.
    pub fn ignores(&self, relative: &Path, is_dir: bool) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        if !is_below_base(relative) {
            return false;
        }
        matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

fn is_below_base(relative: &Path) -> bool {
    let mut components = relative.components().peekable();
    if components.peek().is_none() {
        return false;
    }
    components.all(|c| matches!(c, Component::Normal(_)))
}
