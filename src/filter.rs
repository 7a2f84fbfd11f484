//! The ordered filter chain shared by the tree builder and the traversal engine.
//!
//! Every entry passes through the same stages in the same order:
//! hidden, gitignore, custom pattern, then (files only) binary and extension.

use crate::binary::is_binary_path;
use crate::error::{FilesToPromptError, Result};
use crate::ignore_rules::IgnoreRules;
use crate::options::TraversalOptions;
use crate::utils::{relative_path, slash_string};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Why an entry was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Admit,
    Hidden,
    GitIgnored,
    Pattern,
    Binary,
    Extension,
}
impl Verdict {
    pub fn is_admitted(self) -> bool {
        self == Verdict::Admit
    }
    /// Exclusions that count towards the skipped-files statistic. Hidden and
    /// gitignored entries are dropped before statistics are kept.
    pub fn is_counted(self) -> bool {
        matches!(self, Verdict::Pattern | Verdict::Binary | Verdict::Extension)
    }
}

#[derive(Debug)]
pub struct FilterChain {
    base: PathBuf,
    rules: IgnoreRules,
    patterns: Option<GlobSet>,
    extensions: Vec<String>,
    include_hidden: bool,
    include_binary: bool,
    ignore_files_only: bool,
}
impl FilterChain {
    pub fn new(
        options: &TraversalOptions,
        rules: IgnoreRules,
        base: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            base: base.into(),
            rules,
            patterns: compile_patterns(&options.ignore_patterns)?,
            extensions: options.extensions.clone(),
            include_hidden: options.include_hidden,
            include_binary: options.include_binary,
            ignore_files_only: options.ignore_files_only,
        })
    }
    pub fn relative(&self, path: &Path) -> PathBuf {
        relative_path(path, &self.base)
    }
    /// Hidden and gitignore stages, applied to files and directories alike.
    fn check_common(&self, path: &Path, relative: &Path, is_dir: bool) -> Verdict {
        if !self.include_hidden && is_hidden(path) {
            return Verdict::Hidden;
        }
        if self.rules.ignores(relative, is_dir) {
            return Verdict::GitIgnored;
        }
        Verdict::Admit
    }
    /// Whether a directory should be descended into.
    pub fn check_directory(&self, path: &Path) -> Verdict {
        let relative = self.relative(path);
        let verdict = self.check_common(path, &relative, true);
        if !verdict.is_admitted() {
            return verdict;
        }
        if !self.ignore_files_only && self.matches_pattern(&relative) {
            return Verdict::Pattern;
        }
        Verdict::Admit
    }
    /// Whether a file should be emitted.
    pub fn check_file(&self, path: &Path) -> Verdict {
        let relative = self.relative(path);
        let verdict = self.check_common(path, &relative, false);
        if !verdict.is_admitted() {
            return verdict;
        }
        if self.matches_pattern(&relative) {
            return Verdict::Pattern;
        }
        if !self.include_binary && is_binary_path(path) {
            return Verdict::Binary;
        }
        if !self.extensions.is_empty() && !self.extension_allowed(path) {
            return Verdict::Extension;
        }
        Verdict::Admit
    }
    fn matches_pattern(&self, relative: &Path) -> bool {
        let Some(patterns) = &self.patterns else {
            return false;
        };
        let candidate = slash_string(relative);
        if candidate.is_empty() {
            patterns.is_match(".")
        } else {
            patterns.is_match(candidate.as_str())
        }
    }
    fn extension_allowed(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext);
        self.extensions.iter().any(|allowed| *allowed == dotted)
    }
}

/// Base name starts with `.`.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn compile_patterns(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| FilesToPromptError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|source| FilesToPromptError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;
    Ok(Some(set))
}
