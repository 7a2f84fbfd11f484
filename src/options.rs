use serde::{Deserialize, Serialize};

/// Number of paths processed at once when no explicit limit is given.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Dot-inclusive extensions a file must carry to be emitted; empty allows all.
    pub extensions: Vec<String>,
    pub include_hidden: bool,
    pub include_binary: bool,
    /// Globs matched against the path relative to the base directory.
    pub ignore_patterns: Vec<String>,
    /// When set, `ignore_patterns` never prune a directory, only files inside it.
    pub ignore_files_only: bool,
    pub respect_gitignore: bool,
    pub concurrency: usize,
    /// Render a directory tree before the file contents.
    pub tree: bool,
}
impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            include_hidden: false,
            include_binary: false,
            ignore_patterns: Vec::new(),
            ignore_files_only: false,
            respect_gitignore: true,
            concurrency: DEFAULT_CONCURRENCY,
            tree: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct TraversalBuilder {
    options: TraversalOptions,
}
impl TraversalBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn include_binary(mut self, yes: bool) -> Self {
        self.options.include_binary = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn ignore_files_only(mut self, yes: bool) -> Self {
        self.options.ignore_files_only = yes;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.options.concurrency = limit;
        self
    }
    pub fn tree(mut self, yes: bool) -> Self {
        self.options.tree = yes;
        self
    }
    pub fn build(mut self) -> TraversalOptions {
        self.options.extensions = normalize_extensions(self.options.extensions);
        self.options.concurrency = self.options.concurrency.max(1);
        self.options
    }
}

/// Turns `rs` and `.rs` alike into `.rs`, dropping blanks. Case is preserved.
pub fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|ext| ext.trim().to_string())
        .filter(|ext| !ext.is_empty() && ext != ".")
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}
