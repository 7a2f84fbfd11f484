use crate::ancestor::common_ancestor;
use crate::error::{FilesToPromptError, Result};
use crate::filter::{FilterChain, Verdict};
use crate::ignore_rules::IgnoreRules;
use crate::limiter::{PoolReport, Spawner, WorkerPool};
use crate::options::TraversalOptions;
use crate::output::{LineSink, Printer};
use crate::tree::build_tree;
use crate::types::{RunSummary, Statistics};
use crate::utils::{compare_names, resolve_path};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, warn};
/// Walks target paths, filters every entry and prints the survivors.
///
/// Sibling entries are visited concurrently, up to the pool's limit. Entries
/// are queued in name order, but with a limit above one their content may
/// reach the sink in completion order.
pub struct Traversal<'a> {
    filters: &'a FilterChain,
    printer: &'a dyn Printer,
    sink: Mutex<&'a mut dyn LineSink>,
    stats: &'a Statistics,
    pool: WorkerPool,
}
impl<'a> Traversal<'a> {
    pub fn new(
        filters: &'a FilterChain,
        printer: &'a dyn Printer,
        sink: &'a mut dyn LineSink,
        stats: &'a Statistics,
        concurrency: usize,
    ) -> Result<Self> {
        Ok(Self {
            filters,
            printer,
            sink: Mutex::new(sink),
            stats,
            pool: WorkerPool::new(concurrency)?,
        })
    }
    /// Walks `target` and everything below it. Per-path failures are logged
    /// and never abort the walk; this returns once the whole subtree settled.
    pub fn traverse(&self, target: &Path) -> PoolReport {
        debug!("Traversing {}", target.display());
        let seed = Visit {
            path: target.to_path_buf(),
            ancestry: Arc::default(),
        };
        self.pool
            .run(vec![seed], |visit, spawner| self.visit(visit, spawner))
    }
    fn visit(&self, visit: Visit, spawner: &Spawner<'_, Visit>) {
        let path = visit.path.as_path();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                error!("Cannot access {}: {}", path.display(), e);
                return;
            }
        };
        if metadata.is_dir() {
            self.visit_directory(path, &visit.ancestry, spawner);
        } else if metadata.is_file() {
            self.visit_file(path);
        } else {
            debug!("Skipping {}: not a regular file or directory", path.display());
        }
    }
    fn visit_file(&self, path: &Path) {
        let verdict = self.filters.check_file(path);
        if !verdict.is_admitted() {
            debug!("Skipping file {}: {:?}", path.display(), verdict);
            if verdict.is_counted() {
                self.stats.record_skipped();
            }
            return;
        }
        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return;
            }
        };
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.printer.print(&mut **sink, path, &content) {
            error!("Failed to write {}: {}", path.display(), e);
            return;
        }
        drop(sink);
        self.stats.record_found();
        debug!("Emitted {}", path.display());
    }
    fn visit_directory(&self, path: &Path, ancestry: &[PathBuf], spawner: &Spawner<'_, Visit>) {
        let verdict = self.filters.check_directory(path);
        if verdict != Verdict::Admit {
            debug!("Skipping directory {}: {:?}", path.display(), verdict);
            return;
        }
        let Some(ancestry) = descend(path, ancestry) else {
            debug!("Skipping directory {}: link cycle", path.display());
            return;
        };
        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(e) => {
                error!("Cannot list {}: {}", path.display(), e);
                return;
            }
        };
        let mut entries = Vec::new();
        for entry in reader {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => error!("Cannot read an entry of {}: {}", path.display(), e),
            }
        }
        entries.sort_by(|a, b| compare_names(&a.file_name(), &b.file_name()));
        for entry in entries {
            spawner.spawn(Visit {
                path: entry.path(),
                ancestry: Arc::clone(&ancestry),
            });
        }
    }
}

/// A queued path and the canonical directories it was reached through.
struct Visit {
    path: PathBuf,
    ancestry: Arc<Vec<PathBuf>>,
}

/// Extends `ancestry` with the canonical form of `dir`, or returns `None` when
/// `dir` is already one of its own ancestors (a directory link loop).
///
/// Links are followed, so the same directory may be listed more than once
/// when several links point at it; only loops are cut.
pub(crate) fn descend(dir: &Path, ancestry: &[PathBuf]) -> Option<Arc<Vec<PathBuf>>> {
    let canonical = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    if ancestry.contains(&canonical) {
        return None;
    }
    let mut chain = Vec::with_capacity(ancestry.len() + 1);
    chain.extend_from_slice(ancestry);
    chain.push(canonical);
    Some(Arc::new(chain))
}
/// Runs a complete pass over `paths`: resolves them, anchors gitignore rules
/// and the tree at their common ancestor, then prints every surviving file.
///
/// An empty `paths` walks the current directory. Input paths are walked one
/// after another, in the order given.
pub fn files_to_prompt<P: AsRef<Path>>(
    paths: &[P],
    options: &TraversalOptions,
    printer: &dyn Printer,
    sink: &mut dyn LineSink,
) -> Result<RunSummary> {
    let mut targets = Vec::with_capacity(paths.len().max(1));
    if paths.is_empty() {
        targets.push(resolve_path(Path::new(".")).map_err(|e| FilesToPromptError::io(".", e))?);
    }
    for path in paths {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(FilesToPromptError::InvalidPath("empty path".to_string()));
        }
        targets.push(resolve_path(path).map_err(|e| FilesToPromptError::io(path, e))?);
    }
    let base = common_ancestor(&targets);
    debug!("Base directory: {}", base.display());
    let rules = if options.respect_gitignore && !base.as_os_str().is_empty() {
        IgnoreRules::load(&base)
    } else {
        IgnoreRules::empty()
    };
    let filters = FilterChain::new(options, rules, base.clone())?;
    let stats = Statistics::new();

    printer
        .begin(&mut *sink)
        .map_err(|e| FilesToPromptError::io(&base, e))?;
    let tree = if options.tree {
        let tree = build_tree(&targets, &filters);
        printer
            .print_tree(&mut *sink, &tree)
            .map_err(|e| FilesToPromptError::io(&base, e))?;
        Some(tree)
    } else {
        None
    };
    {
        let traversal = Traversal::new(&filters, printer, &mut *sink, &stats, options.concurrency)?;
        for target in &targets {
            let report = traversal.traverse(target);
            debug!(
                "Finished {}: {} tasks, peak concurrency {}",
                target.display(),
                report.completed,
                report.peak
            );
        }
    }
    printer
        .finish(&mut *sink)
        .map_err(|e| FilesToPromptError::io(&base, e))?;

    Ok(RunSummary {
        base,
        tree,
        found_files: stats.found_files(),
        skipped_files: stats.skipped_files(),
    })
}
