//! # files-to-prompt
//!
//! `files_to_prompt` walks a set of paths, filters what it finds and prints the
//! content of every surviving file in a format suited to pasting into a prompt:
//! plain text, fenced Markdown, or a `<documents>` XML layout, optionally
//! preceded by a rendered directory tree.
//!
//! Filters run in a fixed order for every entry: hidden names, `.gitignore`
//! rules, custom glob patterns, then binary extensions and the extension
//! allow-list. The tree preview and the content walk share the same
//! [`FilterChain`], so they always agree on what is included.
//!
//! # Features
//!
//! - `parallel` (default): visits directory entries on a bounded Rayon pool.
//!   Without it the walk runs on the calling thread.
//!
//! # Example
//!
//! ```no_run
//! use files_to_prompt::{files_to_prompt, printer_for, OutputFormat, TraversalBuilder};
//!
//! let options = TraversalBuilder::new()
//!     .extensions(["rs", "toml"])
//!     .tree(true)
//!     .build();
//! let printer = printer_for(OutputFormat::Markdown, false);
//! let mut out = Vec::new();
//!
//! let summary = files_to_prompt(&["."], &options, printer.as_ref(), &mut out)
//!     .expect("Failed to walk directory");
//!
//! println!("{}", String::from_utf8_lossy(&out));
//! eprintln!("{} files, {} skipped", summary.found_files, summary.skipped_files);
//! ```

mod ancestor;
mod binary;
pub mod clipboard;
pub mod config;
mod engine;
mod error;
mod filter;
mod ignore_rules;
mod limiter;
mod options;
pub mod output;
pub mod sink;
mod tree;
mod types;
pub mod utils;

pub use ancestor::common_ancestor;
pub use binary::{is_binary_extension, is_binary_path};
pub use engine::{Traversal, files_to_prompt};
pub use error::{FilesToPromptError, Result};
pub use filter::{FilterChain, Verdict, is_hidden};
pub use ignore_rules::IgnoreRules;
pub use limiter::{PoolReport, Spawner, WorkerPool};
pub use options::{DEFAULT_CONCURRENCY, TraversalBuilder, TraversalOptions};
pub use output::{LineSink, OutputFormat, Printer, printer_for};
pub use tree::build_tree;
pub use types::{RunSummary, Statistics};
