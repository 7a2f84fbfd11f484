//! Command-line interface for files-to-prompt.
//!
//! Walks the given paths (and any paths piped on standard input) and prints
//! every surviving file in the selected format.

use clap::Parser;
use files_to_prompt::config::FileConfig;
use files_to_prompt::sink::{Destination, OutputSink};
use files_to_prompt::utils::{format_bytes, read_paths};
use files_to_prompt::{
    DEFAULT_CONCURRENCY, OutputFormat, TraversalBuilder, TraversalOptions, files_to_prompt,
    printer_for,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// files-to-prompt: concatenate a directory of files into one prompt
#[derive(Parser)]
#[command(name = "files-to-prompt", version, about, long_about = None)]
struct Cli {
    /// Files or directories to include (default current dir)
    paths: Vec<PathBuf>,

    /// Only include files with this extension (can be repeated)
    #[arg(short = 'e', long = "extension")]
    extensions: Vec<String>,

    /// Include files and directories whose name starts with '.'
    #[arg(long)]
    include_hidden: bool,

    /// Include files with a binary extension
    #[arg(long)]
    include_binary: bool,

    /// Glob of paths to skip, relative to the common base (can be repeated)
    #[arg(long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Apply --ignore patterns to files only, never to directories
    #[arg(long)]
    ignore_files_only: bool,

    /// Do not read .gitignore
    #[arg(long)]
    ignore_gitignore: bool,

    /// Print a directory tree before the file contents
    #[arg(long)]
    tree: bool,

    /// Output in <documents> XML, suited to Claude
    #[arg(short = 'c', long, conflicts_with = "markdown")]
    cxml: bool,

    /// Output fenced Markdown
    #[arg(short = 'm', long)]
    markdown: bool,

    /// Prefix every content line with its line number
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long, conflicts_with = "clipboard")]
    output: Option<PathBuf>,

    /// Copy output to the system clipboard
    #[arg(long)]
    clipboard: bool,

    /// Paths on standard input are NUL-separated
    #[arg(short = '0', long)]
    null: bool,

    /// Maximum number of paths processed at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Read defaults from this JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every filtering decision to stderr
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// The flags given on the command line, as a config layer. Unset flags
    /// stay `None` so they fall through to the config file.
    fn overrides(&self) -> FileConfig {
        let set = |flag: bool| flag.then_some(true);
        let format = if self.cxml {
            Some(OutputFormat::Xml)
        } else if self.markdown {
            Some(OutputFormat::Markdown)
        } else {
            None
        };
        FileConfig {
            extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
            include_hidden: set(self.include_hidden),
            include_binary: set(self.include_binary),
            ignore_patterns: (!self.ignore_patterns.is_empty()).then(|| self.ignore_patterns.clone()),
            ignore_files_only: set(self.ignore_files_only),
            ignore_gitignore: set(self.ignore_gitignore),
            concurrency: self.concurrency,
            tree: set(self.tree),
            format,
            line_numbers: set(self.line_numbers),
        }
    }
}

fn traversal_options(config: &FileConfig) -> TraversalOptions {
    TraversalBuilder::new()
        .extensions(config.extensions.clone().unwrap_or_default())
        .include_hidden(config.include_hidden.unwrap_or(false))
        .include_binary(config.include_binary.unwrap_or(false))
        .ignore_patterns(config.ignore_patterns.clone().unwrap_or_default())
        .ignore_files_only(config.ignore_files_only.unwrap_or(false))
        .respect_gitignore(!config.ignore_gitignore.unwrap_or(false))
        .concurrency(config.concurrency.unwrap_or(DEFAULT_CONCURRENCY))
        .tree(config.tree.unwrap_or(false))
        .build()
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => FileConfig::load(path),
        None => FileConfig::load_default(),
    };
    let mut config = config.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });
    config.merge(cli.overrides());
    let options = traversal_options(&config);
    let printer = printer_for(
        config.format.unwrap_or_default(),
        config.line_numbers.unwrap_or(false),
    );
    let destination = match (cli.output, cli.clipboard) {
        (Some(path), _) => Destination::File(path),
        (None, true) => Destination::Clipboard,
        (None, false) => Destination::Stdout,
    };
    let mut paths = cli.paths;

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        match read_paths(stdin.lock(), cli.null) {
            Ok(piped) => paths.extend(piped),
            Err(e) => {
                eprintln!("Error: failed to read paths from stdin: {}", e);
                exit(1);
            }
        }
    }

    let mut sink = OutputSink::open(&destination).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });
    let summary = match files_to_prompt(&paths, &options, printer.as_ref(), &mut sink) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };
    let bytes = sink.finalize().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });

    let target = match &destination {
        Destination::Stdout => "stdout".to_string(),
        Destination::File(path) => path.display().to_string(),
        Destination::Clipboard => "clipboard".to_string(),
    };
    eprintln!(
        "{} files emitted, {} skipped, {} written to {}",
        summary.found_files,
        summary.skipped_files,
        format_bytes(bytes),
        target
    );
}
