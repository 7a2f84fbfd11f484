//! Output formatting for files-to-prompt runs.
//!
//! A [`Printer`] turns each emitted file into lines and hands them to a
//! [`LineSink`]. Three formats are provided: plain text, fenced Markdown and a
//! `<documents>` XML layout. File contents are passed through verbatim, apart
//! from optional line numbers.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Destination for output, one line at a time.
pub trait LineSink: Send {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}
impl<W: Write + Send> LineSink for W {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")
    }
}

/// Renders emitted files into a [`LineSink`].
///
/// The engine calls [`Printer::print`] exactly once per emitted file while it
/// holds the sink, so the lines of one file are never interleaved with another.
pub trait Printer: Send + Sync {
    /// Written once before anything else.
    fn begin(&self, _sink: &mut dyn LineSink) -> io::Result<()> {
        Ok(())
    }
    /// Written after `begin` when a tree preview was requested.
    fn print_tree(&self, sink: &mut dyn LineSink, tree: &str) -> io::Result<()>;
    fn print(&self, sink: &mut dyn LineSink, path: &Path, content: &str) -> io::Result<()>;
    /// Written once after the last file.
    fn finish(&self, _sink: &mut dyn LineSink) -> io::Result<()> {
        Ok(())
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Markdown,
    Xml,
}

/// Builds a fresh printer for one run.
pub fn printer_for(format: OutputFormat, line_numbers: bool) -> Box<dyn Printer> {
    match format {
        OutputFormat::Plain => Box::new(PlainPrinter { line_numbers }),
        OutputFormat::Markdown => Box::new(MarkdownPrinter { line_numbers }),
        OutputFormat::Xml => Box::new(XmlPrinter::new(line_numbers)),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPrinter {
    pub line_numbers: bool,
}
impl Printer for PlainPrinter {
    fn print_tree(&self, sink: &mut dyn LineSink, tree: &str) -> io::Result<()> {
        write_block(sink, tree)?;
        sink.write_line("")
    }
    fn print(&self, sink: &mut dyn LineSink, path: &Path, content: &str) -> io::Result<()> {
        sink.write_line(&path.display().to_string())?;
        sink.write_line("---")?;
        write_block(sink, &numbered(content, self.line_numbers))?;
        sink.write_line("")?;
        sink.write_line("---")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPrinter {
    pub line_numbers: bool,
}
impl Printer for MarkdownPrinter {
    fn print_tree(&self, sink: &mut dyn LineSink, tree: &str) -> io::Result<()> {
        let fence = fence_for(tree);
        sink.write_line(&fence)?;
        write_block(sink, tree)?;
        sink.write_line(&fence)?;
        sink.write_line("")
    }
    fn print(&self, sink: &mut dyn LineSink, path: &Path, content: &str) -> io::Result<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let fence = fence_for(content);
        sink.write_line(&path.display().to_string())?;
        sink.write_line(&format!("{}{}", fence, language_from_extension(ext)))?;
        write_block(sink, &numbered(content, self.line_numbers))?;
        sink.write_line(&fence)
    }
}

/// Numbers documents from 1. The counter belongs to this printer, so every
/// run that builds its own printer starts again at 1.
#[derive(Debug, Default)]
pub struct XmlPrinter {
    pub line_numbers: bool,
    next_index: AtomicUsize,
}
impl XmlPrinter {
    pub fn new(line_numbers: bool) -> Self {
        Self {
            line_numbers,
            next_index: AtomicUsize::new(1),
        }
    }
}
impl Printer for XmlPrinter {
    fn begin(&self, sink: &mut dyn LineSink) -> io::Result<()> {
        sink.write_line("<documents>")
    }
    fn print_tree(&self, sink: &mut dyn LineSink, tree: &str) -> io::Result<()> {
        sink.write_line("<directory_tree>")?;
        write_block(sink, tree)?;
        sink.write_line("</directory_tree>")
    }
    fn print(&self, sink: &mut dyn LineSink, path: &Path, content: &str) -> io::Result<()> {
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        sink.write_line(&format!("<document index=\"{}\">", index))?;
        sink.write_line(&format!("<source>{}</source>", path.display()))?;
        sink.write_line("<document_content>")?;
        write_block(sink, &numbered(content, self.line_numbers))?;
        sink.write_line("</document_content>")?;
        sink.write_line("</document>")
    }
    fn finish(&self, sink: &mut dyn LineSink) -> io::Result<()> {
        sink.write_line("</documents>")
    }
}

/// Prefixes each line with its 1-based number, right-aligned to the widest.
pub fn add_line_numbers(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}  {}", i + 1, line, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(content: &str, line_numbers: bool) -> std::borrow::Cow<'_, str> {
    if line_numbers {
        add_line_numbers(content).into()
    } else {
        content.into()
    }
}

fn write_block(sink: &mut dyn LineSink, text: &str) -> io::Result<()> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    for line in text.split('\n') {
        sink.write_line(line)?;
    }
    Ok(())
}

/// Three backticks, lengthened until the fence does not occur in `content`.
fn fence_for(content: &str) -> String {
    let mut fence = String::from("```");
    while content.contains(&fence) {
        fence.push('`');
    }
    fence
}

fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "rs" => "rust",
        "toml" => "toml",
        "json" => "json",
        "md" | "markdown" => "markdown",
        "txt" => "text",
        "html" | "htm" => "html",
        "css" => "css",
        "js" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "py" => "python",
        "sh" | "bash" => "bash",
        "yml" | "yaml" => "yaml",
        "xml" => "xml",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "go" => "go",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "dart" => "dart",
        "sql" => "sql",
        _ => "",
    }
}
