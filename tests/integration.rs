use files_to_prompt::output::PlainPrinter;
use files_to_prompt::{
    FilterChain, IgnoreRules, OutputFormat, RunSummary, TraversalBuilder, TraversalOptions,
    build_tree, files_to_prompt, printer_for,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
fn workspace() -> TempDir {
    tempfile::Builder::new().prefix("ftp-it").tempdir().unwrap()
}
fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
fn run(paths: &[&Path], options: &TraversalOptions) -> (RunSummary, String) {
    let printer = PlainPrinter::default();
    let mut out = Vec::new();
    let summary = files_to_prompt(paths, options, &printer, &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}
#[test]
fn hidden_files_are_skipped_before_statistics() {
    let dir = workspace();
    write(dir.path(), "a.txt", "hello");
    write(dir.path(), ".hidden", "x");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    let expected = format!("{}\n---\nhello\n\n---\n", dir.path().join("a.txt").display());
    assert_eq!(out, expected);
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 0);

    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().include_hidden(true).build());
    assert!(out.contains(".hidden"));
    assert_eq!(summary.found_files, 2);
}
#[test]
fn hidden_directories_hide_their_descendants() {
    let dir = workspace();
    write(dir.path(), ".git/config", "[core]");
    write(dir.path(), ".git/objects/readme.txt", "visible name");
    write(dir.path(), "src/main.rs", "fn main() {}");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert_eq!(summary.found_files, 1);
    assert!(!out.contains("[core]"));
    assert!(!out.contains("visible name"));

    let (summary, _) = run(&[dir.path()], &TraversalBuilder::new().include_hidden(true).build());
    assert_eq!(summary.found_files, 3);
}
#[test]
fn gitignored_files_are_not_counted() {
    let dir = workspace();
    write(dir.path(), ".gitignore", "*.log\n");
    write(dir.path(), "app.log", "boot");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert!(out.is_empty());
    assert_eq!(summary.found_files, 0);
    assert_eq!(summary.skipped_files, 0);

    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().respect_gitignore(false).build());
    assert!(out.contains("boot"));
    assert_eq!(summary.found_files, 1);
}
#[test]
fn gitignore_directory_rules_prune_subtrees() {
    let dir = workspace();
    write(dir.path(), ".gitignore", "build/\n# keep sources\n");
    write(dir.path(), "build/out.txt", "artifact");
    write(dir.path(), "src/build", "a file named build");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert_eq!(summary.found_files, 1);
    assert!(out.contains("a file named build"));
    assert!(!out.contains("artifact"));
}
#[test]
fn binary_files_are_skipped_and_counted() {
    let dir = workspace();
    write(dir.path(), "image.png", "not really a png");
    write(dir.path(), "note.txt", "note");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert!(out.contains("note"));
    assert!(!out.contains("not really a png"));
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 1);

    let (summary, _) = run(&[dir.path()], &TraversalBuilder::new().include_binary(true).build());
    assert_eq!(summary.found_files, 2);
    assert_eq!(summary.skipped_files, 0);
}
#[test]
fn binary_inclusion_is_independent_of_extensions() {
    let dir = workspace();
    write(dir.path(), "image.png", "png");
    write(dir.path(), "note.txt", "note");
    let options = TraversalBuilder::new()
        .include_binary(true)
        .extensions(["txt"])
        .build();
    let (summary, _) = run(&[dir.path()], &options);
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 1);
}
#[test]
fn extension_allow_list() {
    let dir = workspace();
    write(dir.path(), "lib.rs", "pub fn lib() {}");
    write(dir.path(), "Cargo.toml", "[package]");
    write(dir.path(), "README", "readme");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().extensions(["rs"]).build());
    assert!(out.contains("pub fn lib() {}"));
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 2);

    let (summary, _) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert_eq!(summary.found_files, 3);
}
#[test]
fn entries_are_visited_in_name_order() {
    let dir = workspace();
    write(dir.path(), "b.txt", "second");
    write(dir.path(), "a.txt", "first");
    write(dir.path(), "c_sub/d.txt", "third");
    let options = TraversalBuilder::new().concurrency(1).build();
    let (summary, out) = run(&[dir.path()], &options);
    assert_eq!(summary.found_files, 3);
    let first = out.find("first").unwrap();
    let second = out.find("second").unwrap();
    let third = out.find("third").unwrap();
    assert!(first < second && second < third);
}
#[test]
fn concurrent_walk_emits_every_file_once() {
    let dir = workspace();
    for d in 0..8 {
        for f in 0..25 {
            write(dir.path(), &format!("dir{}/file{}.txt", d, f), &format!("content {} {}", d, f));
        }
    }
    let options = TraversalBuilder::new().concurrency(4).build();
    let (summary, out) = run(&[dir.path()], &options);
    assert_eq!(summary.found_files, 200);
    assert_eq!(summary.skipped_files, 0);
    assert_eq!(out.matches("\n---\n").count(), 400);
    assert_eq!(out.matches("content 7 24\n").count(), 1);
}
#[test]
fn custom_patterns_prune_directories_unless_files_only() {
    let dir = workspace();
    write(dir.path(), "vendor/lib.txt", "vendored");
    write(dir.path(), "main.txt", "main");
    let pruning = TraversalBuilder::new()
        .ignore_patterns(vec!["vendor*".into()])
        .build();
    let (summary, out) = run(&[dir.path()], &pruning);
    assert!(!out.contains("vendored"));
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 0);

    let files_only = TraversalBuilder::new()
        .ignore_patterns(vec!["vendor*".into()])
        .ignore_files_only(true)
        .build();
    let (summary, out) = run(&[dir.path()], &files_only);
    assert!(!out.contains("vendored"));
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.skipped_files, 1);
}
#[test]
fn custom_patterns_match_relative_paths() {
    let dir = workspace();
    write(dir.path(), "notes.txt", "top");
    write(dir.path(), "docs/notes.txt", "nested");
    let options = TraversalBuilder::new()
        .ignore_patterns(vec!["docs/*.txt".into()])
        .build();
    let (summary, out) = run(&[dir.path()], &options);
    assert!(out.contains("top"));
    assert!(!out.contains("nested"));
    assert_eq!(summary.skipped_files, 1);
}
#[test]
fn invalid_utf8_is_replaced_not_dropped() {
    let dir = workspace();
    fs::write(dir.path().join("notes.txt"), b"caf\xe9 menu\n").unwrap();
    write(dir.path(), "good.txt", "good");
    let (summary, out) = run(&[dir.path()], &TraversalBuilder::new().build());
    assert!(out.contains("good"));
    assert!(out.contains("caf\u{FFFD} menu"));
    assert_eq!(summary.found_files, 2);
    assert_eq!(summary.skipped_files, 0);
}
#[cfg(unix)]
#[test]
fn directory_links_are_followed() {
    let dir = workspace();
    let outside = workspace();
    write(dir.path(), "a.txt", "local");
    write(outside.path(), "lib.txt", "linked content");
    std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();
    let options = TraversalBuilder::new().tree(true).build();
    let (summary, out) = run(&[dir.path()], &options);
    assert!(out.contains("linked content"));
    assert!(out.contains(&dir.path().join("linked").join("lib.txt").display().to_string()));
    assert_eq!(summary.found_files, 2);
    assert_eq!(
        summary.tree.as_deref(),
        Some(".\n├── a.txt\n└── linked\n    └── lib.txt")
    );
}
#[cfg(unix)]
#[test]
fn directory_link_cycles_are_cut() {
    let dir = workspace();
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "sub/b.txt", "b");
    std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();
    let options = TraversalBuilder::new().tree(true).concurrency(3).build();
    let (summary, _) = run(&[dir.path()], &options);
    assert_eq!(summary.found_files, 2);
    assert_eq!(
        summary.tree.as_deref(),
        Some(".\n├── a.txt\n└── sub\n    └── b.txt")
    );
}
#[test]
fn missing_paths_do_not_abort_the_run() {
    let dir = workspace();
    write(dir.path(), "a.txt", "still here");
    let missing = dir.path().join("missing");
    let file = dir.path().join("a.txt");
    let (summary, out) = run(&[missing.as_path(), file.as_path()], &TraversalBuilder::new().build());
    assert!(out.contains("still here"));
    assert_eq!(summary.found_files, 1);
    assert_eq!(summary.base, dir.path());
}
#[test]
fn several_inputs_share_the_gitignore_of_their_ancestor() {
    let dir = workspace();
    write(dir.path(), ".gitignore", "*.tmp\n");
    write(dir.path(), "one/keep.txt", "first input");
    write(dir.path(), "one/drop.tmp", "scratch");
    write(dir.path(), "two/keep.txt", "second input");
    let one = dir.path().join("one");
    let two = dir.path().join("two");
    let (summary, out) = run(&[one.as_path(), two.as_path()], &TraversalBuilder::new().build());
    assert_eq!(summary.base, dir.path());
    assert_eq!(summary.found_files, 2);
    assert!(!out.contains("scratch"));
    assert!(out.find("first input").unwrap() < out.find("second input").unwrap());
}
#[test]
fn tree_is_sorted_and_filtered() {
    let dir = workspace();
    write(dir.path(), "b.txt", "b");
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "c_sub/d.txt", "d");
    write(dir.path(), "c_sub/e/f.txt", "f");
    write(dir.path(), ".hidden/x.txt", "x");
    write(dir.path(), "image.png", "png");
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    let options = TraversalBuilder::new().build();
    let filters = FilterChain::new(&options, IgnoreRules::empty(), dir.path()).unwrap();
    let tree = build_tree(&[dir.path()], &filters);
    let expected = [
        ".",
        "├── a.txt",
        "├── b.txt",
        "└── c_sub",
        "    ├── d.txt",
        "    └── e",
        "        └── f.txt",
    ]
    .join("\n");
    assert_eq!(tree, expected);
    assert_eq!(build_tree(&[dir.path(), dir.path()], &filters), expected);
}
#[test]
fn tree_keeps_sorted_path_order_for_siblings() {
    let dir = workspace();
    write(dir.path(), "a/y.txt", "y");
    write(dir.path(), "a-b/x.txt", "x");
    let options = TraversalBuilder::new().build();
    let filters = FilterChain::new(&options, IgnoreRules::empty(), dir.path()).unwrap();
    let tree = build_tree(&[dir.path()], &filters);
    let expected = [
        ".",
        "├── a-b",
        "│   └── x.txt",
        "└── a",
        "    └── y.txt",
    ]
    .join("\n");
    assert_eq!(tree, expected);
}
#[test]
fn tree_applies_gitignore_and_custom_patterns() {
    let dir = workspace();
    write(dir.path(), ".gitignore", "*.log\n");
    write(dir.path(), "keep.txt", "keep");
    write(dir.path(), "debug.log", "log");
    write(dir.path(), "readme.md", "readme");
    write(dir.path(), "src/main.rs", "fn main() {}");
    write(dir.path(), "vendor/lib.txt", "lib");
    write(dir.path(), "vendor/notes.md", "notes");
    let patterns = vec!["vendor".to_string(), "*.md".to_string()];

    let pruning = TraversalBuilder::new().ignore_patterns(patterns.clone()).build();
    let filters = FilterChain::new(&pruning, IgnoreRules::load(dir.path()), dir.path()).unwrap();
    let expected = [".", "├── keep.txt", "└── src", "    └── main.rs"].join("\n");
    assert_eq!(build_tree(&[dir.path()], &filters), expected);

    let files_only = TraversalBuilder::new()
        .ignore_patterns(patterns)
        .ignore_files_only(true)
        .build();
    let filters = FilterChain::new(&files_only, IgnoreRules::load(dir.path()), dir.path()).unwrap();
    let expected = [
        ".",
        "├── keep.txt",
        "├── src",
        "│   └── main.rs",
        "└── vendor",
        "    └── lib.txt",
    ]
    .join("\n");
    assert_eq!(build_tree(&[dir.path()], &filters), expected);
}
#[test]
fn tree_is_printed_before_contents() {
    let dir = workspace();
    write(dir.path(), "main.rs", "fn main() {}");
    write(dir.path(), "src/lib.rs", "pub fn test() {}");
    let options = TraversalBuilder::new().tree(true).build();
    let printer = printer_for(OutputFormat::Xml, false);
    let mut out = Vec::new();
    let summary = files_to_prompt(&[dir.path()], &options, printer.as_ref(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let tree = summary.tree.unwrap();
    assert_eq!(tree, ".\n├── main.rs\n└── src\n    └── lib.rs");
    assert!(out.starts_with("<documents>\n<directory_tree>\n.\n├── main.rs\n"));
    assert!(out.contains("<document index=\"1\">"));
    assert!(out.contains("<document index=\"2\">"));
    assert!(out.ends_with("</documents>\n"));
    assert_eq!(summary.found_files, 2);
}
#[test]
fn statistics_never_exceed_visited_files() {
    let dir = workspace();
    write(dir.path(), ".gitignore", "*.log\n");
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "b.log", "b");
    write(dir.path(), "c.png", "c");
    write(dir.path(), ".d", "d");
    write(dir.path(), "e.txt", "e");
    let (summary, _) = run(&[dir.path()], &TraversalBuilder::new().build());
    let visited_files = 6;
    assert_eq!(summary.found_files, 2);
    assert_eq!(summary.skipped_files, 1);
    assert!(summary.found_files + summary.skipped_files < visited_files);
}
