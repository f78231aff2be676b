// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source hygiene for the engine crate.
//!
//! Input handling runs on the host's UI thread, so production code must never
//! panic or silently drop an error. These tests scan `src/` for the patterns
//! that do either; the allowance for each is zero.

use std::fs;
use std::path::Path;

/// Patterns that crash the process.
const PANICS: &[&str] = &[
    ".unwrap()",
    ".expect(",
    "panic!(",
    "unreachable!(",
    "todo!(",
    "unimplemented!(",
];

/// Patterns that discard a result without looking at it.
const SILENT_DISCARDS: &[&str] = &["let _ =", ".ok()"];

/// Structural shortcuts.
const STYLE: &[&str] = &["#[allow(dead_code)]"];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && let Ok(content) = fs::read_to_string(&path)
        {
            out.push(SourceFile {
                path: path.to_string_lossy().into_owned(),
                content,
            });
        }
    }
}

/// `(path, line number, line)` for every line containing `pattern`.
fn find(files: &[SourceFile], pattern: &str) -> Vec<(String, usize, String)> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(n, line)| (file.path.clone(), n + 1, line.trim().to_owned()))
        })
        .collect()
}

fn assert_absent(patterns: &[&str]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");
    for pattern in patterns {
        let hits = find(&files, pattern);
        let listing: Vec<String> = hits
            .iter()
            .map(|(path, line, text)| format!("  {path}:{line}: {text}"))
            .collect();
        assert!(
            hits.is_empty(),
            "`{pattern}` found in production code:\n{}",
            listing.join("\n")
        );
    }
}

#[test]
fn no_panicking_calls() {
    assert_absent(PANICS);
}

#[test]
fn no_silently_discarded_results() {
    assert_absent(SILENT_DISCARDS);
}

#[test]
fn no_style_shortcuts() {
    assert_absent(STYLE);
}
