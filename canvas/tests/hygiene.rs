//! Source hygiene for the canvas engines.
//!
//! Scans production sources under `src/` (test files excluded) for patterns
//! that crash the page, silently drop errors, or leak browser resources. Each
//! pattern has a budget; the budget only ever goes down.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // A panic in a frame callback kills every engine on the page.
    Budget { pattern: ".unwrap()", max: 0, why: "panics" },
    Budget { pattern: ".expect(", max: 0, why: "panics" },
    Budget { pattern: "panic!(", max: 0, why: "panics" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished" },
    Budget { pattern: "let _ =", max: 0, why: "discards an error" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
    // Forgotten closures outlive teardown and stack up across remounts.
    Budget { pattern: ".forget()", max: 0, why: "leaks a listener" },
    Budget { pattern: "mem::forget", max: 0, why: "leaks a resource" },
    // Logging goes through the `log` facade.
    Budget { pattern: "println!(", max: 0, why: "bypasses log" },
    Budget { pattern: "console::log", max: 0, why: "bypasses log" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.file_stem().is_some_and(|s| s.to_string_lossy().ends_with("_test"));
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.display().to_string(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut report = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > budget.max {
            report.push(format!("`{}` ({}): found {count}, max {}", budget.pattern, budget.why, budget.max));
            report.extend(found.iter().map(|(path, n)| format!("  {path}: {n}")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}

#[test]
fn every_test_file_is_wired() {
    // A sibling `x_test.rs` only runs if its module declares it.
    let mut missing = Vec::new();
    let mut stack = vec![PathBuf::from("src")];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if !name.ends_with("_test.rs") {
                continue;
            }
            let declared = format!("#[path = \"{name}\"]");
            let wired = fs::read_dir(&dir)
                .into_iter()
                .flatten()
                .flatten()
                .filter_map(|e| fs::read_to_string(e.path()).ok())
                .any(|content| content.contains(&declared));
            if !wired {
                missing.push(path.display().to_string());
            }
        }
    }
    assert!(missing.is_empty(), "test files not declared by any module:\n{}", missing.join("\n"));
}
