//! Build-graph layering lock tests.
//!
//! `kernel` knows nothing of the engine or the harness, and the engine knows
//! nothing of the harness. Checked on source lines and on each crate's
//! `Cargo.toml`.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_path_buf()
}

fn scan(dir: &Path, forbidden: &[&str], violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan(&path, forbidden, violations);
            continue;
        }
        if !path.extension().is_some_and(|e| e == "rs" || e == "toml") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                continue;
            }
            if forbidden.iter().any(|p| trimmed.contains(p)) {
                violations.push((path.display().to_string(), line_no + 1, line.to_string()));
            }
        }
    }
}

fn assert_clean(crate_dir: &str, forbidden: &[&str]) {
    let root = workspace_root().join(crate_dir);
    let mut violations = Vec::new();
    scan(&root.join("src"), forbidden, &mut violations);
    let manifest = root.join("Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("Cargo.toml must exist");
    for (line_no, line) in content.lines().enumerate() {
        if forbidden.iter().any(|p| line.contains(p)) {
            violations.push((manifest.display().to_string(), line_no + 1, line.to_string()));
        }
    }

    if !violations.is_empty() {
        let mut msg = format!("{crate_dir} reaches into a higher layer:\n");
        for (file, line, content) in &violations {
            let _ = writeln!(msg, "  {file}:{line}: {content}");
        }
        panic!("{msg}");
    }
}

#[test]
fn kernel_depends_on_neither_engine_nor_harness() {
    assert_clean(
        "kernel",
        &["matchbound_search", "matchbound-search", "matchbound_harness", "matchbound-harness"],
    );
}

#[test]
fn engine_does_not_depend_on_harness() {
    assert_clean("search", &["matchbound_harness", "matchbound-harness"]);
}

#[test]
fn engine_installs_no_global_logger() {
    assert_clean("search", &["env_logger", "set_logger", "set_boxed_logger"]);
}
