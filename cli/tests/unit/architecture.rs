//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra/output/commands) hold.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `src/<layer>`, with
/// their location.
fn production_lines(layer: &str) -> Vec<(String, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut out = Vec::new();
    for file in collect_rs_files(&root) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        if rel.ends_with("test_support.rs") || rel.ends_with("tests.rs") {
            continue;
        }
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            out.push((format!("{rel}:{}", i + 1), line.to_string()));
        }
    }
    out
}

fn violations(layer: &str, forbidden: &[&str]) -> Vec<String> {
    production_lines(layer)
        .into_iter()
        .filter(|(_, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(loc, line)| format!("{loc}: {}", line.trim()))
        .collect()
}

#[test]
fn domain_is_free_of_io_and_outer_layers() {
    let found = violations(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::process",
            "std::net",
        ],
    );
    assert!(found.is_empty(), "domain layer violations:\n{}", found.join("\n"));
}

#[test]
fn application_does_not_depend_on_infra_or_presentation() {
    let found = violations(
        "application",
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "std::fs::",
            "std::process::Command",
            "ureq::",
        ],
    );
    assert!(found.is_empty(), "application layer violations:\n{}", found.join("\n"));
}

#[test]
fn application_services_take_ports_not_concrete_types() {
    let found = violations(
        "application",
        &["LinuxHost", "HostFs", "UreqNetwork", "TokioCommandRunner", "YamlConfigStore"],
    );
    assert!(found.is_empty(), "concrete infra types in services:\n{}", found.join("\n"));
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let found = violations("infra", &["crate::commands", "crate::output"]);
    assert!(found.is_empty(), "forbidden imports in infra/:\n{}", found.join("\n"));
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let found = violations("infra", &["println!", "eprintln!"]);
    assert!(found.is_empty(), "print macros in infra/:\n{}", found.join("\n"));
}

#[test]
fn no_inline_json_branching_in_commands() {
    let found: Vec<String> = production_lines("commands")
        .into_iter()
        .filter(|(_, line)| {
            let t = line.trim();
            line.contains("json: bool") || t.starts_with("if json") || t.starts_with("if !json")
        })
        .map(|(loc, line)| format!("{loc}: {}", line.trim()))
        .collect();
    assert!(found.is_empty(), "inline JSON branching:\n{}", found.join("\n"));
}
