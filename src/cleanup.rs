//! Workspace disposal after a fully successful run.
//!
//! Invoked only once every stage has completed; failed runs keep their
//! workspace so the surviving artifacts can be inspected.
use crate::workspace::WorkspacePaths;
use std::fs;

/// Discard every artifact and leave an empty workspace root behind.
///
/// Best-effort: removal errors are reported and otherwise ignored, so
/// cleanup never turns a successful run into a failed one.
pub fn scrub_workspace(paths: &WorkspacePaths, verbose: bool) {
    let root = paths.root();
    if root.is_dir() {
        if let Err(err) = fs::remove_dir_all(root) {
            if verbose {
                eprintln!("warning: failed to clean workspace {}: {err}", root.display());
            }
        }
    }
    if let Err(err) = fs::create_dir_all(root) {
        eprintln!(
            "warning: failed to recreate workspace root {}: {err}",
            root.display()
        );
    }
}
