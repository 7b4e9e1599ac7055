use std::path::{Path, PathBuf};

use tracing::error;

/// Collects every file under `root` carrying the given extension, recursing
/// into subdirectories. Paths come back sorted so first-seen semantics are
/// stable across runs. A missing or unreadable directory is logged and
/// contributes nothing; the batch proceeds.
pub(crate) fn discover_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect(root, extension, &mut found);
    found.sort();
    found
}

fn collect(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            error!(dir = %dir.display(), error = %err, "cannot read input directory");
            return;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                error!(dir = %dir.display(), error = %err, "cannot read directory entry");
                continue;
            }
        };
        if path.is_dir() {
            collect(&path, extension, found);
        } else if path.extension().map(|ext| ext == extension).unwrap_or(false) {
            found.push(path);
        }
    }
}
