use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Every directory strictly above `start` that contains `filename`, nearest first.
pub fn ancestors_with(start: &Path, filename: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut current = start.parent().map(Path::to_path_buf);
    while let Some(dir) = current {
        if let Some(hit) = find_ancestor_with(&dir, filename) {
            current = hit.parent().map(Path::to_path_buf);
            found.push(hit);
        } else {
            break;
        }
    }
    found
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
