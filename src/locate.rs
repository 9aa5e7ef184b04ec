use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolves a logical relative path to an actual file under the extraction
/// root. Exports are inconsistent about their internal layout, so three
/// strategies are tried in order: the exact path, the same path under the
/// root's single subdirectory (archives wrapped in a dated folder), and the
/// path with every segment lower-cased. First hit wins; no strategy mutates
/// the filesystem.
pub fn locate(extraction_root: &Path, relative_path: &str) -> Option<PathBuf> {
    let exact = extraction_root.join(relative_path);
    if exact.exists() {
        return Some(exact);
    }

    if let Some(sub_dir) = single_subdirectory(extraction_root) {
        let nested = sub_dir.join(relative_path);
        if nested.exists() {
            info!(
                action = "resolve",
                component = "locator",
                path = relative_path,
                sub_dir = ?sub_dir.file_name(),
                "File found under single subdirectory"
            );
            return Some(nested);
        }
    }

    let lowered: PathBuf = relative_path
        .split('/')
        .map(|segment| segment.to_lowercase())
        .collect();
    let folded = extraction_root.join(lowered);
    if folded.exists() {
        info!(
            action = "resolve",
            component = "locator",
            path = relative_path,
            "File found at case-folded path"
        );
        return Some(folded);
    }

    warn!(
        action = "resolve",
        component = "locator",
        path = relative_path,
        "File not found in extraction root"
    );
    None
}

fn single_subdirectory(root: &Path) -> Option<PathBuf> {
    let mut dirs = fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir());

    let first = dirs.next()?;
    if dirs.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"{}").unwrap();
    }

    #[test]
    fn finds_file_at_exact_path() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("connections/list.json");
        write_file(&target);

        assert_eq!(locate(root.path(), "connections/list.json"), Some(target));
    }

    #[test]
    fn finds_file_under_single_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("export-2025-11-09/connections/list.json");
        write_file(&target);

        assert_eq!(locate(root.path(), "connections/list.json"), Some(target));
    }

    #[test]
    fn ignores_wrap_when_multiple_subdirectories_exist() {
        let root = tempfile::tempdir().unwrap();
        write_file(&root.path().join("export-a/connections/list.json"));
        fs::create_dir_all(root.path().join("export-b")).unwrap();

        assert_eq!(locate(root.path(), "connections/list.json"), None);
    }

    #[test]
    fn finds_file_at_case_folded_path() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("connections/list.json");
        write_file(&target);

        assert_eq!(locate(root.path(), "Connections/List.json"), Some(target));
    }

    #[test]
    fn reports_not_found_when_no_strategy_matches() {
        let root = tempfile::tempdir().unwrap();
        write_file(&root.path().join("unrelated/other.json"));
        fs::create_dir_all(root.path().join("second_dir")).unwrap();

        assert_eq!(locate(root.path(), "connections/list.json"), None);
    }
}
