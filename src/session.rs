use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-run ownership of the two local storage paths: the downloaded archive
/// and the directory it is unpacked into. Both are keyed by the sanitized
/// identifying name, so concurrent runs with different names cannot collide.
#[derive(Debug, Clone)]
pub struct Session {
    pub download_url: String,
    pub username: String,
    pub zip_path: PathBuf,
    pub extraction_path: PathBuf,
}

impl Session {
    pub fn new(data_dir: &Path, download_url: &str, username: &str) -> Result<Session> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("could not create data directory {:?}", data_dir))?;

        let name = sanitize_name(username);
        Ok(Session {
            download_url: download_url.to_string(),
            zip_path: data_dir.join(format!("{}_export_data.zip", name)),
            extraction_path: data_dir.join(format!("{}_extracted_data", name)),
            username: name,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    std::env::temp_dir().join("followee")
}

// The name is caller-supplied and ends up in filesystem paths; restrict it
// to filename-safe characters so session storage stays inside the data dir.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        "user".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_paths_live_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(dir.path(), "https://example.com/x.zip", "alice").unwrap();

        assert!(session.zip_path.starts_with(dir.path()));
        assert!(session.extraction_path.starts_with(dir.path()));
        assert_ne!(session.zip_path, session.extraction_path);
    }

    #[test]
    fn sanitizes_hostile_names() {
        assert_eq!(sanitize_name("../../etc"), "etc");
        assert_eq!(sanitize_name("a b/c"), "abc");
        assert_eq!(sanitize_name("!!!"), "user");
        assert_eq!(sanitize_name(""), "user");
        assert_eq!(sanitize_name("normal_user-1"), "normal_user-1");
    }

    #[test]
    fn creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeper").join("still");
        Session::new(&nested, "https://example.com/x.zip", "bob").unwrap();
        assert!(nested.is_dir());
    }
}
