use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::extract::{self, Variant};
use crate::locate;

pub const DATA_FILE_PREFIX: &str = "connections/followers_and_following";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DatasetKey {
    Followers,
    Following,
    Blocked,
    RecentlyUnfollowed,
    AcceptedRequests,
    ReceivedRequests,
    HideStoryFrom,
    PendingRequests,
    RestrictedProfiles,
}

#[derive(Debug, Clone, Copy)]
pub struct DatasetSpec {
    pub key: DatasetKey,
    pub file_name: &'static str,
    pub variant: Variant,
    pub root_key: Option<&'static str>,
}

/// The fixed table mapping each logical dataset to its file inside the
/// export and the schema variant that file uses. Received-requests really
/// does use the bare string-list shape while its keyed siblings do not;
/// that asymmetry matches the observed export files.
pub const DATASETS: [DatasetSpec; 9] = [
    DatasetSpec {
        key: DatasetKey::Followers,
        file_name: "followers_1.json",
        variant: Variant::TopLevelList,
        root_key: None,
    },
    DatasetSpec {
        key: DatasetKey::Following,
        file_name: "following.json",
        variant: Variant::KeyedTitle,
        root_key: Some("relationships_following"),
    },
    DatasetSpec {
        key: DatasetKey::Blocked,
        file_name: "blocked_profiles.json",
        variant: Variant::KeyedTitle,
        root_key: Some("relationships_blocked_users"),
    },
    DatasetSpec {
        key: DatasetKey::RecentlyUnfollowed,
        file_name: "recently_unfollowed_profiles.json",
        variant: Variant::KeyedStringList,
        root_key: Some("relationships_unfollowed_users"),
    },
    DatasetSpec {
        key: DatasetKey::AcceptedRequests,
        file_name: "recent_follow_requests.json",
        variant: Variant::KeyedStringList,
        root_key: Some("relationships_permanent_follow_requests"),
    },
    DatasetSpec {
        key: DatasetKey::ReceivedRequests,
        file_name: "follow_requests_you've_received.json",
        variant: Variant::StringList,
        root_key: None,
    },
    DatasetSpec {
        key: DatasetKey::HideStoryFrom,
        file_name: "hide_story_from.json",
        variant: Variant::KeyedStringList,
        root_key: Some("relationships_hide_stories_from"),
    },
    DatasetSpec {
        key: DatasetKey::PendingRequests,
        file_name: "pending_follow_requests.json",
        variant: Variant::KeyedStringList,
        root_key: Some("relationships_follow_requests_sent"),
    },
    DatasetSpec {
        key: DatasetKey::RestrictedProfiles,
        file_name: "restricted_profiles.json",
        variant: Variant::EmbeddedFirst,
        root_key: Some("relationships_restricted_users"),
    },
];

/// Raw parsed values for every known dataset. A file that could not be
/// located or parsed is represented by an empty list; every key is present
/// in the mapping regardless of how loading went.
#[derive(Debug)]
pub struct RawDataset {
    entries: BTreeMap<DatasetKey, Value>,
}

impl RawDataset {
    pub fn load(extraction_root: &Path) -> RawDataset {
        let mut entries = BTreeMap::new();
        for spec in &DATASETS {
            entries.insert(spec.key, load_json_value(extraction_root, spec.file_name));
        }
        RawDataset { entries }
    }

    pub fn usernames(&self, key: DatasetKey) -> BTreeSet<String> {
        DATASETS
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| extract::extract_usernames(self.value(key), spec.variant, spec.root_key))
            .unwrap_or_default()
    }

    pub fn ordered_usernames(&self, key: DatasetKey) -> Vec<String> {
        extract::extract_ordered(self.value(key))
    }

    fn value(&self, key: DatasetKey) -> &Value {
        static EMPTY: Value = Value::Null;
        self.entries.get(&key).unwrap_or(&EMPTY)
    }
}

fn load_json_value(extraction_root: &Path, file_name: &str) -> Value {
    let relative_path = format!("{}/{}", DATA_FILE_PREFIX, file_name);
    let Some(path) = locate::locate(extraction_root, &relative_path) else {
        return Value::Array(Vec::new());
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                action = "read",
                component = "dataset_load",
                path = ?path,
                error = %e,
                "Could not read dataset file"
            );
            return Value::Array(Vec::new());
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                action = "parse",
                component = "dataset_load",
                path = ?path,
                error = %e,
                "Could not parse dataset JSON"
            );
            Value::Array(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_dataset(root: &Path, file_name: &str, value: &Value) {
        let dir = root.join(DATA_FILE_PREFIX);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), serde_json::to_vec(value).unwrap()).unwrap();
    }

    #[test]
    fn every_key_is_present_even_when_no_file_exists() {
        let root = tempfile::tempdir().unwrap();
        let data = RawDataset::load(root.path());

        assert_eq!(data.entries.len(), DATASETS.len());
        for spec in &DATASETS {
            assert_eq!(data.entries[&spec.key], json!([]));
            assert!(data.usernames(spec.key).is_empty());
        }
    }

    #[test]
    fn loads_and_dispatches_present_files() {
        let root = tempfile::tempdir().unwrap();
        write_dataset(
            root.path(),
            "following.json",
            &json!({"relationships_following": [{"title": "alice"}, {"title": "bob"}]}),
        );
        write_dataset(
            root.path(),
            "followers_1.json",
            &json!([{"string_list_data": [{"value": "carol"}]}]),
        );

        let data = RawDataset::load(root.path());
        assert_eq!(data.usernames(DatasetKey::Following).len(), 2);
        assert_eq!(
            data.ordered_usernames(DatasetKey::Followers),
            ["carol".to_string()]
        );
        assert!(data.usernames(DatasetKey::Blocked).is_empty());
    }

    #[test]
    fn unparseable_file_degrades_to_empty() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(DATA_FILE_PREFIX);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("following.json"), b"not json at all{{{").unwrap();

        let data = RawDataset::load(root.path());
        assert_eq!(data.entries[&DatasetKey::Following], json!([]));
        assert!(data.usernames(DatasetKey::Following).is_empty());
    }
}
