use serde_json::Value;
use std::collections::BTreeSet;

/// The export encodes the same logical list of usernames under several JSON
/// shapes depending on which file is being read. Each variant names one of
/// the known encodings; the dataset table in `datasets` fixes which file
/// uses which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Object with a named top-level key holding a list of objects; the
    /// username sits in each object's `title` field.
    KeyedTitle,
    /// Object with a `string_list_data` list; usernames in each entry's
    /// `value` field.
    StringList,
    /// Object with a named top-level key whose first list element carries
    /// the `string_list_data` list.
    EmbeddedFirst,
    /// The raw value itself is a list; usernames in the first
    /// `string_list_data` entry of each item.
    TopLevelList,
    /// Object with a named top-level key holding a list of items; usernames
    /// in the first `string_list_data` entry of each item.
    KeyedStringList,
}

/// Extracts the deduplicated username set a raw value encodes under the
/// given variant. Missing keys, empty lists, and malformed entries are
/// skipped silently; a value that does not match the variant's shape at all
/// yields an empty set, never an error.
pub fn extract_usernames(
    value: &Value,
    variant: Variant,
    root_key: Option<&str>,
) -> BTreeSet<String> {
    match variant {
        Variant::KeyedTitle => keyed_entries(value, root_key)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| username_field(item, "title"))
                    .collect()
            })
            .unwrap_or_default(),
        Variant::StringList => string_list_values(value).collect(),
        Variant::EmbeddedFirst => keyed_entries(value, root_key)
            .and_then(|items| items.first())
            .map(|first| string_list_values(first).collect())
            .unwrap_or_default(),
        Variant::TopLevelList => value
            .as_array()
            .map(|items| items.iter().filter_map(first_string_value).collect())
            .unwrap_or_default(),
        Variant::KeyedStringList => keyed_entries(value, root_key)
            .map(|items| items.iter().filter_map(first_string_value).collect())
            .unwrap_or_default(),
    }
}

/// Order-preserving extraction for the top-level-list shape. The export
/// writes followers most-recent-first; duplicates keep their first position.
pub fn extract_ordered(value: &Value) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut ordered = Vec::new();

    if let Some(items) = value.as_array() {
        for item in items {
            if let Some(username) = first_string_value(item) {
                if seen.insert(username.clone()) {
                    ordered.push(username);
                }
            }
        }
    }
    ordered
}

fn keyed_entries<'a>(value: &'a Value, root_key: Option<&str>) -> Option<&'a Vec<Value>> {
    value.get(root_key?)?.as_array()
}

fn string_list_values(value: &Value) -> impl Iterator<Item = String> + '_ {
    value
        .get("string_list_data")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| username_field(entry, "value"))
}

fn first_string_value(item: &Value) -> Option<String> {
    let entry = item.get("string_list_data")?.as_array()?.first()?;
    username_field(entry, "value")
}

fn username_field(item: &Value, field: &str) -> Option<String> {
    let name = item.get(field)?.as_str()?;
    (!name.is_empty()).then(|| name.to_string())
}
