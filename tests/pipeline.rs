use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::json;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use followee::analysis::analyze_extracted;
use followee::archive::{cleanup, unpack_archive};
use followee::session::Session;

// A realistic export: content wrapped one level down in a dated folder, the
// way real archives often arrive.
fn write_export_zip(path: &Path) {
    let prefix = "export-2025-11-09/connections/followers_and_following";
    let options = SimpleFileOptions::default();
    let mut zip = ZipWriter::new(fs::File::create(path).unwrap());

    let followers = json!([
        {"string_list_data": [{"href": "https://example.com/a", "value": "a", "timestamp": 3}]},
        {"string_list_data": [{"href": "https://example.com/b", "value": "b", "timestamp": 2}]},
        {"string_list_data": [{"href": "https://example.com/c", "value": "c", "timestamp": 1}]}
    ]);
    let following = json!({
        "relationships_following": [
            {"title": "b"},
            {"title": "c"},
            {"title": "d"}
        ]
    });
    let unfollowed = json!({
        "relationships_unfollowed_users": [
            {"string_list_data": [{"value": "gone", "timestamp": 9}]}
        ]
    });

    for (file_name, value) in [
        ("followers_1.json", &followers),
        ("following.json", &following),
        ("recently_unfollowed_profiles.json", &unfollowed),
    ] {
        zip.start_file(format!("{}/{}", prefix, file_name), options)
            .unwrap();
        zip.write_all(&serde_json::to_vec(value).unwrap()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn unpack_analyze_cleanup_end_to_end() {
    let data_dir = tempfile::tempdir().unwrap();
    let session = Session::new(
        data_dir.path(),
        "https://example.com/export.zip",
        "integration",
    )
    .unwrap();
    write_export_zip(&session.zip_path);

    unpack_archive(&session).unwrap();
    let result = analyze_extracted(&session.extraction_path, 2).unwrap();

    assert_eq!(result.metrics.total_followers, 3);
    assert_eq!(result.metrics.total_following, 3);
    assert_eq!(result.metrics.mutual_following_count, 2);
    assert_eq!(result.user_lists.mutual_following_list, ["b", "c"]);
    assert_eq!(result.user_lists.not_following_back_list, ["d"]);
    assert_eq!(result.user_lists.you_not_following_list, ["a"]);
    assert_eq!(result.user_lists.recent_followers_list, ["a", "b"]);
    assert_eq!(result.metrics.unfollowed_count, 1);
    assert_eq!(result.user_lists.unfollowed_list, ["gone"]);

    // Datasets absent from the archive degrade to zero, nothing fatal.
    assert_eq!(result.metrics.blocked_count, 0);
    assert!(result.user_lists.blocked_list.is_empty());
    assert_eq!(result.metrics.pending_requests_count, 0);

    cleanup(&session);
    assert!(!session.zip_path.exists());
    assert!(!session.extraction_path.exists());
}

#[test]
fn rerunning_the_same_session_is_idempotent() {
    let data_dir = tempfile::tempdir().unwrap();
    let session = Session::new(
        data_dir.path(),
        "https://example.com/export.zip",
        "idempotence",
    )
    .unwrap();
    write_export_zip(&session.zip_path);

    unpack_archive(&session).unwrap();
    let first = analyze_extracted(&session.extraction_path, 15).unwrap();

    unpack_archive(&session).unwrap();
    let second = analyze_extracted(&session.extraction_path, 15).unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );

    cleanup(&session);
}
