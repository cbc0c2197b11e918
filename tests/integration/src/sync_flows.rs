//! End-to-end flows against real git repositories
//!
//! These tests exercise the complete chain: config file -> registry ->
//! engine -> git subprocess -> remote, using local bare origins only.

use std::fs;
use std::path::Path;

use psync_core::{
    load_config, ApplyOptions, BackendSet, Registry, SilentProgress, SyncEngine,
};
use psync_test_utils::remote::RemoteFixture;
use tempfile::TempDir;

/// Write `content` as a config file and return its directory and path.
fn config_file(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (temp, path)
}

fn engine_from_config(path: &Path) -> SyncEngine {
    let defs = load_config(path).unwrap();
    let registry = Registry::from_raw(defs).unwrap();
    SyncEngine::new(registry, BackendSet::with_defaults())
}

#[test]
fn test_update_pulls_remote_changes_through_the_whole_stack() {
    let fixture = RemoteFixture::new();
    fixture.publish_change("data.txt", "published\n", "remote edit");

    let (_dir, config) = config_file(&format!(
        "[[project]]\nname = \"work\"\n[[project.item]]\npath = \"{}\"\n",
        fixture.clone_dir().to_string_lossy()
    ));

    let engine = engine_from_config(&config);
    let report = engine.update(None, &ApplyOptions::default(), &mut SilentProgress);

    assert!(report.is_clean(), "report was: {report:?}");
    let pulled = fs::read_to_string(fixture.clone_dir().join("data.txt")).unwrap();
    assert_eq!(pulled, "published\n");
}

#[test]
fn test_push_sends_local_edits_to_the_origin() {
    let fixture = RemoteFixture::new();
    fs::write(fixture.clone_dir().join("local.txt"), "local work\n").unwrap();

    let (_dir, config) = config_file(&format!(
        "[[project]]\nname = \"work\"\n[[project.item]]\npath = \"{}\"\n",
        fixture.clone_dir().to_string_lossy()
    ));

    let engine = engine_from_config(&config);
    let selectors = vec!["work".to_string()];
    let report = engine.push(
        Some(&selectors),
        &ApplyOptions::default(),
        &mut SilentProgress,
    );

    assert!(report.is_clean(), "report was: {report:?}");
    assert!(
        fixture.origin_log().contains("psync commit from"),
        "origin log was: {}",
        fixture.origin_log()
    );
}

#[test]
fn test_reference_pulls_the_referenced_project() {
    let fixture = RemoteFixture::new();
    fixture.publish_change("shared.txt", "via reference\n", "remote edit");

    let (_dir, config) = config_file(&format!(
        "[[project]]\nname = \"everything\"\n[[project.item]]\nreference = \"work\"\n\
         [[project]]\nname = \"work\"\nauto = false\n[[project.item]]\npath = \"{}\"\n",
        fixture.clone_dir().to_string_lossy()
    ));

    let engine = engine_from_config(&config);
    let selectors = vec!["everything".to_string()];
    let report = engine.update(
        Some(&selectors),
        &ApplyOptions::default(),
        &mut SilentProgress,
    );

    assert!(report.is_clean(), "report was: {report:?}");
    let pulled = fs::read_to_string(fixture.clone_dir().join("shared.txt")).unwrap();
    assert_eq!(pulled, "via reference\n");
}

#[test]
fn test_one_broken_path_does_not_stop_the_rest() {
    let fixture = RemoteFixture::new();
    fixture.publish_change("data.txt", "still synced\n", "remote edit");

    let (_dir, config) = config_file(&format!(
        "[[project]]\nname = \"mixed\"\n\
         [[project.item]]\npath = \"/no-such-psync/repo\"\n\
         [[project.item]]\npath = \"{}\"\n",
        fixture.clone_dir().to_string_lossy()
    ));

    let engine = engine_from_config(&config);
    let report = engine.update(None, &ApplyOptions::default(), &mut SilentProgress);

    assert_eq!(report.failed_projects, vec!["mixed"]);
    assert_eq!(report.failed_paths, vec!["/no-such-psync/repo"]);
    // The healthy path was still synchronized.
    let pulled = fs::read_to_string(fixture.clone_dir().join("data.txt")).unwrap();
    assert_eq!(pulled, "still synced\n");
}

#[test]
fn test_resolve_on_git_paths_reports_unsupported() {
    let fixture = RemoteFixture::new();

    let (_dir, config) = config_file(&format!(
        "[[project]]\nname = \"work\"\n[[project.item]]\npath = \"{}\"\n",
        fixture.clone_dir().to_string_lossy()
    ));

    let engine = engine_from_config(&config);
    let report = engine.resolve(None, &ApplyOptions::default(), &mut SilentProgress);

    assert!(!report.is_clean());
    assert_eq!(report.failed_projects, vec!["work"]);
    assert_eq!(report.failed_paths.len(), 1);
    assert_eq!(report.unsupported_paths, report.failed_paths);
}
