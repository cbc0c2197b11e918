//! Traversal behavior over configs loaded from disk
//!
//! A recording backend replaces the real tools so these tests can assert
//! exactly which canonical paths get dispatched, while the configs still
//! flow through file loading and registry construction.

use std::fs;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use psync_core::{
    load_config, ApplyOptions, BackendSet, MergeStyle, Outcome, Registry, SilentProgress,
    SyncBackend, SyncEngine,
};
use psync_fs::SyncPath;
use tempfile::TempDir;

/// Records every dispatched path; always succeeds.
#[derive(Clone, Default)]
struct Recording {
    paths: Arc<Mutex<Vec<String>>>,
}

impl Recording {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    fn record(&self, path: &SyncPath) -> Outcome {
        self.paths.lock().unwrap().push(path.as_str().to_string());
        Outcome::Success
    }
}

impl SyncBackend for Recording {
    fn update(
        &self,
        path: &SyncPath,
        _origin: Option<&str>,
        _merge: MergeStyle,
        _show_output: bool,
    ) -> Outcome {
        self.record(path)
    }

    fn push(&self, path: &SyncPath, _dest: Option<&str>, _show_output: bool) -> Outcome {
        self.record(path)
    }

    fn resolve(&self, path: &SyncPath, _show_output: bool) -> Outcome {
        self.record(path)
    }
}

fn engine_from(config_dir: &TempDir, content: &str, backend: Recording) -> SyncEngine {
    let path = config_dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    let registry = Registry::from_raw(load_config(&path).unwrap()).unwrap();
    let mut backends = BackendSet::new("git");
    backends.register("git", Box::new(backend));
    SyncEngine::new(registry, backends)
}

fn update_all(engine: &SyncEngine) {
    engine.update(None, &ApplyOptions::default(), &mut SilentProgress);
}

#[test]
fn test_spelling_variants_of_one_directory_dispatch_once() {
    let data = TempDir::new().unwrap();
    let target = data.path().join("tracked");
    fs::create_dir(&target).unwrap();
    let spelled = target.to_string_lossy();

    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        &format!(
            "[[project]]\nname = \"a\"\n[[project.item]]\npath = \"{spelled}\"\n\
             [[project]]\nname = \"b\"\n[[project.item]]\npath = \"{spelled}/\"\n\
             [[project]]\nname = \"c\"\n[[project.item]]\npath = \"{spelled}/extra/..\"\n"
        ),
        backend.clone(),
    );
    update_all(&engine);

    // One canonical spelling, one dispatch, trailing separator because the
    // directory exists.
    assert_eq!(backend.paths(), vec![format!("{spelled}/")]);
}

#[test]
fn test_cycle_between_projects_terminates_with_each_path_once() {
    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\nname = \"a\"\n\
         [[project.item]]\npath = \"/no-such-psync/a\"\n\
         [[project.item]]\nreference = \"b\"\n\
         [[project]]\nname = \"b\"\n\
         [[project.item]]\npath = \"/no-such-psync/b\"\n\
         [[project.item]]\nreference = \"a\"\n",
        backend.clone(),
    );
    update_all(&engine);

    assert_eq!(
        backend.paths(),
        vec!["/no-such-psync/a", "/no-such-psync/b"]
    );
}

#[test]
fn test_diamond_of_references_dispatches_the_tip_once() {
    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\nname = \"root\"\n\
         [[project.item]]\nreference = \"left\"\n\
         [[project.item]]\nreference = \"right\"\n\
         [[project]]\nname = \"left\"\nauto = false\n\
         [[project.item]]\nreference = \"tip\"\n\
         [[project]]\nname = \"right\"\nauto = false\n\
         [[project.item]]\nreference = \"tip\"\n\
         [[project]]\nname = \"tip\"\nauto = false\n\
         [[project.item]]\npath = \"/no-such-psync/tip\"\n",
        backend.clone(),
    );
    update_all(&engine);

    assert_eq!(backend.paths(), vec!["/no-such-psync/tip"]);
}

#[test]
fn test_string_false_auto_flag_excludes_a_project_from_default_runs() {
    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\nname = \"on\"\n[[project.item]]\npath = \"/no-such-psync/on\"\n\
         [[project]]\nname = \"off\"\nauto = \"false\"\n\
         [[project.item]]\npath = \"/no-such-psync/off\"\n",
        backend.clone(),
    );
    update_all(&engine);

    assert_eq!(backend.paths(), vec!["/no-such-psync/on"]);
}

#[test]
fn test_position_selects_anonymous_projects_from_a_file() {
    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\n[[project.item]]\npath = \"/no-such-psync/first\"\n\
         [[project]]\n[[project.item]]\npath = \"/no-such-psync/second\"\n",
        backend.clone(),
    );
    let selectors = vec!["2".to_string()];
    let report = engine.update(
        Some(&selectors),
        &ApplyOptions::default(),
        &mut SilentProgress,
    );

    assert!(report.is_clean());
    assert_eq!(backend.paths(), vec!["/no-such-psync/second"]);
}

#[test]
fn test_tilde_paths_canonicalize_under_home() {
    // Only meaningful where a home directory exists; the path itself is
    // never touched because the backend is a recorder.
    let Some(home) = dirs::home_dir() else { return };

    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\nname = \"home\"\n\
         [[project.item]]\npath = \"~/no-such-psync-home/repo\"\n",
        backend.clone(),
    );
    update_all(&engine);

    let expected = format!(
        "{}/no-such-psync-home/repo",
        home.to_string_lossy().replace('\\', "/")
    );
    assert_eq!(backend.paths(), vec![expected]);
}

#[test]
fn test_unknown_reference_recorded_and_rest_still_runs() {
    let backend = Recording::default();
    let config_dir = TempDir::new().unwrap();
    let engine = engine_from(
        &config_dir,
        "[[project]]\nname = \"a\"\n\
         [[project.item]]\nreference = \"ghost\"\n\
         [[project.item]]\npath = \"/no-such-psync/a\"\n",
        backend.clone(),
    );
    let report = engine.update(None, &ApplyOptions::default(), &mut SilentProgress);

    assert_eq!(report.unknown_projects, vec!["ghost"]);
    assert_eq!(report.failed_projects, vec!["a"]);
    assert_eq!(backend.paths(), vec!["/no-such-psync/a"]);
}
