use std::path::Path;

use tempfile::TempDir;
use ubump_manifest::PackageDocument;
use ubump_operations::OperationError;
use ubump_operations::operations::{
    BumpOperation, has_syncable_diffs, sync_internal_refs, sync_package_deps,
};
use ubump_operations::providers::{FileSystemManifestStore, Git2Provider};
use ubump_operations::traits::{GitProvider, ManifestStore};
use ubump_project::{ReleaseConfig, discover_project};

fn write(root: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

const SETTINGS: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!129 &1\nPlayerSettings:\n  productName: Space Game\n  bundleVersion: 1.0.0\n  iPhoneBundleVersion: 7\n";

fn create_unity_project() -> anyhow::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    write(root, "ProjectSettings/ProjectSettings.asset", SETTINGS)?;
    write(root, "ProjectSettings/ProjectVersion.txt", "m_EditorVersion: 2019.3.0f6\n")?;
    write(
        root,
        "Packages/manifest.json",
        "{\n  \"dependencies\": {\n    \"com.unity.ugui\": \"1.0.0\",\n    \"com.unity.textmeshpro\": \"2.0.1\"\n  }\n}\n",
    )?;
    write(
        root,
        "Assets/Core/package.json",
        "{\n  \"name\": \"com.acme.core\",\n  \"displayName\": \"Core\",\n  \"version\": \"0.6.0\"\n}\n",
    )?;
    write(
        root,
        "Assets/Tool/package.json",
        "{\n  \"name\": \"com.acme.tool\",\n  \"displayName\": \"Tool\",\n  \"version\": \"0.9\",\n  \"unity\": \"2019.2\",\n  \"unityRelease\": \"0f6\",\n  \"dependencies\": {\n    \"com.acme.core\": \"~0.5.0\",\n    \"com.unity.ugui\": \"0.9.0\",\n    \"com.unity.timeline\": \"1.2.0\"\n  }\n}\n",
    )?;
    Ok(dir)
}

#[test]
fn bump_package_coerces_short_versions_and_writes_back() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let op = BumpOperation::new(FileSystemManifestStore::new());

    let bumped = op.bump_package(&dir.path().join("Assets/Tool"), "patch", None)?;

    assert_eq!(bumped.to_string(), "0.9.1");
    let document = PackageDocument::load(&dir.path().join("Assets/Tool/package.json"))?;
    assert_eq!(document.version()?.to_string(), "0.9.1");
    Ok(())
}

#[test]
fn bump_project_keeps_the_rest_of_the_settings() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let op = BumpOperation::new(FileSystemManifestStore::new());

    let bumped = op.bump_project(dir.path(), " PreMinor ", Some("beta"))?;

    assert_eq!(bumped.to_string(), "1.1.0-beta.0");
    let settings = std::fs::read_to_string(dir.path().join("ProjectSettings/ProjectSettings.asset"))?;
    assert_eq!(settings, SETTINGS.replace("1.0.0", "1.1.0-beta.0"));
    Ok(())
}

#[test]
fn invalid_bump_type_leaves_files_untouched() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let op = BumpOperation::new(FileSystemManifestStore::new());

    let result = op.bump_project(dir.path(), "sideways", None);

    assert!(matches!(result, Err(OperationError::Core(_))));
    let settings = std::fs::read_to_string(dir.path().join("ProjectSettings/ProjectSettings.asset"))?;
    assert_eq!(settings, SETTINGS);
    Ok(())
}

#[test]
fn invalid_package_version_is_reported_before_writing() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let manifest = "{\"name\": \"com.acme.broken\", \"version\": \"asdf\"}";
    write(dir.path(), "Assets/Broken/package.json", manifest)?;
    let op = BumpOperation::new(FileSystemManifestStore::new());

    let result = op.bump_package(&dir.path().join("Assets/Broken"), "patch", None);

    match result {
        Err(OperationError::Manifest(err)) => assert!(err.as_version_error().is_some()),
        other => panic!("expected manifest error, got {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Assets/Broken/package.json"))?,
        manifest
    );
    Ok(())
}

#[test]
fn sync_package_deps_is_idempotent() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let store = FileSystemManifestStore::new();
    let tool = dir.path().join("Assets/Tool");

    assert!(has_syncable_diffs(&store, &tool, dir.path(), true)?);
    assert!(sync_package_deps(&store, &tool, dir.path(), true)?);

    let document = PackageDocument::load(&tool)?;
    let deps = document.dependencies();
    assert_eq!(deps.get("com.unity.ugui").map(String::as_str), Some("1.0.0"));
    assert_eq!(deps.get("com.unity.timeline").map(String::as_str), Some("1.2.0"));
    assert_eq!(deps.get("com.acme.core").map(String::as_str), Some("~0.5.0"));
    assert_eq!(document.environment_field("unity"), Some("2019.3"));
    assert_eq!(document.environment_field("unityRelease"), Some("0f6"));

    let written = std::fs::read_to_string(tool.join("package.json"))?;
    assert!(!has_syncable_diffs(&store, &tool, dir.path(), true)?);
    assert!(!sync_package_deps(&store, &tool, dir.path(), true)?);
    assert_eq!(std::fs::read_to_string(tool.join("package.json"))?, written);
    Ok(())
}

#[test]
fn editor_version_sync_can_be_turned_off() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let store = FileSystemManifestStore::new();
    let tool = dir.path().join("Assets/Tool");

    sync_package_deps(&store, &tool, dir.path(), false)?;

    let document = PackageDocument::load(&tool)?;
    assert_eq!(document.environment_field("unity"), Some("2019.2"));
    Ok(())
}

#[test]
fn internal_refs_follow_sibling_versions() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let store = FileSystemManifestStore::new();
    let project = discover_project(dir.path(), &ReleaseConfig::default())?;

    let rewritten = sync_internal_refs(&store, &project)?;

    assert_eq!(rewritten, vec![project.root().join("Assets/Tool/package.json")]);
    let document = PackageDocument::load(&dir.path().join("Assets/Tool"))?;
    let deps = document.dependencies();
    assert_eq!(deps.get("com.acme.core").map(String::as_str), Some("~0.6.0"));
    assert_eq!(deps.get("com.unity.ugui").map(String::as_str), Some("0.9.0"));

    assert!(sync_internal_refs(&store, &project)?.is_empty());
    Ok(())
}

fn init_repo(root: &Path) -> anyhow::Result<git2::Repository> {
    let repo = git2::Repository::init(root)?;
    let mut config = repo.config()?;
    config.set_str("user.name", "Test")?;
    config.set_str("user.email", "test@example.com")?;

    let mut index = repo.index()?;
    index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let sig = git2::Signature::now("Test", "test@example.com")?;
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?;
    drop(tree);
    Ok(repo)
}

#[test]
fn git_provider_stages_commits_and_rolls_back_softly() -> anyhow::Result<()> {
    let dir = create_unity_project()?;
    let root = dunce::canonicalize(dir.path())?;
    init_repo(&root)?;
    let git = Git2Provider::new();
    let store = FileSystemManifestStore::new();

    BumpOperation::new(FileSystemManifestStore::new()).bump_project(&root, "minor", None)?;
    let settings = root.join("ProjectSettings/ProjectSettings.asset");
    git.stage_files(&root, &[settings.as_path()])?;
    assert!(git.has_staged_changes(&root)?);

    git.commit(&root, "Bump project to v1.1.0")?;
    assert!(!git.has_staged_changes(&root)?);
    assert_eq!(git.changelog_since(&root, Some("HEAD~1"))?.len(), 1);

    git.undo_last_commit(&root)?;

    assert!(git.has_unstaged_changes(&root)?);
    assert!(!git.has_staged_changes(&root)?);
    assert_eq!(store.project_version(&root)?.to_string(), "1.1.0");
    Ok(())
}
