use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use semver::Version;
use tempfile::TempDir;
use ubump_core::BumpType;
use ubump_git::{CommitInfo, FileChange, GitError, TagInfo};

use crate::Result;
use crate::traits::{
    BumpSelection, BumpTarget, CommitDecision, Confirmation, GitProvider, HygieneChoice,
    InteractionProvider, PreidInput, StagedChoice,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    StageFiles(Vec<PathBuf>),
    StageAll,
    UnstageAll,
    Commit(String),
    UndoLastCommit,
    Push { set_upstream: bool },
    PushTag(String),
    CreateTag { name: String, message: String },
    DeleteBranch(String),
    SubtreeSplit { branch: String, directory: String },
    Checkout(String),
    ForcePushUpstream(String),
}

pub struct MockGitProvider {
    root: PathBuf,
    branch: String,
    tracking: Option<String>,
    ahead: bool,
    unstaged: Vec<PathBuf>,
    staged: Vec<PathBuf>,
    changed_files: Vec<FileChange>,
    uncommitted: Vec<PathBuf>,
    existing_tags: Vec<String>,
    failing_splits: Vec<String>,
    previous_tag: Option<String>,
    changelog: Vec<String>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            branch: "master".to_string(),
            tracking: Some("origin/master".to_string()),
            ahead: false,
            unstaged: Vec::new(),
            staged: Vec::new(),
            changed_files: Vec::new(),
            uncommitted: Vec::new(),
            existing_tags: Vec::new(),
            failing_splits: Vec::new(),
            previous_tag: None,
            changelog: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_branch(mut self, branch: &str, tracking: Option<&str>) -> Self {
        self.branch = branch.to_string();
        self.tracking = tracking.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_unstaged(mut self, files: Vec<PathBuf>) -> Self {
        self.unstaged = files;
        self
    }

    #[must_use]
    pub fn with_staged(mut self, files: Vec<PathBuf>) -> Self {
        self.staged = files;
        self
    }

    #[must_use]
    pub fn with_unpushed_changes(mut self, files: Vec<FileChange>) -> Self {
        self.ahead = true;
        self.changed_files = files;
        self
    }

    #[must_use]
    pub fn with_uncommitted(mut self, files: Vec<PathBuf>) -> Self {
        self.uncommitted = files;
        self
    }

    #[must_use]
    pub fn with_existing_tag(mut self, name: &str) -> Self {
        self.existing_tags.push(name.to_string());
        self
    }

    #[must_use]
    pub fn with_failing_split(mut self, branch: &str) -> Self {
        self.failing_splits.push(branch.to_string());
        self
    }

    #[must_use]
    pub fn with_history(mut self, previous_tag: Option<&str>, changelog: &[&str]) -> Self {
        self.previous_tag = previous_tag.map(str::to_string);
        self.changelog = changelog.iter().map(|line| (*line).to_string()).collect();
        self
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().expect("lock poisoned").push(call);
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitCall::StageFiles(paths) => Some(paths),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitCall::Commit(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tags_created(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitCall::CreateTag { name, message } => Some((name, message)),
                _ => None,
            })
            .collect()
    }
}

impl GitProvider for MockGitProvider {
    fn repository_root(&self, _project_root: &Path) -> Result<PathBuf> {
        Ok(self.root.clone())
    }

    fn current_branch(&self, _project_root: &Path) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn tracking_branch(&self, _project_root: &Path) -> Result<Option<String>> {
        Ok(self.tracking.clone())
    }

    fn commits_ahead(&self, _project_root: &Path, _tracking: &str, _current: &str) -> Result<bool> {
        Ok(self.ahead)
    }

    fn has_unstaged_changes(&self, _project_root: &Path) -> Result<bool> {
        Ok(!self.unstaged.is_empty())
    }

    fn has_staged_changes(&self, _project_root: &Path) -> Result<bool> {
        Ok(!self.staged.is_empty())
    }

    fn unstaged_files(&self, _project_root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.unstaged.clone())
    }

    fn staged_files(&self, _project_root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.staged.clone())
    }

    fn uncommitted_files(&self, _project_root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.uncommitted.clone())
    }

    fn changed_files(
        &self,
        _project_root: &Path,
        _base: &str,
        _head: &str,
    ) -> Result<Vec<FileChange>> {
        Ok(self.changed_files.clone())
    }

    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.record(GitCall::StageFiles(
            paths.iter().map(|p| p.to_path_buf()).collect(),
        ));
        Ok(())
    }

    fn stage_all(&self, _project_root: &Path) -> Result<()> {
        self.record(GitCall::StageAll);
        Ok(())
    }

    fn unstage_all(&self, _project_root: &Path) -> Result<()> {
        self.record(GitCall::UnstageAll);
        Ok(())
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.record(GitCall::Commit(message.to_string()));
        Ok(CommitInfo {
            sha: "abc1234".to_string(),
            message: message.to_string(),
        })
    }

    fn undo_last_commit(&self, _project_root: &Path) -> Result<()> {
        self.record(GitCall::UndoLastCommit);
        Ok(())
    }

    fn push(&self, _project_root: &Path, set_upstream: bool) -> Result<()> {
        self.record(GitCall::Push { set_upstream });
        Ok(())
    }

    fn push_tag(&self, _project_root: &Path, tag_name: &str) -> Result<()> {
        self.record(GitCall::PushTag(tag_name.to_string()));
        Ok(())
    }

    fn create_tag(&self, _project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        if self.existing_tags.iter().any(|t| t == tag_name) {
            return Err(GitError::TagAlreadyExists {
                name: tag_name.to_string(),
            }
            .into());
        }
        self.record(GitCall::CreateTag {
            name: tag_name.to_string(),
            message: message.to_string(),
        });
        Ok(TagInfo {
            name: tag_name.to_string(),
            target_sha: "abc1234".to_string(),
        })
    }

    fn latest_tag(&self, _project_root: &Path, _pattern: Option<&str>) -> Result<Option<String>> {
        Ok(self.previous_tag.clone())
    }

    fn changelog_since(&self, _project_root: &Path, _since: Option<&str>) -> Result<Vec<String>> {
        Ok(self.changelog.clone())
    }

    fn delete_branch(&self, _project_root: &Path, branch: &str) -> bool {
        self.record(GitCall::DeleteBranch(branch.to_string()));
        false
    }

    fn subtree_split(&self, _project_root: &Path, branch: &str, directory: &str) -> Result<()> {
        if self.failing_splits.iter().any(|b| b == branch) {
            return Err(GitError::CommandFailed {
                command: format!("git subtree split -P {directory} -b {branch}"),
                stderr: "fatal: simulated failure".to_string(),
            }
            .into());
        }
        self.record(GitCall::SubtreeSplit {
            branch: branch.to_string(),
            directory: directory.to_string(),
        });
        Ok(())
    }

    fn checkout(&self, _project_root: &Path, branch: &str) -> Result<()> {
        self.record(GitCall::Checkout(branch.to_string()));
        Ok(())
    }

    fn force_push_upstream(&self, _project_root: &Path, branch: &str) -> Result<()> {
        self.record(GitCall::ForcePushUpstream(branch.to_string()));
        Ok(())
    }
}

/// Answers prompts from per-prompt queues. An empty bump queue cancels; every
/// other empty queue accepts.
#[derive(Default)]
pub struct ScriptedInteraction {
    branch: Mutex<VecDeque<Confirmation>>,
    unstaged: Mutex<VecDeque<HygieneChoice>>,
    staged: Mutex<VecDeque<StagedChoice>>,
    bumps: Mutex<VecDeque<BumpSelection>>,
    preids: Mutex<VecDeque<String>>,
    versions: Mutex<VecDeque<Confirmation>>,
    dependency_syncs: Mutex<VecDeque<Confirmation>>,
    commit: Mutex<VecDeque<CommitDecision>>,
    push: Mutex<VecDeque<Confirmation>>,
    subtree: Mutex<VecDeque<Confirmation>>,
    again: Mutex<VecDeque<Confirmation>>,
    prompts: Mutex<Vec<String>>,
}

fn pop_or<T>(queue: &Mutex<VecDeque<T>>, default: T) -> T {
    queue
        .lock()
        .expect("lock poisoned")
        .pop_front()
        .unwrap_or(default)
}

impl ScriptedInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bumps(self, bumps: Vec<BumpSelection>) -> Self {
        *self.bumps.lock().expect("lock poisoned") = bumps.into();
        self
    }

    /// Shorthand for a list of selected bump types, `None` meaning no change.
    #[must_use]
    pub fn with_bump_types(self, bumps: &[Option<BumpType>]) -> Self {
        self.with_bumps(
            bumps
                .iter()
                .map(|b| b.map_or(BumpSelection::NoChange, BumpSelection::Selected))
                .collect(),
        )
    }

    #[must_use]
    pub fn with_preids(self, preids: &[&str]) -> Self {
        *self.preids.lock().expect("lock poisoned") =
            preids.iter().map(|p| (*p).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_version_confirmations(self, answers: Vec<Confirmation>) -> Self {
        *self.versions.lock().expect("lock poisoned") = answers.into();
        self
    }

    #[must_use]
    pub fn with_branch_confirmation(self, answer: Confirmation) -> Self {
        self.branch.lock().expect("lock poisoned").push_back(answer);
        self
    }

    #[must_use]
    pub fn with_unstaged_choices(self, choices: Vec<HygieneChoice>) -> Self {
        *self.unstaged.lock().expect("lock poisoned") = choices.into();
        self
    }

    #[must_use]
    pub fn with_staged_choices(self, choices: Vec<StagedChoice>) -> Self {
        *self.staged.lock().expect("lock poisoned") = choices.into();
        self
    }

    #[must_use]
    pub fn with_dependency_syncs(self, answers: Vec<Confirmation>) -> Self {
        *self.dependency_syncs.lock().expect("lock poisoned") = answers.into();
        self
    }

    #[must_use]
    pub fn with_commit(self, decision: CommitDecision) -> Self {
        self.commit.lock().expect("lock poisoned").push_back(decision);
        self
    }

    #[must_use]
    pub fn with_push(self, answer: Confirmation) -> Self {
        self.push.lock().expect("lock poisoned").push_back(answer);
        self
    }

    #[must_use]
    pub fn with_subtree(self, answer: Confirmation) -> Self {
        self.subtree.lock().expect("lock poisoned").push_back(answer);
        self
    }

    fn note(&self, prompt: String) {
        self.prompts.lock().expect("lock poisoned").push(prompt);
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

impl InteractionProvider for ScriptedInteraction {
    fn confirm_untracked_branch(&self, current: &str, expected: &str) -> Result<Confirmation> {
        self.note(format!("branch {current} vs {expected}"));
        Ok(pop_or(&self.branch, Confirmation::Confirmed))
    }

    fn unstaged_changes(&self, after_listing: bool) -> Result<HygieneChoice> {
        self.note(format!("unstaged listed={after_listing}"));
        Ok(pop_or(&self.unstaged, HygieneChoice::Leave))
    }

    fn staged_changes(&self, after_listing: bool) -> Result<StagedChoice> {
        self.note(format!("staged listed={after_listing}"));
        Ok(pop_or(&self.staged, StagedChoice::Keep))
    }

    fn show_files(&self, files: &[PathBuf]) -> Result<()> {
        self.note(format!("show {}", files.len()));
        Ok(())
    }

    fn select_bump(
        &self,
        target: BumpTarget<'_>,
        current: &Version,
        _previews: &[(BumpType, Version)],
    ) -> Result<BumpSelection> {
        self.note(format!("bump {} {current}", target.name()));
        Ok(pop_or(&self.bumps, BumpSelection::Cancelled))
    }

    fn input_preid(&self, default: &str) -> Result<PreidInput> {
        self.note(format!("preid default={default}"));
        Ok(PreidInput::Provided(pop_or(
            &self.preids,
            default.to_string(),
        )))
    }

    fn confirm_version(&self, version: &Version) -> Result<Confirmation> {
        self.note(format!("confirm {version}"));
        Ok(pop_or(&self.versions, Confirmation::Confirmed))
    }

    fn confirm_dependency_sync(&self, package_name: &str) -> Result<Confirmation> {
        self.note(format!("sync {package_name}"));
        Ok(pop_or(&self.dependency_syncs, Confirmation::Confirmed))
    }

    fn commit_decision(&self, message: &str) -> Result<CommitDecision> {
        self.note(format!("commit {message}"));
        Ok(pop_or(
            &self.commit,
            CommitDecision::Commit(message.to_string()),
        ))
    }

    fn confirm_push(&self) -> Result<Confirmation> {
        self.note("push".to_string());
        Ok(pop_or(&self.push, Confirmation::Confirmed))
    }

    fn confirm_subtree_split(&self, package_count: usize) -> Result<Confirmation> {
        self.note(format!("subtree {package_count}"));
        Ok(pop_or(&self.subtree, Confirmation::Confirmed))
    }

    fn confirm_again(&self) -> Result<Confirmation> {
        self.note("again".to_string());
        Ok(pop_or(&self.again, Confirmation::Confirmed))
    }
}

/// A throwaway Unity project on disk.
pub struct ProjectFixture {
    _dir: TempDir,
    root: PathBuf,
}

impl ProjectFixture {
    /// # Panics
    ///
    /// Panics if the project files cannot be written.
    #[must_use]
    pub fn new(version: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = dunce::canonicalize(dir.path()).expect("canonical temp dir");

        let fixture = Self { _dir: dir, root };
        fixture.write(
            "ProjectSettings/ProjectSettings.asset",
            &format!(
                "%YAML 1.1\n--- !u!129 &1\nPlayerSettings:\n  productName: Space Game\n  bundleVersion: {version}\n  iPhoneBundleVersion: 7\n"
            ),
        );
        fixture.write(
            "ProjectSettings/ProjectVersion.txt",
            "m_EditorVersion: 2019.3.0f6\nm_EditorVersionWithRevision: 2019.3.0f6 (27ab2135bccf)\n",
        );
        fixture.write(
            "Packages/manifest.json",
            "{\n  \"dependencies\": {\n    \"com.unity.textmeshpro\": \"2.0.1\",\n    \"com.unity.ugui\": \"1.0.0\"\n  }\n}\n",
        );
        fixture
    }

    /// # Panics
    ///
    /// Panics if the package cannot be written.
    #[must_use]
    pub fn with_package(self, directory: &str, manifest: &str) -> Self {
        self.write(&format!("{directory}/package.json"), manifest);
        self
    }

    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(path, content).expect("write fixture file");
    }

    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root.join(relative)).expect("read fixture file")
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A minimal `package.json` body.
#[must_use]
pub fn package_json(name: &str, display_name: &str, version: &str, deps: &[(&str, &str)]) -> String {
    let deps = deps
        .iter()
        .map(|(dep, range)| format!("\t\t\"{dep}\": \"{range}\""))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "{{\n\t\"name\": \"{name}\",\n\t\"displayName\": \"{display_name}\",\n\t\"version\": \"{version}\",\n\t\"unity\": \"2019.3\",\n\t\"dependencies\": {{\n{deps}\n\t}}\n}}\n"
    )
}
