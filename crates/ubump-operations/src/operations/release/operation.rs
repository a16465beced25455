use std::path::{Path, PathBuf};

use semver::Version;
use ubump_core::BumpResult;
use ubump_git::GitError;
use ubump_manifest::{PACKAGE_MANIFEST, PROJECT_SETTINGS, resolve_path};
use ubump_project::{ReleaseConfig, UnityProject, map_files_to_packages};
use ubump_version::{bump_version, default_preid};

use super::message::{commit_message, package_tag_message, project_tag_message};
use super::session::{ReleaseSession, SplitReport, TagOutcome};
use crate::Result;
use crate::error::OperationError;
use crate::operations::bump::bump_previews;
use crate::operations::internal_refs::sync_internal_refs;
use crate::operations::reconcile::{has_syncable_diffs, sync_package_deps};
use crate::traits::{
    BumpSelection, BumpTarget, CommitDecision, Confirmation, GitProvider, HygieneChoice,
    InteractionProvider, ManifestStore, PreidInput, ProjectProvider, StagedChoice,
};

#[derive(Debug, Clone, Default)]
pub struct ReleaseInput {
    /// Overrides `project-tag-prefix` from `.ubump.toml`.
    pub project_tag_prefix: Option<String>,
    /// Overrides `package-tag-prefix` from `.ubump.toml`.
    pub package_tag_prefix: Option<String>,
    pub skip_commit: bool,
    pub skip_project: bool,
    pub skip_packages: bool,
    pub skip_project_tagging: bool,
    pub skip_package_tagging: bool,
    pub skip_project_tagging_changelog: bool,
    pub skip_package_tagging_changelog: bool,
    pub skip_locally_unchanged_packages: bool,
    pub skip_internal_ref_syncing: bool,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    /// Nothing was bumped, so nothing was committed.
    NoChanges,
    /// The user chose not to commit; bumped files stay staged.
    CommitDeclined(ReleaseSession),
    Cancelled {
        session: ReleaseSession,
        rolled_back: bool,
    },
    Completed(ReleaseSession),
}

enum Ending {
    NoChanges,
    CommitDeclined,
    Completed,
}

struct BranchState {
    current: String,
    tracking: Option<String>,
}

struct Run<'a> {
    project: &'a UnityProject,
    config: &'a ReleaseConfig,
    input: &'a ReleaseInput,
}

impl Run<'_> {
    fn root(&self) -> &Path {
        self.project.root()
    }
}

fn require(confirmation: Confirmation) -> Result<()> {
    match confirmation {
        Confirmation::Confirmed => Ok(()),
        Confirmation::Declined | Confirmation::Cancelled => Err(OperationError::Cancelled),
    }
}

fn relative_directory(repo_root: &Path, directory: &Path) -> Result<String> {
    let relative = directory
        .strip_prefix(repo_root)
        .map_err(|_| OperationError::PackageOutsideProject(directory.to_path_buf()))?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

pub struct ReleaseOperation<P, M, G, I> {
    project_provider: P,
    store: M,
    git: G,
    interaction: I,
}

#[cfg(test)]
impl<P, M, G, I> ReleaseOperation<P, M, G, I> {
    pub(crate) fn git_provider(&self) -> &G {
        &self.git
    }

    pub(crate) fn interaction(&self) -> &I {
        &self.interaction
    }
}

impl<P, M, G, I> ReleaseOperation<P, M, G, I>
where
    P: ProjectProvider,
    M: ManifestStore,
    G: GitProvider,
    I: InteractionProvider,
{
    pub fn new(project_provider: P, store: M, git: G, interaction: I) -> Self {
        Self {
            project_provider,
            store,
            git,
            interaction,
        }
    }

    /// Runs the interactive release. Cancelling after the commit but before
    /// the push undoes the commit and keeps the file changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is invalid or any step fails. Failures
    /// after the commit do not roll anything back.
    pub fn execute(&self, project_root: &Path, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        let mut config = self.project_provider.load_config(project_root)?;
        if let Some(prefix) = &input.project_tag_prefix {
            config = config.with_project_tag_prefix(prefix.clone());
        }
        if let Some(prefix) = &input.package_tag_prefix {
            config = config.with_package_tag_prefix(prefix.clone());
        }

        let project = self.project_provider.discover_project(project_root, &config)?;
        let run = Run {
            project: &project,
            config: &config,
            input,
        };

        let mut session = ReleaseSession::default();
        match self.run(&run, &mut session) {
            Ok(Ending::NoChanges) => Ok(ReleaseOutcome::NoChanges),
            Ok(Ending::CommitDeclined) => Ok(ReleaseOutcome::CommitDeclined(session)),
            Ok(Ending::Completed) => Ok(ReleaseOutcome::Completed(session)),
            Err(OperationError::Cancelled) => self.cancel(run.root(), session),
            Err(e) => Err(e),
        }
    }

    fn cancel(&self, root: &Path, mut session: ReleaseSession) -> Result<ReleaseOutcome> {
        if !session.needs_rollback() {
            tracing::debug!("release cancelled before anything needed undoing");
            return Ok(ReleaseOutcome::Cancelled {
                session,
                rolled_back: false,
            });
        }

        tracing::warn!("rolling back release commit, file changes are kept");
        self.git.undo_last_commit(root)?;
        session.committed = false;

        Ok(ReleaseOutcome::Cancelled {
            session,
            rolled_back: true,
        })
    }

    fn run(&self, run: &Run<'_>, session: &mut ReleaseSession) -> Result<Ending> {
        let root = run.root();
        let input = run.input;

        let branch = self.check_branch(root, run.config.expected_upstream())?;
        self.check_hygiene(root)?;

        if !input.skip_project {
            session.project_bump = self.bump_project(root, input.skip_commit)?;
        }

        let has_packages = run.project.packages().next().is_some();
        if !input.skip_packages && has_packages {
            for package_path in self.package_candidates(run, &branch)? {
                if !input.skip_commit {
                    self.offer_dependency_sync(run, package_path)?;
                }
                if let Some(bumped) = self.bump_package(root, package_path, input.skip_commit)? {
                    session.package_bumps.push(bumped);
                }
            }
        }

        if !input.skip_commit && !session.has_bumps() {
            tracing::debug!("no version changes reported");
            return Ok(Ending::NoChanges);
        }

        if !input.skip_commit
            && !input.skip_packages
            && has_packages
            && !input.skip_internal_ref_syncing
        {
            let rewritten = sync_internal_refs(&self.store, run.project)?;
            let paths: Vec<&Path> = rewritten.iter().map(PathBuf::as_path).collect();
            if !paths.is_empty() {
                self.git.stage_files(root, &paths)?;
            }
        }

        if !input.skip_commit {
            let message = commit_message(
                session.project_bump.as_ref(),
                &session.package_bumps,
                run.config.project_tag_prefix(),
                run.config.package_tag_prefix(),
            );

            match self.interaction.commit_decision(&message)? {
                CommitDecision::Commit(message) => {
                    let commit = self.git.commit(root, &message)?;
                    tracing::debug!(sha = %commit.sha, "committed release");
                    session.committed = true;
                    session.commit = Some(commit);
                }
                CommitDecision::Skip => return Ok(Ending::CommitDeclined),
                CommitDecision::Cancelled => return Err(OperationError::Cancelled),
            }

            require(self.interaction.confirm_push()?)?;
            require(self.interaction.confirm_again()?)?;
            self.git.push(root, branch.tracking.is_none())?;
            session.pushed = true;
        }

        if !input.skip_project && !input.skip_project_tagging {
            if let Some(version) = session.project_bump.clone() {
                session.project_tag = Some(self.tag_project(run, &version)?);
            }
        }

        if session.package_bumps.is_empty() || run.project.root_is_package() || input.skip_packages
        {
            return Ok(Ending::Completed);
        }

        require(
            self.interaction
                .confirm_subtree_split(session.package_bumps.len())?,
        )?;
        require(self.interaction.confirm_again()?)?;
        self.split_packages(run, session)?;

        Ok(Ending::Completed)
    }

    fn check_branch(&self, root: &Path, expected: &str) -> Result<BranchState> {
        let current = self.git.current_branch(root)?;
        let tracking = self.git.tracking_branch(root)?;

        if tracking.as_deref() != Some(expected) {
            tracing::debug!(branch = %current, ?tracking, expected, "branch does not track expected upstream");
            require(self.interaction.confirm_untracked_branch(&current, expected)?)?;
        }

        Ok(BranchState { current, tracking })
    }

    fn check_hygiene(&self, root: &Path) -> Result<()> {
        if self.git.has_unstaged_changes(root)? {
            let mut after_listing = false;
            loop {
                match self.interaction.unstaged_changes(after_listing)? {
                    HygieneChoice::Leave => break,
                    HygieneChoice::StageAll => {
                        self.git.stage_all(root)?;
                        break;
                    }
                    HygieneChoice::List => {
                        self.interaction.show_files(&self.git.unstaged_files(root)?)?;
                        after_listing = true;
                    }
                    HygieneChoice::Exit => return Err(OperationError::Cancelled),
                }
            }
        }

        if self.git.has_staged_changes(root)? {
            let mut after_listing = false;
            loop {
                match self.interaction.staged_changes(after_listing)? {
                    StagedChoice::Keep => break,
                    StagedChoice::Unstage => {
                        self.git.unstage_all(root)?;
                        break;
                    }
                    StagedChoice::List => {
                        self.interaction.show_files(&self.git.staged_files(root)?)?;
                        after_listing = true;
                    }
                    StagedChoice::Exit => return Err(OperationError::Cancelled),
                }
            }
        }

        Ok(())
    }

    /// Asks for a bump of `current` until a candidate is confirmed. A
    /// rejected candidate leads back to the selection for `current`.
    fn choose_version(&self, target: BumpTarget<'_>, current: &Version) -> Result<Option<Version>> {
        let previews = bump_previews(current)?;

        loop {
            let bump = match self.interaction.select_bump(target, current, &previews)? {
                BumpSelection::Selected(bump) => bump,
                BumpSelection::NoChange => return Ok(None),
                BumpSelection::Cancelled => return Err(OperationError::Cancelled),
            };

            let preid = if bump.is_pre() {
                match self.interaction.input_preid(default_preid(current))? {
                    PreidInput::Provided(preid) => Some(preid),
                    PreidInput::Cancelled => return Err(OperationError::Cancelled),
                }
            } else {
                None
            };

            let candidate = bump_version(current, bump, preid.as_deref())?;
            match self.interaction.confirm_version(&candidate)? {
                Confirmation::Confirmed => return Ok(Some(candidate)),
                Confirmation::Declined => {
                    tracing::debug!(subject = target.name(), %candidate, "version rejected");
                }
                Confirmation::Cancelled => return Err(OperationError::Cancelled),
            }
        }
    }

    fn bump_project(&self, root: &Path, skip_commit: bool) -> Result<Option<Version>> {
        let current = self.store.project_version(root)?;
        let name = self.store.project_name(root)?;

        let Some(version) = self.choose_version(BumpTarget::Project(&name), &current)? else {
            return Ok(None);
        };

        if !skip_commit {
            self.store.write_project_version(root, &version)?;
            let settings = resolve_path(root, PROJECT_SETTINGS);
            self.git.stage_files(root, &[settings.as_path()])?;
        }

        tracing::debug!(from = %current, to = %version, "project bump confirmed");
        Ok(Some(version))
    }

    fn bump_package(
        &self,
        root: &Path,
        package_path: &Path,
        skip_commit: bool,
    ) -> Result<Option<BumpResult>> {
        let mut document = self.store.load_package(package_path)?;
        let current = document.version()?;
        let display_name = document.display_name()?.to_string();

        let Some(version) = self.choose_version(BumpTarget::Package(&display_name), &current)?
        else {
            return Ok(None);
        };

        if !skip_commit {
            document.set_version(&version)?;
            self.store.save_package(&document)?;
            self.git.stage_files(root, &[document.path()])?;
        }

        tracing::debug!(package = %display_name, from = %current, to = %version, "package bump confirmed");
        Ok(Some(BumpResult {
            unfriendly_name: document.unfriendly_name()?.to_string(),
            display_name,
            version,
            directory: document.directory().to_path_buf(),
        }))
    }

    fn offer_dependency_sync(&self, run: &Run<'_>, package_path: &Path) -> Result<()> {
        let root = run.root();
        let sync_editor_version = run.config.sync_editor_version();

        if !has_syncable_diffs(&self.store, package_path, root, sync_editor_version)? {
            return Ok(());
        }

        let name = self
            .store
            .load_package(package_path)?
            .display_name()?
            .to_string();

        match self.interaction.confirm_dependency_sync(&name)? {
            Confirmation::Confirmed => {
                if sync_package_deps(&self.store, package_path, root, sync_editor_version)? {
                    let manifest = resolve_path(package_path, PACKAGE_MANIFEST);
                    self.git.stage_files(root, &[manifest.as_path()])?;
                }
                Ok(())
            }
            Confirmation::Declined => Ok(()),
            Confirmation::Cancelled => Err(OperationError::Cancelled),
        }
    }

    /// Packages offered for bumping. With `skip_locally_unchanged_packages`
    /// only packages holding local changes are kept: the diff against the
    /// upstream when there are unpushed commits, the working tree otherwise.
    fn package_candidates<'p>(
        &self,
        run: &Run<'p>,
        branch: &BranchState,
    ) -> Result<Vec<&'p Path>> {
        let project = run.project;
        if !run.input.skip_locally_unchanged_packages {
            return Ok(project.packages().collect());
        }

        let root = run.root();
        let ahead = match &branch.tracking {
            Some(tracking) => self.git.commits_ahead(root, tracking, &branch.current)?,
            None => false,
        };

        let changed: Vec<PathBuf> = match &branch.tracking {
            Some(tracking) if ahead => self
                .git
                .changed_files(root, tracking, &branch.current)?
                .into_iter()
                .map(|change| change.path)
                .collect(),
            _ => self.git.uncommitted_files(root)?,
        };

        let repo_root = self.git.repository_root(root)?;
        let mapping = map_files_to_packages(project, &changed, &repo_root);

        Ok(project
            .packages()
            .filter(|path| path.parent().is_some_and(|dir| mapping.is_affected(dir)))
            .collect())
    }

    fn create_tag(&self, root: &Path, name: &str, message: &str) -> Result<TagOutcome> {
        match self.git.create_tag(root, name, message) {
            Ok(tag) => {
                tracing::debug!(tag = %tag.name, sha = %tag.target_sha, "created tag");
                Ok(TagOutcome::Created(name.to_string()))
            }
            Err(OperationError::Git(GitError::TagAlreadyExists { .. })) => {
                tracing::warn!(tag = name, "tag already exists, skipping");
                Ok(TagOutcome::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn tag_project(&self, run: &Run<'_>, version: &Version) -> Result<TagOutcome> {
        let root = run.root();
        let prefix = run.config.project_tag_prefix();
        let name = format!("{prefix}{version}");

        let changelog = if run.input.skip_project_tagging_changelog {
            Vec::new()
        } else {
            let previous = self.git.latest_tag(root, Some(&format!("{prefix}*")))?;
            self.git.changelog_since(root, previous.as_deref())?
        };

        let outcome = self.create_tag(root, &name, &project_tag_message(&name, &changelog))?;
        if let TagOutcome::Created(tag) = &outcome {
            self.git.push_tag(root, tag)?;
        }
        Ok(outcome)
    }

    fn split_packages(&self, run: &Run<'_>, session: &mut ReleaseSession) -> Result<()> {
        let root = run.root();
        let original = self.git.current_branch(root)?;
        let repo_root = self.git.repository_root(root)?;

        let reports: Vec<SplitReport> = session
            .package_bumps
            .iter()
            .map(|bumped| {
                let outcome = self.split_package(run, &repo_root, &original, bumped);
                if let Err(e) = &outcome {
                    tracing::warn!(package = %bumped.display_name, error = %e, "subtree split failed");
                }

                let (tag, error) = match outcome {
                    Ok(tag) => (tag, None),
                    Err(e) => (None, Some(e)),
                };
                SplitReport {
                    package: bumped.display_name.clone(),
                    branch: bumped.unfriendly_name.clone(),
                    tag,
                    error,
                }
            })
            .collect();

        session.splits = reports;
        Ok(())
    }

    /// Splits one package into its own branch, tags and force-pushes it, and
    /// returns to `original` even when tagging or pushing fails.
    fn split_package(
        &self,
        run: &Run<'_>,
        repo_root: &Path,
        original: &str,
        bumped: &BumpResult,
    ) -> Result<Option<TagOutcome>> {
        let root = run.root();
        let branch = bumped.unfriendly_name.as_str();

        if !self.git.delete_branch(root, branch) {
            tracing::debug!(branch, "no stale split branch removed");
        }

        let directory = relative_directory(repo_root, &bumped.directory)?;
        self.git.subtree_split(root, branch, &directory)?;
        self.git.checkout(root, branch)?;

        let published = self.publish_split(run, bumped);
        let returned = self.git.checkout(root, original);

        let tag = published?;
        returned?;
        Ok(tag)
    }

    fn publish_split(&self, run: &Run<'_>, bumped: &BumpResult) -> Result<Option<TagOutcome>> {
        let root = run.root();
        let branch = bumped.unfriendly_name.as_str();

        let tag = if run.input.skip_package_tagging {
            None
        } else {
            let name = format!(
                "{branch}/{}{}",
                run.config.package_tag_prefix(),
                bumped.version
            );
            let changelog = if run.input.skip_package_tagging_changelog {
                Vec::new()
            } else {
                let previous = self.git.latest_tag(root, Some(&format!("{branch}/*")))?;
                self.git.changelog_since(root, previous.as_deref())?
            };
            let message = package_tag_message(&bumped.display_name, &name, &changelog);
            Some(self.create_tag(root, &name, &message)?)
        };

        self.git.force_push_upstream(root, branch)?;
        tracing::debug!(branch, "published split branch");
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_made_relative_with_forward_slashes() -> anyhow::Result<()> {
        let relative = relative_directory(
            Path::new("/work/game"),
            Path::new("/work/game/Assets/Packages/Tool"),
        )?;

        assert_eq!(relative, "Assets/Packages/Tool");
        Ok(())
    }

    #[test]
    fn directory_outside_repository_is_rejected() {
        let result = relative_directory(Path::new("/work/game"), Path::new("/elsewhere/Tool"));

        assert!(matches!(
            result,
            Err(OperationError::PackageOutsideProject(_))
        ));
    }

    #[test]
    fn only_confirmation_passes() {
        assert!(require(Confirmation::Confirmed).is_ok());
        assert!(matches!(
            require(Confirmation::Declined),
            Err(OperationError::Cancelled)
        ));
        assert!(matches!(
            require(Confirmation::Cancelled),
            Err(OperationError::Cancelled)
        ));
    }
}
