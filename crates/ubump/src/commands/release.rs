use std::path::Path;

use clap::Args;
use ubump_operations::operations::{
    ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleaseSession, TagOutcome,
};
use ubump_operations::providers::{FileSystemManifestStore, FileSystemProjectProvider, Git2Provider};

use crate::environment::non_interactive_reason;
use crate::error::{CliError, Result};
use crate::interaction::TerminalInteractionProvider;

#[derive(Args, Default)]
pub(crate) struct ReleaseArgs {
    /// Prefix of the project tag, also used in the commit message (default: v)
    #[arg(long)]
    project_tag_prefix: Option<String>,

    /// Prefix of package tags, also used in the commit message (default: v)
    #[arg(long)]
    package_tag_prefix: Option<String>,

    /// Skip writing, staging, committing and pushing version changes; only tag
    #[arg(long)]
    skip_commit: bool,

    /// Do not ask about the project version
    #[arg(long)]
    skip_project: bool,

    /// Do not ask about package versions
    #[arg(long)]
    skip_packages: bool,

    /// Do not tag the project
    #[arg(long)]
    skip_project_tagging: bool,

    /// Do not tag split package branches
    #[arg(long)]
    skip_package_tagging: bool,

    /// Leave the changelog out of the project tag message
    #[arg(long)]
    skip_project_tagging_changelog: bool,

    /// Leave the changelog out of package tag messages
    #[arg(long)]
    skip_package_tagging_changelog: bool,

    /// Only ask about packages containing locally changed files
    #[arg(long)]
    skip_locally_unchanged_packages: bool,

    /// Do not rewrite dependencies between packages of the project
    #[arg(long)]
    skip_internal_ref_syncing: bool,
}

impl ReleaseArgs {
    fn into_input(self) -> ReleaseInput {
        ReleaseInput {
            project_tag_prefix: self.project_tag_prefix,
            package_tag_prefix: self.package_tag_prefix,
            skip_commit: self.skip_commit,
            skip_project: self.skip_project,
            skip_packages: self.skip_packages,
            skip_project_tagging: self.skip_project_tagging,
            skip_package_tagging: self.skip_package_tagging,
            skip_project_tagging_changelog: self.skip_project_tagging_changelog,
            skip_package_tagging_changelog: self.skip_package_tagging_changelog,
            skip_locally_unchanged_packages: self.skip_locally_unchanged_packages,
            skip_internal_ref_syncing: self.skip_internal_ref_syncing,
        }
    }
}

pub(crate) fn run(args: ReleaseArgs, project_path: &Path) -> Result<()> {
    if let Some(reason) = non_interactive_reason() {
        return Err(CliError::NotInteractive(reason));
    }

    let operation = ReleaseOperation::new(
        FileSystemProjectProvider::new(),
        FileSystemManifestStore::new(),
        Git2Provider::new(),
        TerminalInteractionProvider::new(),
    );
    let outcome = operation.execute(project_path, &args.into_input())?;

    print_outcome(&outcome);
    check_splits(&outcome)
}

fn print_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::NoChanges => {
            println!("\nNo reported version changes.");
        }
        ReleaseOutcome::CommitDeclined(_) => {
            println!("\nNothing was committed. Bumped files are left staged.");
        }
        ReleaseOutcome::Cancelled { rolled_back, .. } => {
            println!("\nExiting ubump.");
            if *rolled_back {
                println!("Rolled back the ubump commit. File changes are preserved.");
            }
        }
        ReleaseOutcome::Completed(session) => print_session(session),
    }
}

fn print_session(session: &ReleaseSession) {
    println!();
    if let Some(commit) = &session.commit {
        println!("Committed '{}'.", commit.message);
    }
    if session.pushed {
        println!("Pushed the commit.");
    }

    match &session.project_tag {
        Some(TagOutcome::Created(name)) => println!("Tagged the project with {name}."),
        Some(TagOutcome::AlreadyExists(name)) => {
            println!("Tag {name} already exists, the project was not tagged.");
        }
        None => {}
    }

    for split in &session.splits {
        match (&split.error, &split.tag) {
            (Some(e), _) => eprintln!("Splitting {} failed: {e}", split.package),
            (None, Some(TagOutcome::Created(tag))) => {
                println!("Split {} into {} tagged {tag}.", split.package, split.branch);
            }
            (None, Some(TagOutcome::AlreadyExists(tag))) => println!(
                "Split {} into {}; tag {tag} already exists.",
                split.package, split.branch
            ),
            (None, None) => println!("Split {} into {}.", split.package, split.branch),
        }
    }
}

fn check_splits(outcome: &ReleaseOutcome) -> Result<()> {
    let ReleaseOutcome::Completed(session) = outcome else {
        return Ok(());
    };

    let failed = session.splits.iter().filter(|s| !s.succeeded()).count();
    if failed > 0 {
        return Err(CliError::SplitsFailed {
            failed,
            total: session.splits.len(),
        });
    }
    Ok(())
}
