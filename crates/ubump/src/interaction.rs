use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use semver::Version;
use ubump_core::BumpType;
use ubump_operations::traits::{
    BumpSelection, BumpTarget, CommitDecision, Confirmation, HygieneChoice, InteractionProvider,
    PreidInput, StagedChoice,
};
use ubump_operations::{OperationError, Result};

const UNSTAGED_ITEMS: [&str; 4] = [
    "Leave those files unstaged. It's fine.",
    "Stage all of those files.",
    "See a list of the unstaged files to deliberate.",
    "Exit ubump to do things.",
];

const STAGED_ITEMS: [&str; 4] = [
    "Keep those staged changes, additionally staging ubump-modified files along with them.",
    "Unstage those currently staged changes.",
    "See a list of the currently staged files to deliberate.",
    "Exit ubump to do things.",
];

/// Prompts on the terminal. Escape or `q` answers any prompt with a cancel.
pub struct TerminalInteractionProvider;

impl TerminalInteractionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalInteractionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn dialoguer_to_operation_error(e: dialoguer::Error) -> OperationError {
    match e {
        dialoguer::Error::IO(io_err) => OperationError::Io(io_err),
    }
}

fn confirmation(answer: Option<bool>) -> Confirmation {
    match answer {
        Some(true) => Confirmation::Confirmed,
        Some(false) => Confirmation::Declined,
        None => Confirmation::Cancelled,
    }
}

fn confirm(prompt: &str) -> Result<Confirmation> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact_opt()
        .map_err(dialoguer_to_operation_error)?;
    Ok(confirmation(answer))
}

fn select<T: std::fmt::Display>(prompt: &str, items: &[T]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(dialoguer_to_operation_error)
}

fn bump_items(previews: &[(BumpType, Version)]) -> Vec<String> {
    let width = BumpType::ALL
        .iter()
        .map(|b| b.label().len())
        .max()
        .unwrap_or_default()
        + 2;

    std::iter::once("No Change".to_string())
        .chain(
            previews
                .iter()
                .map(|(bump, version)| format!("{:<width$}{version}", bump.label())),
        )
        .collect()
}

fn bump_prompt(target: BumpTarget<'_>, current: &Version) -> String {
    match target {
        BumpTarget::Project(name) => {
            format!("What is the type of change for the {name} project as a whole? (now {current})")
        }
        BumpTarget::Package(name) => {
            format!("What is the type of change for the {name} package? (now {current})")
        }
    }
}

fn subtree_prompt(package_count: usize) -> String {
    let which = if package_count > 1 { "each" } else { "the" };
    format!("Push a subtree branch for {which} package, tagging accordingly?")
}

impl InteractionProvider for TerminalInteractionProvider {
    fn confirm_untracked_branch(&self, current: &str, expected: &str) -> Result<Confirmation> {
        confirm(&format!(
            "Your current branch, {current}, is not tracking {expected}. Are you sure you want to proceed?"
        ))
    }

    fn unstaged_changes(&self, after_listing: bool) -> Result<HygieneChoice> {
        let prompt = if after_listing {
            "There should be a list of unstaged files printed above. Now, how would you like to proceed?"
        } else {
            "ubump noticed you have unstaged changes. You might have forgotten to stage or commit something. How would you like to proceed?"
        };

        Ok(match select(prompt, &UNSTAGED_ITEMS)? {
            Some(0) => HygieneChoice::Leave,
            Some(1) => HygieneChoice::StageAll,
            Some(2) => HygieneChoice::List,
            _ => HygieneChoice::Exit,
        })
    }

    fn staged_changes(&self, after_listing: bool) -> Result<StagedChoice> {
        let prompt = if after_listing {
            "There should be a list of staged files printed above. Now, how would you like to proceed?"
        } else {
            "ubump stages every file it touches, and you already have staged changes. How would you like to proceed?"
        };

        Ok(match select(prompt, &STAGED_ITEMS)? {
            Some(0) => StagedChoice::Keep,
            Some(1) => StagedChoice::Unstage,
            Some(2) => StagedChoice::List,
            _ => StagedChoice::Exit,
        })
    }

    fn show_files(&self, files: &[PathBuf]) -> Result<()> {
        println!();
        for file in files {
            println!("{}", file.display());
        }
        println!();
        Ok(())
    }

    fn select_bump(
        &self,
        target: BumpTarget<'_>,
        current: &Version,
        previews: &[(BumpType, Version)],
    ) -> Result<BumpSelection> {
        println!();
        let selection = select(&bump_prompt(target, current), &bump_items(previews))?;

        Ok(match selection {
            Some(0) => BumpSelection::NoChange,
            Some(i) => previews
                .get(i - 1)
                .map_or(BumpSelection::Cancelled, |(bump, _)| BumpSelection::Selected(*bump)),
            None => BumpSelection::Cancelled,
        })
    }

    fn input_preid(&self, default: &str) -> Result<PreidInput> {
        let preid: String = Input::new()
            .with_prompt("What should the prerelease identifier be?")
            .default(default.to_string())
            .interact_text()
            .map_err(dialoguer_to_operation_error)?;

        Ok(PreidInput::Provided(preid))
    }

    fn confirm_version(&self, version: &Version) -> Result<Confirmation> {
        confirm(&format!("Are you sure you're happy with {version}?"))
    }

    fn confirm_dependency_sync(&self, package_name: &str) -> Result<Confirmation> {
        confirm(&format!(
            "The '{package_name}' dependencies are out of sync with the containing project. Sync them?"
        ))
    }

    fn commit_decision(&self, message: &str) -> Result<CommitDecision> {
        let items = [
            format!("Yes, commit with '{message}' as the commit message."),
            "Yes, but customize the commit message.".to_string(),
            "No, don't commit anything.".to_string(),
        ];

        println!();
        match select("Want to commit your changes?", &items)? {
            Some(0) => Ok(CommitDecision::Commit(message.to_string())),
            Some(1) => {
                let custom: String = Input::new()
                    .with_prompt("What should the custom commit message say?")
                    .default(message.to_string())
                    .interact_text()
                    .map_err(dialoguer_to_operation_error)?;
                Ok(CommitDecision::Commit(custom))
            }
            Some(_) => Ok(CommitDecision::Skip),
            None => Ok(CommitDecision::Cancelled),
        }
    }

    fn confirm_push(&self) -> Result<Confirmation> {
        confirm("Push the changes?")
    }

    fn confirm_subtree_split(&self, package_count: usize) -> Result<Confirmation> {
        println!();
        confirm(&subtree_prompt(package_count))
    }

    fn confirm_again(&self) -> Result<Confirmation> {
        confirm("Are you sure?")
    }
}
