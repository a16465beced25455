use semver::Version;
use ubump_core::BumpResult;

/// `Bump project to v1.1.0; Tool to v0.9.1`, or `Bump Tool to v0.9.1` when
/// the project itself was not bumped.
#[must_use]
pub fn commit_message(
    project: Option<&Version>,
    packages: &[BumpResult],
    project_prefix: &str,
    package_prefix: &str,
) -> String {
    let mut clauses = Vec::with_capacity(packages.len() + 1);
    if let Some(version) = project {
        clauses.push(format!("project to {project_prefix}{version}"));
    }
    clauses.extend(
        packages
            .iter()
            .map(|p| format!("{} to {package_prefix}{}", p.display_name, p.version)),
    );

    format!("Bump {}", clauses.join("; "))
}

pub(super) fn project_tag_message(tag: &str, changelog: &[String]) -> String {
    with_changelog(format!("Release {tag}"), changelog)
}

pub(super) fn package_tag_message(display_name: &str, tag: &str, changelog: &[String]) -> String {
    with_changelog(format!("{display_name} Release {tag}"), changelog)
}

fn with_changelog(title: String, changelog: &[String]) -> String {
    let mut message = title;
    message.push('\n');
    message.push_str(&changelog.join("\n"));
    message
}
