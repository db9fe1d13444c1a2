//! Unit tests for repository addressing and credential wrappers.

use rstest::rstest;

use super::locator::{installation_tokens_path, organisation_installation_path};
use super::{GitHubError, InstallationToken, RepositoryLocator};

fn sample_locator() -> RepositoryLocator {
    RepositoryLocator::from_full_name("octo/repo", "https://api.github.com")
        .expect("sample locator should parse")
}

#[rstest]
fn splits_owner_and_name() {
    let locator = sample_locator();
    assert_eq!(locator.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(locator.repository().as_str(), "repo", "repository mismatch");
    assert_eq!(locator.full_name(), "octo/repo", "full name mismatch");
}

#[rstest]
fn keeps_api_base() {
    let locator = RepositoryLocator::from_full_name("octo/repo", "https://ghe.example.com/api/v3")
        .expect("enterprise base should parse");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com/api/v3",
        "api base mismatch"
    );
}

#[rstest]
fn builds_api_paths() {
    let locator = sample_locator();
    assert_eq!(locator.pulls_path(), "/repos/octo/repo/pulls");
    assert_eq!(locator.pull_request_path(8), "/repos/octo/repo/pulls/8");
    assert_eq!(
        locator.issue_comments_path(8),
        "/repos/octo/repo/issues/8/comments"
    );
    assert_eq!(
        organisation_installation_path(locator.owner()),
        "/orgs/octo/installation"
    );
    assert_eq!(
        installation_tokens_path(99),
        "/app/installations/99/access_tokens"
    );
}

#[rstest]
#[case::no_separator("octorepo")]
#[case::empty_owner("/repo")]
#[case::empty_name("octo/")]
#[case::extra_segment("octo/repo/pulls")]
#[case::blank("   ")]
fn rejects_malformed_full_names(#[case] input: &str) {
    let result = RepositoryLocator::from_full_name(input, "https://api.github.com");
    assert!(
        matches!(result, Err(GitHubError::InvalidRepositoryName { .. })),
        "expected InvalidRepositoryName for {input:?}, got {result:?}"
    );
}

#[rstest]
fn rejects_invalid_api_base() {
    let result = RepositoryLocator::from_full_name("octo/repo", "not a url");
    assert!(
        matches!(result, Err(GitHubError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
fn rejects_blank_token() {
    assert!(InstallationToken::new("  ").is_none(), "blank token accepted");
}

#[rstest]
fn token_debug_is_redacted() {
    let token = InstallationToken::new("ghs_secret").expect("token should be valid");
    let rendered = format!("{token:?}");
    assert!(!rendered.contains("ghs_secret"), "token leaked: {rendered}");
}
