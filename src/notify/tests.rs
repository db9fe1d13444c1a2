//! Unit tests for the polling loop.

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::{
    Disposition, MessageTemplate, MockMessageRenderer, NotifyError, PullRequestNotifier,
    TemplateError,
};
use crate::github::{
    GitHubError, IssueComment, MockPullRequestGateway, PullRequestSummary, RepositoryLocator,
};
use crate::state::PersistedState;

#[fixture]
fn locator() -> RepositoryLocator {
    RepositoryLocator::from_full_name("octo/repo", "https://api.github.com")
        .expect("locator should parse")
}

#[fixture]
fn template() -> MessageTemplate {
    MessageTemplate::new("Hello @{{ username }}, thanks for the patch.")
        .expect("template should parse")
}

fn open_pull(number: u64, author: &str) -> PullRequestSummary {
    PullRequestSummary {
        number,
        author: author.to_owned(),
        title: Some(format!("Change {number}")),
        closed_at: None,
    }
}

fn closed_pull(number: u64, author: &str) -> PullRequestSummary {
    PullRequestSummary {
        closed_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single(),
        ..open_pull(number, author)
    }
}

fn comment(body: &str) -> IssueComment {
    IssueComment {
        body: Some(body.to_owned()),
    }
}

/// Lists `pulls` (oldest first) exactly once.
fn gateway_listing(pulls: Vec<PullRequestSummary>) -> MockPullRequestGateway {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_list_pull_requests()
        .times(1)
        .returning(move |_| Ok(pulls.clone()));
    gateway
}

fn expect_no_comments(gateway: &mut MockPullRequestGateway, number: u64) {
    gateway
        .expect_issue_comments()
        .withf(move |_, candidate| *candidate == number)
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
}

fn expect_post(gateway: &mut MockPullRequestGateway, number: u64, body: &'static str) {
    gateway
        .expect_create_comment()
        .withf(move |_, candidate, text| *candidate == number && text == body)
        .times(1)
        .returning(|_, _, _| Ok(()));
}

#[rstest]
#[tokio::test]
async fn comments_open_pull_and_skips_closed_one(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut gateway = gateway_listing(vec![open_pull(6, "alice"), closed_pull(7, "bob")]);
    expect_no_comments(&mut gateway, 6);
    expect_post(&mut gateway, 6, "Hello @alice, thanks for the patch.");
    gateway.expect_close_pull_request().never();

    let mut state = PersistedState::with_marker(5);
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, false);
    let report = notifier.poll(&mut state).await.expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 6, "mark should stop at #6");
    let results: Vec<_> = report
        .outcomes
        .iter()
        .map(|outcome| (outcome.number, outcome.result.clone()))
        .collect();
    assert_eq!(
        results,
        vec![(7, Ok(Disposition::SkippedClosed)), (6, Ok(Disposition::Commented))]
    );
    assert_eq!(report.stopped_at, None);
}

#[rstest]
#[tokio::test]
async fn auto_close_comments_then_closes(locator: RepositoryLocator, template: MessageTemplate) {
    let mut gateway = gateway_listing(vec![open_pull(8, "carol")]);
    expect_no_comments(&mut gateway, 8);
    expect_post(&mut gateway, 8, "Hello @carol, thanks for the patch.");
    gateway
        .expect_close_pull_request()
        .with(eq(locator.clone()), eq(8))
        .times(1)
        .returning(|_, _| Ok(()));

    let mut state = PersistedState::default();
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, true);
    let report = notifier.poll(&mut state).await.expect("poll should succeed");

    assert!(state.last_processed_number() >= 8, "mark should pass #8");
    assert_eq!(report.count(Disposition::CommentedAndClosed), 1);
}

#[rstest]
#[tokio::test]
async fn stops_at_the_mark_without_examining_older_pulls(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut gateway = gateway_listing(vec![
        open_pull(3, "old"),
        open_pull(4, "marked"),
        open_pull(5, "dave"),
        open_pull(6, "erin"),
    ]);
    expect_no_comments(&mut gateway, 6);
    expect_no_comments(&mut gateway, 5);
    expect_post(&mut gateway, 6, "Hello @erin, thanks for the patch.");
    expect_post(&mut gateway, 5, "Hello @dave, thanks for the patch.");

    let mut state = PersistedState::with_marker(4);
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, false);
    let report = notifier.poll(&mut state).await.expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 6);
    assert_eq!(report.stopped_at, Some(4));
    let examined: Vec<u64> = report.outcomes.iter().map(|outcome| outcome.number).collect();
    assert_eq!(examined, vec![6, 5]);
}

#[rstest]
#[tokio::test]
async fn fresh_state_makes_every_open_pull_eligible(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut gateway = gateway_listing(vec![open_pull(1, "first"), open_pull(2, "second")]);
    expect_no_comments(&mut gateway, 2);
    expect_no_comments(&mut gateway, 1);
    expect_post(&mut gateway, 2, "Hello @second, thanks for the patch.");
    expect_post(&mut gateway, 1, "Hello @first, thanks for the patch.");

    let mut state = PersistedState::default();
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, false);
    let report = notifier.poll(&mut state).await.expect("poll should succeed");

    assert_eq!(report.count(Disposition::Commented), 2);
    assert_eq!(state.last_processed_number(), 2);
}

#[rstest]
#[case::exact("Hello @alice, thanks for the patch.")]
#[case::embedded("> quoted\n\nHello @alice, thanks for the patch.\n\n-- bot")]
#[tokio::test]
async fn existing_comment_with_rendered_text_is_not_duplicated(
    locator: RepositoryLocator,
    #[case] existing_body: &'static str,
) {
    let template = MessageTemplate::new("\n  Hello @{{ username }}, thanks for the patch.\n")
        .expect("template should parse");
    let mut gateway = gateway_listing(vec![open_pull(6, "alice")]);
    gateway
        .expect_issue_comments()
        .times(1)
        .returning(move |_, _| Ok(vec![comment("unrelated"), comment(existing_body)]));
    gateway.expect_create_comment().never();

    let mut state = PersistedState::with_marker(5);
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, false);
    let report = notifier.poll(&mut state).await.expect("poll should succeed");

    assert_eq!(report.count(Disposition::SkippedDuplicate), 1);
    assert_eq!(state.last_processed_number(), 5, "duplicates do not move the mark");
}

#[rstest]
#[tokio::test]
async fn comments_without_body_never_match(locator: RepositoryLocator, template: MessageTemplate) {
    let mut gateway = gateway_listing(vec![open_pull(6, "alice")]);
    gateway.expect_issue_comments().times(1).returning(|_, _| {
        Ok(vec![IssueComment { body: None }])
    });
    expect_post(&mut gateway, 6, "Hello @alice, thanks for the patch.");

    let mut state = PersistedState::with_marker(5);
    let notifier = PullRequestNotifier::new(&gateway, &template, &locator, false);
    notifier.poll(&mut state).await.expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 6);
}

#[rstest]
#[tokio::test]
async fn failed_post_leaves_mark_below_and_is_retried(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut first = gateway_listing(vec![open_pull(8, "frank"), open_pull(9, "grace")]);
    expect_no_comments(&mut first, 9);
    expect_no_comments(&mut first, 8);
    first
        .expect_create_comment()
        .withf(|_, number, _| *number == 9)
        .times(1)
        .returning(|_, _, _| {
            Err(GitHubError::Network {
                message: "connection reset".to_owned(),
            })
        });
    expect_post(&mut first, 8, "Hello @frank, thanks for the patch.");

    let mut state = PersistedState::with_marker(7);
    let report = PullRequestNotifier::new(&first, &template, &locator, false)
        .poll(&mut state)
        .await
        .expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 8, "mark must stay below #9");
    let failures: Vec<u64> = report.failures().map(|(number, _)| number).collect();
    assert_eq!(failures, vec![9]);
    assert!(matches!(
        report.outcomes.first().map(|outcome| &outcome.result),
        Some(Err(NotifyError::PostComment(GitHubError::Network { .. })))
    ));

    let mut second = gateway_listing(vec![open_pull(8, "frank"), open_pull(9, "grace")]);
    expect_no_comments(&mut second, 9);
    expect_post(&mut second, 9, "Hello @grace, thanks for the patch.");

    let retry = PullRequestNotifier::new(&second, &template, &locator, false)
        .poll(&mut state)
        .await
        .expect("retry should succeed");

    assert_eq!(state.last_processed_number(), 9);
    assert_eq!(retry.stopped_at, Some(8));
}

#[rstest]
#[tokio::test]
async fn template_failure_is_isolated(locator: RepositoryLocator) {
    let mut renderer = MockMessageRenderer::new();
    renderer
        .expect_render()
        .withf(|username| username == "broken")
        .returning(|_| {
            Err(TemplateError::Render {
                message: "boom".to_owned(),
            })
        });
    renderer
        .expect_render()
        .withf(|username| username == "fine")
        .returning(|username| Ok(format!("hi {username}")));

    let mut gateway = gateway_listing(vec![open_pull(2, "fine"), open_pull(3, "broken")]);
    expect_no_comments(&mut gateway, 2);
    expect_post(&mut gateway, 2, "hi fine");

    let mut state = PersistedState::with_marker(1);
    let report = PullRequestNotifier::new(&gateway, &renderer, &locator, false)
        .poll(&mut state)
        .await
        .expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 2);
    assert!(matches!(
        report.outcomes.first().map(|outcome| &outcome.result),
        Some(Err(NotifyError::Template(TemplateError::Render { .. })))
    ));
}

#[rstest]
#[tokio::test]
async fn comment_fetch_failure_is_isolated(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut gateway = gateway_listing(vec![open_pull(6, "alice")]);
    gateway.expect_issue_comments().times(1).returning(|_, _| {
        Err(GitHubError::Api {
            message: "issue comments failed with status 502".to_owned(),
        })
    });
    gateway.expect_create_comment().never();

    let mut state = PersistedState::with_marker(5);
    let report = PullRequestNotifier::new(&gateway, &template, &locator, false)
        .poll(&mut state)
        .await
        .expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 5);
    assert!(matches!(
        report.outcomes.first().map(|outcome| &outcome.result),
        Some(Err(NotifyError::FetchComments(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn close_failure_does_not_advance_mark(
    locator: RepositoryLocator,
    template: MessageTemplate,
) {
    let mut gateway = gateway_listing(vec![open_pull(8, "carol")]);
    expect_no_comments(&mut gateway, 8);
    expect_post(&mut gateway, 8, "Hello @carol, thanks for the patch.");
    gateway.expect_close_pull_request().times(1).returning(|_, _| {
        Err(GitHubError::Authentication {
            message: "Resource not accessible by integration".to_owned(),
        })
    });

    let mut state = PersistedState::with_marker(7);
    let report = PullRequestNotifier::new(&gateway, &template, &locator, true)
        .poll(&mut state)
        .await
        .expect("poll should succeed");

    assert_eq!(state.last_processed_number(), 7);
    assert!(matches!(
        report.outcomes.first().map(|outcome| &outcome.result),
        Some(Err(NotifyError::Close(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn listing_failure_touches_nothing(locator: RepositoryLocator, template: MessageTemplate) {
    let mut gateway = MockPullRequestGateway::new();
    gateway.expect_list_pull_requests().times(1).returning(|_| {
        Err(GitHubError::Network {
            message: "timed out".to_owned(),
        })
    });
    gateway.expect_issue_comments().never();
    gateway.expect_create_comment().never();

    let mut state = PersistedState::with_marker(5);
    let result = PullRequestNotifier::new(&gateway, &template, &locator, false)
        .poll(&mut state)
        .await;

    assert!(matches!(result, Err(GitHubError::Network { .. })));
    assert_eq!(state, PersistedState::with_marker(5));
}
