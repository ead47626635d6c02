//! Drives the publisher against a mocked GitHub API.

use github_checks_publisher::{
    ChecksAction, ChecksConclusion, ChecksDetails, ChecksStatus, Credentials, GitHubChecksPublisher,
    LogSink, PublishContext,
};
use serde_json::{json, Value};
use std::sync::Mutex;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHA: &str = "18c8e2fd86e7aa3748e279c14a00dc3f0b963e7f";

#[derive(Default)]
struct RecordingLog(Mutex<Vec<String>>);

impl LogSink for RecordingLog {
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_owned());
    }
}

impl RecordingLog {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn context(credentials: Option<Credentials>) -> PublishContext {
    PublishContext::new(
        "octo/widgets",
        SHA,
        "https://ci.example.com/job/widgets/7/",
        credentials,
    )
}

fn listener_lines(listener: Mutex<Vec<u8>>) -> Vec<String> {
    String::from_utf8(listener.into_inner().unwrap())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn created(name: &str, status: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "id": 4,
        "name": name,
        "status": status,
        "head_sha": SHA,
        "html_url": "https://github.com/octo/widgets/runs/4",
    }))
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn publishes_in_progress_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/check-runs"))
        .and(body_partial_json(json!({
            "name": "build",
            "head_sha": SHA,
            "status": "in_progress",
            "details_url": "https://ci.example.com/job/widgets/7/",
        })))
        .respond_with(created("build", "in_progress"))
        .expect(1)
        .mount(&server)
        .await;

    let context = context(Some(Credentials::new("secret")));
    let listener = Mutex::new(Vec::new());
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, Some(&listener), &log)
        .with_github_url(server.uri())
        .publish(&ChecksDetails::new("build", ChecksStatus::InProgress))
        .await;

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].get("conclusion").is_none());
    assert!(bodies[0].get("completed_at").is_none());

    assert!(log.lines().is_empty());
    assert_eq!(
        listener_lines(listener),
        ["GitHub check (name: build, status: in_progress) has been published."]
    );
}

#[tokio::test]
async fn unfamiliar_status_in_response_still_counts_as_published() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/check-runs"))
        .respond_with(created("build", "pending"))
        .expect(1)
        .mount(&server)
        .await;

    let context = context(Some(Credentials::new("secret")));
    let listener = Mutex::new(Vec::new());
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, Some(&listener), &log)
        .with_github_url(server.uri())
        .publish(&ChecksDetails::new("build", ChecksStatus::Queued))
        .await;

    assert!(log.lines().is_empty());
    assert_eq!(
        listener_lines(listener),
        ["GitHub check (name: build, status: queued) has been published."]
    );
}

#[tokio::test]
async fn publishes_completed_run_with_actions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/check-runs"))
        .respond_with(created("build", "completed"))
        .expect(1)
        .mount(&server)
        .await;

    let completed = "2022-05-01T12:30:00Z".parse().unwrap();
    let details = ChecksDetails::new("build", ChecksStatus::Completed)
        .with_conclusion(ChecksConclusion::Success)
        .with_completed_at(completed)
        .with_action(ChecksAction::new("Re-run", "run it again", "rerun"))
        .with_action(ChecksAction::new("Report", "file a report", "report"));

    let context = context(Some(Credentials::new("secret")));
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, None, &log)
        .with_github_url(server.uri())
        .publish(&details)
        .await;

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["conclusion"], "success");
    assert_eq!(bodies[0]["completed_at"], "2022-05-01T12:30:00Z");
    assert_eq!(bodies[0]["actions"][0]["identifier"], "rerun");
    assert_eq!(bodies[0]["actions"][1]["identifier"], "report");
    assert!(log.lines().is_empty());
}

#[tokio::test]
async fn credential_api_url_wins_over_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/check-runs"))
        .respond_with(created("lint", "queued"))
        .expect(1)
        .mount(&server)
        .await;

    let context = context(Some(Credentials::new("secret").with_api_uri(server.uri())));
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, None, &log)
        .with_github_url("http://127.0.0.1:1")
        .publish(&ChecksDetails::new("lint", ChecksStatus::Queued))
        .await;

    assert!(log.lines().is_empty());
}

#[tokio::test]
async fn rejected_submission_is_logged_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/check-runs"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest/checks/runs#create-a-check-run",
        })))
        .mount(&server)
        .await;

    let details = ChecksDetails::new("build", ChecksStatus::InProgress);
    let context = context(Some(Credentials::new("secret")));
    let listener = Mutex::new(Vec::new());
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, Some(&listener), &log)
        .with_github_url(server.uri())
        .publish(&details)
        .await;

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Failed Publishing GitHub checks: "));
    assert!(lines[0].contains("\"build\""));
    assert!(!lines[0].contains(['\r', '\n']));

    let listener = listener_lines(listener);
    assert_eq!(listener.len(), 1);
    assert!(listener[0].starts_with("Failed Publishing GitHub checks: "));
}

#[tokio::test]
async fn unreachable_host_is_logged_not_raised() {
    let context = context(Some(Credentials::new("secret")));
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, None, &log)
        .with_github_url("http://127.0.0.1:1")
        .publish(&ChecksDetails::new("build", ChecksStatus::InProgress))
        .await;

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Failed Publishing GitHub checks:"));
}

#[tokio::test]
async fn malformed_url_fails_before_sending() {
    let context = context(Some(Credentials::new("secret").with_api_uri("http://exa mple.com")));
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, None, &log)
        .publish(&ChecksDetails::new("build", ChecksStatus::InProgress))
        .await;

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("could not connect to GitHub at http://exa mple.com"));
}

#[tokio::test]
async fn invalid_details_never_reach_github() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("build", "queued"))
        .expect(0)
        .mount(&server)
        .await;

    let context = context(Some(Credentials::new("secret")));
    let log = RecordingLog::default();
    let publisher =
        GitHubChecksPublisher::with_log(&context, None, &log).with_github_url(server.uri());
    publisher
        .publish(&ChecksDetails::new("build", ChecksStatus::None))
        .await;
    publisher
        .publish(
            &ChecksDetails::new("build", ChecksStatus::Queued).with_details_url("file:///tmp/x"),
        )
        .await;

    assert_eq!(log.lines().len(), 2);
}

#[tokio::test]
async fn missing_credentials_are_logged() {
    let context = context(None);
    let listener = Mutex::new(Vec::new());
    let log = RecordingLog::default();
    GitHubChecksPublisher::with_log(&context, Some(&listener), &log)
        .publish(&ChecksDetails::new("build", ChecksStatus::Queued))
        .await;

    assert_eq!(log.lines().len(), 1);
    assert_eq!(
        listener_lines(listener),
        ["Failed Publishing GitHub checks: no GitHub credentials configured for this context"]
    );
}
