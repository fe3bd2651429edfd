//! Integration tests for the chat command handlers.
//!
//! The service is wired over fakes from `common`, so these tests check the
//! command sequences and replies without touching Heroku, Docker or
//! Telegram.

mod common;

use common::{CONTAINER_ID, Harness, Sent};
use dynopull_core::services::{
    EMPTY_OUTPUT_MESSAGE, HELP_MESSAGE, HEROKU_API_KEY_ENV, MISSING_KEY_MESSAGE,
    UNAUTHORIZED_MESSAGE, WELCOME_MESSAGE,
};
use dynopull_core::{ApiKey, BotCommand, ChatRequest, CommandOutput, ProcessError};

const CHAT: i64 = 42;
const USER: i64 = 7;
const KEY: &str = "hk-0123456789abcdef";

fn request(text: &str) -> ChatRequest {
    let command = BotCommand::parse(text).expect("test input must be a command");
    ChatRequest::new(CHAT, Some(USER), 100, command)
}

async fn with_key(harness: &Harness) {
    harness.credentials.set(ApiKey::new(KEY).unwrap()).await;
}

#[tokio::test]
async fn test_start_sends_welcome() {
    let h = Harness::new();
    h.service.handle(request("/start")).await;
    assert_eq!(h.transport.texts(), vec![WELCOME_MESSAGE.to_string()]);
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_help_lists_every_command() {
    let h = Harness::new();
    h.service.handle(request("/help")).await;
    assert_eq!(h.transport.texts(), vec![HELP_MESSAGE.to_string()]);
    for command in ["/setapi <api_key>", "/apps", "/container <app_name>", "/help"] {
        assert!(HELP_MESSAGE.contains(command), "missing {command}");
    }
}

#[tokio::test]
async fn test_unknown_command_points_to_help() {
    let h = Harness::new();
    h.service.handle(request("/deploy")).await;
    assert_eq!(
        h.transport.texts(),
        vec!["Unknown command /deploy. Try /help.".to_string()]
    );
}

#[tokio::test]
async fn test_setapi_masks_key_and_deletes_message() {
    let h = Harness::new();
    h.service.handle(request(&format!("/setapi {KEY}"))).await;

    assert_eq!(
        h.transport.sent(),
        vec![
            Sent::Deleted(CHAT, 100),
            Sent::Text(CHAT, "Heroku API key set to: ****cdef".to_string()),
        ]
    );
    assert_eq!(h.credentials.get().await.unwrap().expose(), KEY);
}

#[tokio::test]
async fn test_setapi_confirms_when_delete_fails() {
    let h = Harness::new();
    h.transport.refuse_deletes();

    h.service.handle(request(&format!("/setapi {KEY}"))).await;

    assert_eq!(
        h.transport.sent(),
        vec![Sent::Text(
            CHAT,
            "Heroku API key set to: ****cdef".to_string()
        )]
    );
    assert_eq!(h.credentials.get().await.unwrap().expose(), KEY);
}

#[tokio::test]
async fn test_setapi_without_argument_shows_usage() {
    let h = Harness::new();
    h.service.handle(request("/setapi")).await;
    assert_eq!(
        h.transport.texts(),
        vec!["Usage: /setapi <api_key>".to_string()]
    );
    assert!(h.credentials.get().await.is_none());
}

#[tokio::test]
async fn test_apps_requires_key() {
    let h = Harness::new();
    h.service.handle(request("/apps")).await;
    assert_eq!(h.transport.texts(), vec![MISSING_KEY_MESSAGE.to_string()]);
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_apps_forwards_cli_output() {
    let h = Harness::new();
    with_key(&h).await;
    h.runner.respond(
        "heroku apps",
        Ok(CommandOutput::ok("[{\"name\": \"my-app\"}]\n")),
    );

    h.service.handle(request("/apps")).await;

    assert_eq!(
        h.transport.texts(),
        vec!["[{\"name\": \"my-app\"}]".to_string()]
    );
    let calls = h.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, ["apps", "--json"]);
    assert!(
        calls[0]
            .env
            .contains(&(HEROKU_API_KEY_ENV.to_string(), KEY.to_string()))
    );
}

#[tokio::test]
async fn test_apps_empty_output() {
    let h = Harness::new();
    with_key(&h).await;
    h.service.handle(request("/apps")).await;
    assert_eq!(h.transport.texts(), vec![EMPTY_OUTPUT_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_apps_long_output_is_chunked() {
    let h = Harness::new();
    with_key(&h).await;
    let line = format!("{{\"name\": \"{}\"}},\n", "a".repeat(90));
    h.runner
        .respond("heroku apps", Ok(CommandOutput::ok(line.repeat(100))));

    h.service.handle(request("/apps")).await;

    let texts = h.transport.texts();
    assert!(texts.len() > 1);
    assert!(texts.iter().all(|t| t.len() <= 4096));
}

#[tokio::test]
async fn test_apps_failure_is_reported_without_key() {
    let h = Harness::new();
    with_key(&h).await;
    h.runner.respond(
        "heroku apps",
        Ok(CommandOutput::new(
            Some(1),
            "",
            format!("Invalid credentials provided for {KEY}"),
        )),
    );

    h.service.handle(request("/apps")).await;

    let texts = h.transport.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Error: "));
    assert!(texts[0].contains("Invalid credentials"));
    assert!(!texts[0].contains(KEY));
}

#[tokio::test]
async fn test_container_happy_path() {
    let h = Harness::new();
    with_key(&h).await;

    h.service.handle(request("/container my-app")).await;

    assert_eq!(
        h.runner.call_keys(),
        vec![
            "heroku container:login",
            "docker pull",
            "docker create",
            "docker cp",
            "docker rm",
        ]
    );
    let calls = h.runner.calls();
    assert_eq!(calls[1].args[1], "registry.heroku.com/my-app/worker");
    assert_eq!(calls[2].args[1], "registry.heroku.com/my-app/worker:latest");
    assert_eq!(calls[3].args[1], format!("{CONTAINER_ID}:/app"));
    assert!(calls[3].args[2].ends_with("/app"));
    assert_eq!(calls[4].args[1], CONTAINER_ID);

    assert_eq!(
        h.transport.documents(),
        vec![Sent::Document {
            chat: CHAT,
            file_name: "my-app.zip".to_string(),
            caption: Some("my-app: 3 files".to_string()),
            existed: true,
        }]
    );

    let requests = h.archiver.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (source, base, dest) = &requests[0];
    assert_eq!(source, &base.join("app"));
    assert_eq!(dest, &base.join("my-app.zip"));

    assert_eq!(
        h.transport.texts(),
        vec![
            "Pulling registry.heroku.com/my-app/worker:latest ...".to_string(),
            "Packaging files from my-app ...".to_string(),
        ]
    );
    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_container_requires_key() {
    let h = Harness::new();
    h.service.handle(request("/container my-app")).await;
    assert_eq!(h.transport.texts(), vec![MISSING_KEY_MESSAGE.to_string()]);
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_container_checks_key_before_argument() {
    let h = Harness::new();
    h.service.handle(request("/container")).await;
    h.service.handle(request("/container Bad_Name")).await;
    assert_eq!(
        h.transport.texts(),
        vec![
            MISSING_KEY_MESSAGE.to_string(),
            MISSING_KEY_MESSAGE.to_string()
        ]
    );
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_container_rejects_invalid_app_name() {
    let h = Harness::new();
    with_key(&h).await;

    h.service.handle(request("/container ../../etc")).await;

    let texts = h.transport.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Error: Invalid app name"));
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_container_without_argument_shows_usage() {
    let h = Harness::new();
    with_key(&h).await;
    h.service.handle(request("/container")).await;
    assert_eq!(
        h.transport.texts(),
        vec!["Usage: /container <app_name>".to_string()]
    );
}

#[tokio::test]
async fn test_container_pull_failure_stops_before_create() {
    let h = Harness::new();
    with_key(&h).await;
    h.runner.respond(
        "docker pull",
        Ok(CommandOutput::new(Some(1), "", "manifest unknown")),
    );

    h.service.handle(request("/container my-app")).await;

    assert_eq!(
        h.runner.call_keys(),
        vec!["heroku container:login", "docker pull"]
    );
    let last = h.transport.texts().pop().unwrap();
    assert!(last.starts_with("Error: "));
    assert!(last.contains("manifest unknown"));
    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_container_copy_failure_still_removes_container() {
    let h = Harness::new();
    with_key(&h).await;
    h.runner.respond(
        "docker cp",
        Err(ProcessError::TimedOut {
            command: "docker cp".to_string(),
            timeout_secs: 900,
        }),
    );

    h.service.handle(request("/container my-app")).await;

    assert_eq!(h.runner.call_keys().last().unwrap(), "docker rm");
    assert!(h.transport.documents().is_empty());
    let last = h.transport.texts().pop().unwrap();
    assert!(last.contains("timed out after 900s"));
    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_container_archive_over_limit_is_not_sent() {
    let h = Harness::with_config(|config| config.max_document_bytes = 100);
    with_key(&h).await;

    h.service.handle(request("/container my-app")).await;

    assert!(h.transport.documents().is_empty());
    let last = h.transport.texts().pop().unwrap();
    assert!(last.contains("my-app.zip is 1024 bytes"));
    assert_eq!(h.runner.call_keys().last().unwrap(), "docker rm");
}

#[tokio::test]
async fn test_unauthorized_user_is_rejected() {
    let h = Harness::with_config(|config| config.allowed_users = vec![USER + 1]);
    with_key(&h).await;

    h.service.handle(request("/apps")).await;

    assert_eq!(h.transport.texts(), vec![UNAUTHORIZED_MESSAGE.to_string()]);
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn test_allowed_user_passes() {
    let h = Harness::with_config(|config| config.allowed_users = vec![USER]);
    h.service.handle(request("/start")).await;
    assert_eq!(h.transport.texts(), vec![WELCOME_MESSAGE.to_string()]);
}
