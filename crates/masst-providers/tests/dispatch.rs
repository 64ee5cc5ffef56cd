//! Platform dispatch against a recording runner

use camino::Utf8PathBuf;
use masst_core::process::CallKind;
use masst_core::{
    ErrorCategory, OutputMode, PackageManager, ProcessOutput, Prompter, RecordingRunner,
    ScriptedPrompter, StepOutcome, WorkspaceContext,
};
use masst_providers::{dispatch, DeployContext, Error};
use mockall::mock;
use std::fs;
use tempfile::TempDir;

mock! {
    pub Prompter {}
    impl Prompter for Prompter {
        fn is_interactive(&self) -> bool;
        fn confirm(&self, message: &str, default: bool) -> masst_core::Result<bool>;
        fn open_url(&self, url: &str) -> masst_core::Result<()>;
    }
}

/// A project root whose package.json is named `acme`
fn project() -> (TempDir, WorkspaceContext) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name": "acme"}"#).unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let ctx = WorkspaceContext::new(root, PackageManager::Pnpm, true, true);
    (dir, ctx)
}

fn silent_prompter() -> MockPrompter {
    let mut prompter = MockPrompter::new();
    prompter.expect_is_interactive().never();
    prompter.expect_confirm().never();
    prompter.expect_open_url().never();
    prompter
}

fn context<'a>(
    workspace: &'a WorkspaceContext,
    runner: &'a RecordingRunner,
    prompter: &'a dyn Prompter,
    tag: &'a str,
) -> DeployContext<'a> {
    DeployContext {
        workspace,
        runner,
        prompter,
        tag,
        build_program: "docker",
    }
}

#[tokio::test]
async fn test_unknown_target_is_validation_error_without_side_effects() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = silent_prompter();

    let err = dispatch("heroku", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTarget { .. }));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(err.to_string().contains("docker, railway, render, fly"));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_outside_project_root_is_precondition_error() {
    let ctx = WorkspaceContext::new("/nowhere", PackageManager::Pnpm, false, false);
    let runner = RecordingRunner::new();
    let prompter = silent_prompter();

    let err = dispatch("docker", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Precondition);
    assert!(err.to_string().contains("turbo.json"));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_docker_builds_each_service_image_in_order() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = silent_prompter();

    let report = dispatch("docker", &context(&ctx, &runner, &prompter, "v1"))
        .await
        .unwrap();

    assert_eq!(report.outcome, StepOutcome::Success);
    assert_eq!(
        runner.commands(),
        vec![
            "docker build -t acme-web:v1 ./apps/web",
            "docker build -t acme-api:v1 ./apps/api",
        ]
    );
    assert!(runner
        .calls()
        .iter()
        .all(|c| c.kind == CallKind::Run(OutputMode::Inherit) && c.cwd.as_deref() == Some(ctx.root())));
    assert_eq!(report.images, vec!["acme-web:v1", "acme-api:v1"]);
    assert_eq!(
        report.next_steps,
        vec!["docker push acme-web:v1", "docker push acme-api:v1"]
    );
}

#[tokio::test]
async fn test_docker_stops_at_first_failed_build() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new()
        .respond("docker build -t acme-web", [ProcessOutput::failure(1, "")]);
    let prompter = silent_prompter();

    let report = dispatch("docker", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.outcome.is_fatal());
    assert_eq!(runner.count("docker build"), 1);
    assert!(report.images.is_empty());
    assert!(report.next_steps.is_empty());
}

#[tokio::test]
async fn test_docker_second_build_failure_reports_no_images() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new()
        .respond("docker build -t acme-api", [ProcessOutput::failure(2, "")]);
    let prompter = silent_prompter();

    let report = dispatch("docker", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.outcome.is_fatal());
    assert!(report.outcome.message().unwrap().contains("acme-api:latest"));
    assert_eq!(runner.count("docker build"), 2);
    assert!(report.images.is_empty());
    assert_eq!(runner.count("docker push"), 0);
}

#[tokio::test]
async fn test_missing_railway_cli_reports_install_hint() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new().without_program("railway");
    let prompter = silent_prompter();

    let err = dispatch("railway", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Precondition);
    assert!(err.to_string().contains("npm install -g @railway/cli"));
    assert_eq!(runner.commands(), vec!["railway --version"]);
    assert_eq!(runner.calls()[0].kind, CallKind::Probe);
}

#[tokio::test]
async fn test_railway_deploys_after_probe() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = silent_prompter();

    let report = dispatch("railway", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(runner.commands(), vec!["railway --version", "railway up"]);
}

#[tokio::test]
async fn test_railway_failure_is_fatal() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new().respond("railway up", [ProcessOutput::failure(1, "")]);
    let prompter = silent_prompter();

    let report = dispatch("railway", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.outcome.is_fatal());
    assert!(report
        .outcome
        .message()
        .unwrap()
        .contains("Railway deployment failed"));
}

#[tokio::test]
async fn test_missing_fly_cli_never_deploys() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new().without_program("fly");
    let prompter = silent_prompter();

    let err = dispatch("fly", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("https://fly.io/docs/hands-on/install-flyctl/"));
    assert_eq!(runner.count("fly deploy"), 0);
}

#[tokio::test]
async fn test_fly_deploys_after_probe() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = silent_prompter();

    let report = dispatch("fly", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(runner.commands(), vec!["fly version", "fly deploy"]);
}

#[tokio::test]
async fn test_render_opens_dashboard_after_confirmation() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let mut prompter = MockPrompter::new();
    prompter.expect_is_interactive().return_const(true);
    prompter
        .expect_confirm()
        .withf(|message, default| message.contains("Open Render dashboard") && *default)
        .times(1)
        .returning(|_, _| Ok(true));
    prompter
        .expect_open_url()
        .withf(|url| url.contains("dashboard.render.com"))
        .times(1)
        .returning(|_| Ok(()));

    let report = dispatch("render", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(runner.commands(), vec!["git --version"]);
    assert!(report.notes[0].contains("deploys automatically"));
}

#[tokio::test]
async fn test_render_declined_opens_nothing() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::interactive([false]);

    let report = dispatch("render", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(prompter.questions().len(), 1);
    assert!(prompter.opened_urls().is_empty());
}

#[tokio::test]
async fn test_render_non_interactive_asks_nothing() {
    let (_dir, ctx) = project();
    let runner = RecordingRunner::new();
    let prompter = ScriptedPrompter::non_interactive();

    let report = dispatch("render", &context(&ctx, &runner, &prompter, "latest"))
        .await
        .unwrap();

    assert!(report.is_success());
    assert!(prompter.questions().is_empty());
    assert!(prompter.opened_urls().is_empty());
}

#[tokio::test]
async fn test_each_target_runs_a_distinct_procedure() {
    let mut seen: Vec<Vec<String>> = Vec::new();
    for target in ["docker", "railway", "render", "fly"] {
        let (_dir, ctx) = project();
        let runner = RecordingRunner::new();
        let prompter = ScriptedPrompter::non_interactive();
        dispatch(target, &context(&ctx, &runner, &prompter, "latest"))
            .await
            .unwrap();
        let commands = runner.commands();
        for earlier in &seen {
            assert!(commands.iter().all(|c| !earlier.contains(c)), "{target} overlaps");
        }
        seen.push(commands);
    }
}
