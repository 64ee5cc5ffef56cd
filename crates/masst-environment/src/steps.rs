//! The concrete `dev` steps

use crate::containers::Compose;
use crate::seed::{classify_seed_output, SeedOutcome};
use crate::session::OrchestrationSession;
use crate::step::{HandoffExit, Step, StepDetail, StepEnv, StepKind, StepReport};
use async_trait::async_trait;
use masst_core::retry::{RetryExecutor, TracingObserver};
use masst_core::{ForegroundExit, Invocation, OutputMode, ProcessOutput, StepOutcome};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Real steps for a session, in execution order
pub fn plan(session: &OrchestrationSession) -> Vec<Box<dyn Step>> {
    let mut steps: Vec<Box<dyn Step>> = vec![Box::new(Preflight)];
    if session.manages_containers() {
        steps.push(Box::new(ContainerUp));
        steps.push(Box::new(Readiness));
    }
    steps.push(Box::new(Generate));
    steps.push(Box::new(ApplySchema));
    steps.push(Box::new(Seed));
    steps.push(Box::new(Handoff));
    steps
}

/// Run and require success; the error is the single-line cause
async fn run_checked(
    env: &StepEnv,
    invocation: &Invocation,
    mode: OutputMode,
) -> Result<ProcessOutput, String> {
    env.runner
        .run(invocation, mode)
        .await
        .and_then(|out| out.check(invocation))
        .map_err(|e| e.to_string())
}

fn compose(env: &StepEnv) -> Result<Compose, StepReport> {
    Compose::new(&env.config.containers, &env.ctx).map_err(|e| StepReport::fatal(e.to_string()))
}

pub struct Preflight;

#[async_trait]
impl Step for Preflight {
    fn kind(&self) -> StepKind {
        StepKind::Preflight
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        match env.ctx.require_project_root() {
            Ok(()) => StepReport::success(),
            Err(e) => StepReport::fatal(e.to_string()),
        }
    }
}

pub struct ContainerUp;

#[async_trait]
impl Step for ContainerUp {
    fn kind(&self) -> StepKind {
        StepKind::ContainerUp
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        let compose = match compose(env) {
            Ok(compose) => compose,
            Err(report) => return report,
        };
        match run_checked(env, &compose.up(), OutputMode::Inherit).await {
            Ok(_) => StepReport::success(),
            Err(cause) => StepReport::fatal(format!(
                "Failed to start containers. Is Docker running? ({})",
                cause
            )),
        }
    }
}

pub struct Readiness;

#[async_trait]
impl Step for Readiness {
    fn kind(&self) -> StepKind {
        StepKind::Readiness
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        let compose = match compose(env) {
            Ok(compose) => compose,
            Err(report) => return report,
        };
        let probe = compose.readiness_probe();
        let policy = env.config.readiness.clone();
        let max_attempts = policy.max_attempts;
        let attempts = AtomicU32::new(0);

        let executor = RetryExecutor::builder()
            .with_policy(policy)
            .with_observer(TracingObserver::new("readiness"))
            .with_jitter(false)
            .build();

        let result = executor
            .execute(|| {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                env.reporter.readiness_attempt(attempt, max_attempts);
                let probe = &probe;
                async move {
                    match env.runner.run(probe, OutputMode::Capture).await {
                        Ok(out) if out.success => Ok(()),
                        Ok(out) => Err(format!("not ready ({})", out.status_description())),
                        Err(e) => Err(e.to_string()),
                    }
                }
            })
            .await;

        let detail = StepDetail::Readiness {
            attempts: attempts.load(Ordering::SeqCst),
        };
        match result {
            Ok(()) => StepReport::success().with_detail(detail),
            Err(err) => StepReport::fatal(format!(
                "Database readiness not confirmed after {} attempts, continuing anyway",
                err.attempts()
            ))
            .with_detail(detail),
        }
    }
}

pub struct Generate;

#[async_trait]
impl Step for Generate {
    fn kind(&self) -> StepKind {
        StepKind::Generate
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        match run_checked(env, &env.ctx.script("db:generate", &[]), OutputMode::Inherit).await {
            Ok(_) => StepReport::success(),
            Err(cause) => StepReport::fatal(format!("Failed to generate database client: {}", cause)),
        }
    }
}

pub struct ApplySchema;

#[async_trait]
impl Step for ApplySchema {
    fn kind(&self) -> StepKind {
        StepKind::ApplySchema
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        let push = env.ctx.script("db:push", &[]);

        if env.session.reset_first {
            let reset = env.ctx.script("db:push", &["--force-reset"]);
            match run_checked(env, &reset, OutputMode::Inherit).await {
                Ok(_) => return StepReport::success().with_detail(StepDetail::Schema { fell_back: false }),
                Err(cause) => info!(%cause, "forced reset failed, falling back to plain push"),
            }
            return match run_checked(env, &push, OutputMode::Inherit).await {
                Ok(_) => StepReport::success().with_detail(StepDetail::Schema { fell_back: true }),
                Err(cause) => StepReport::fatal(format!("Failed to reset database: {}", cause)),
            };
        }

        match run_checked(env, &push, OutputMode::Inherit).await {
            Ok(_) => StepReport::success().with_detail(StepDetail::Schema { fell_back: false }),
            Err(cause) => StepReport::fatal(format!("Failed to push database schema: {}", cause)),
        }
    }
}

pub struct Seed;

#[async_trait]
impl Step for Seed {
    fn kind(&self) -> StepKind {
        StepKind::Seed
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        if env.session.forces_seed() {
            let seed = env.ctx.script("db:seed", &["--force"]);
            return match run_checked(env, &seed, OutputMode::Inherit).await {
                Ok(_) => StepReport::success().with_detail(StepDetail::Seed(SeedOutcome::FreshlySeeded)),
                Err(cause) => StepReport::fatal(format!("Seeding failed: {}", cause)),
            };
        }

        let seed = env.ctx.script("db:seed", &[]);
        match run_checked(env, &seed, OutputMode::Capture).await {
            Ok(out) => {
                let outcome = classify_seed_output(&out.combined(), &env.config.seed);
                debug!(%outcome, "seed finished");
                StepReport::success().with_detail(StepDetail::Seed(outcome))
            }
            Err(cause) => StepReport::fatal(format!("Seeding skipped: {}", cause)),
        }
    }
}

pub struct Handoff;

#[async_trait]
impl Step for Handoff {
    fn kind(&self) -> StepKind {
        StepKind::Handoff
    }

    async fn run(&self, env: &StepEnv) -> StepReport {
        env.reporter.handoff(&env.config.handoff);

        let dev = env.ctx.script("dev", &[]);
        let grace = Duration::from_millis(env.config.handoff.grace_period_ms);
        match env.runner.run_foreground(&dev, &env.shutdown, grace).await {
            Ok(ForegroundExit::Interrupted) => {
                StepReport::success().with_detail(StepDetail::Handoff(HandoffExit::Interrupted))
            }
            Ok(ForegroundExit::Exited { success: true, .. }) => {
                StepReport::success().with_detail(StepDetail::Handoff(HandoffExit::Exited))
            }
            Ok(ForegroundExit::Exited { code, .. }) => StepReport {
                outcome: StepOutcome::fatal(match code {
                    Some(code) => format!("Dev servers exited with code {}", code),
                    None => "Dev servers were terminated by a signal".to_string(),
                }),
                detail: Some(StepDetail::Handoff(HandoffExit::Exited)),
            },
            Err(e) => StepReport::fatal(e.to_string()),
        }
    }
}
