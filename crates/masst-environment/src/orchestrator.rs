//! Sequential `dev` state machine

use crate::step::{FailurePolicy, Step, StepDetail, StepEnv, StepKind, StepReport};
use crate::steps;
use masst_core::StepOutcome;
use tracing::info;

/// Exit code for a session cut short by the user
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// A step that ran and what it reported, after the failure policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    pub report: StepReport,
}

/// Why a session stopped early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    Fatal { step: StepKind, message: String },
    /// Shutdown fired before or during `step`
    Interrupted { step: StepKind },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub records: Vec<StepRecord>,
    pub abort: Option<Abort>,
}

impl SessionReport {
    pub fn record(&self, kind: StepKind) -> Option<&StepRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }

    pub fn ran(&self, kind: StepKind) -> bool {
        self.record(kind).is_some()
    }

    pub fn detail(&self, kind: StepKind) -> Option<StepDetail> {
        self.record(kind).and_then(|r| r.report.detail)
    }

    /// Warning messages in step order
    pub fn warnings(&self) -> Vec<(StepKind, &str)> {
        self.records
            .iter()
            .filter_map(|r| match &r.report.outcome {
                StepOutcome::Warning(msg) => Some((r.kind, msg.as_str())),
                _ => None,
            })
            .collect()
    }

    /// 0 when every step ran, 1 on a fatal step, 130 on interrupt
    pub fn exit_code(&self) -> i32 {
        match self.abort {
            None => 0,
            Some(Abort::Fatal { .. }) => 1,
            Some(Abort::Interrupted { .. }) => INTERRUPTED_EXIT_CODE,
        }
    }
}

/// Downgrade `Fatal` to `Warning` for steps allowed to degrade
fn apply_policy(kind: StepKind, report: StepReport) -> StepReport {
    match (kind.failure_policy(), report.outcome) {
        (FailurePolicy::Degrade, StepOutcome::Fatal(message)) => StepReport {
            outcome: StepOutcome::Warning(message),
            detail: report.detail,
        },
        (_, outcome) => StepReport {
            outcome,
            detail: report.detail,
        },
    }
}

pub struct Orchestrator {
    env: StepEnv,
}

impl Orchestrator {
    pub fn new(env: StepEnv) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &StepEnv {
        &self.env
    }

    pub fn plan(&self) -> Vec<Box<dyn Step>> {
        steps::plan(&self.env.session)
    }

    /// Run the planned steps for this session
    pub async fn run(&self) -> SessionReport {
        self.run_steps(self.plan()).await
    }

    /// Run `steps` strictly in order.
    ///
    /// Stops at the first `Fatal` (after policy) or when shutdown fires.
    /// Steps other than the handoff are raced against shutdown, and losing
    /// the race drops the step's future along with any child it spawned.
    pub async fn run_steps(&self, steps: Vec<Box<dyn Step>>) -> SessionReport {
        let mut records = Vec::with_capacity(steps.len());

        for step in steps {
            let kind = step.kind();
            if self.env.shutdown.is_triggered() {
                return Self::interrupted(records, kind);
            }

            info!(step = ?kind, "step started");
            self.env.reporter.step_started(kind);

            let report = if kind.owns_shutdown() {
                step.run(&self.env).await
            } else {
                tokio::select! {
                    biased;
                    _ = self.env.shutdown.wait() => {
                        return Self::interrupted(records, kind);
                    }
                    report = step.run(&self.env) => report,
                }
            };

            let report = apply_policy(kind, report);
            match &report.outcome {
                StepOutcome::Success => info!(step = ?kind, "step succeeded"),
                StepOutcome::Warning(msg) => info!(step = ?kind, %msg, "step degraded"),
                StepOutcome::Fatal(msg) => info!(step = ?kind, %msg, "step failed"),
            }
            self.env.reporter.step_finished(kind, &report);

            let fatal = match &report.outcome {
                StepOutcome::Fatal(message) => Some(message.clone()),
                _ => None,
            };
            records.push(StepRecord { kind, report });

            if let Some(message) = fatal {
                return SessionReport {
                    records,
                    abort: Some(Abort::Fatal {
                        step: kind,
                        message,
                    }),
                };
            }
        }

        SessionReport {
            records,
            abort: None,
        }
    }

    fn interrupted(records: Vec<StepRecord>, step: StepKind) -> SessionReport {
        info!(step = ?step, "interrupted");
        SessionReport {
            records,
            abort: Some(Abort::Interrupted { step }),
        }
    }
}
