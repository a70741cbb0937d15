//! Drives submissions through the judge and reduces them into a report.

use std::future::Future;

use futures_util::stream::{self, StreamExt};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::model::Language;
use crate::ports::judge::JudgeClient;
use crate::testcase::NormalizedTestCase;

use super::policy::JudgeOptions;
use super::report::{JudgeReport, TestOutcome};
use super::submission::{JudgeSubmission, PreparedSource, SubmissionState};

/// Runs every test of a prepared program against a [`JudgeClient`].
///
/// Infrastructure trouble never aborts a run: the affected test resolves to
/// [`super::Verdict::InfrastructureError`] and the rest continue.
pub struct Orchestrator<'a> {
    client: &'a dyn JudgeClient,
    options: JudgeOptions,
    run_id: Option<String>,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator over `client`.
    #[must_use]
    pub fn new(client: &'a dyn JudgeClient, options: JudgeOptions) -> Self {
        Self { client, options, run_id: None }
    }

    /// Tags log lines with a run identifier.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Judges `source` against every test and aggregates in index order.
    pub async fn judge(
        &self,
        language: Language,
        source: &PreparedSource,
        tests: &[NormalizedTestCase],
    ) -> JudgeReport {
        let deadline = self.options.deadline.map(|budget| Instant::now() + budget);
        let run_id = self.run_id.as_deref().unwrap_or("-");
        info!(run_id, %language, tests = tests.len(), "judging started");

        let outcomes: Vec<TestOutcome> = stream::iter(tests.iter().enumerate())
            .map(|(index, test)| {
                self.run_one(language, JudgeSubmission::new(index, source, test), deadline)
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let report = JudgeReport::from_outcomes(outcomes);
        info!(
            run_id,
            correct = report.correct_count,
            total = report.tests_count,
            status = ?report.overall_status,
            "judging finished"
        );
        report
    }

    async fn run_one(
        &self,
        language: Language,
        mut submission: JudgeSubmission<'_>,
        deadline: Option<Instant>,
    ) -> TestOutcome {
        let index = submission.index();

        if deadline.is_some_and(|at| Instant::now() >= at) {
            submission.fail("judging deadline exceeded before submission");
            warn!(index, "deadline exceeded before submission");
            return submission.into_outcome();
        }

        debug!(index, "submitting");
        match until(deadline, self.client.submit(&submission.request(language))).await {
            Some(Ok(token)) => submission.accept(token),
            Some(Err(err)) => {
                warn!(index, error = %err, "submission failed");
                submission.fail(format!("submission failed: {err}"));
            }
            None => {
                warn!(index, "deadline exceeded while submitting");
                submission.fail("judging deadline exceeded during submission");
            }
        }
        let Some(token) = submission.token().map(str::to_string) else {
            return submission.into_outcome();
        };

        let poll = self.options.poll;
        let mut attempt = 0;
        while !submission.is_resolved() {
            if attempt >= poll.max_attempts {
                warn!(index, %token, attempts = attempt, "poll budget exhausted");
                submission.fail(format!("no verdict after {attempt} status polls"));
                break;
            }

            let mut delay = poll.delay_for(attempt);
            if let Some(at) = deadline {
                let now = Instant::now();
                if now >= at {
                    warn!(index, %token, "deadline exceeded while polling");
                    submission.fail("judging deadline exceeded");
                    break;
                }
                delay = delay.min(at - now);
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;

            match until(deadline, self.client.status(&token)).await {
                Some(Ok(status)) => submission.observe(&status),
                Some(Err(err)) => warn!(index, %token, attempt, error = %err, "status poll failed"),
                None => {
                    warn!(index, %token, "deadline exceeded during status poll");
                    submission.fail("judging deadline exceeded");
                }
            }
        }

        if let SubmissionState::Resolved(verdict) = submission.state() {
            debug!(index, %verdict, "resolved");
        }
        submission.into_outcome()
    }
}

/// Awaits `call`, or gives up with `None` once `deadline` passes.
async fn until<F: Future>(deadline: Option<Instant>, call: F) -> Option<F::Output> {
    match deadline {
        Some(at) => tokio::time::timeout_at(at, call).await.ok(),
        None => Some(call.await),
    }
}
