//! Aggregated judging results.

use serde::{Deserialize, Serialize};

use super::verdict::Verdict;

/// Pass iff every test is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every test accepted (vacuously true for zero tests).
    Pass,
    /// At least one test was not accepted.
    Fail,
}

/// Result of one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// 0-based position in the test list.
    pub index: usize,
    /// Judge token, if the submission got that far.
    pub token: Option<String>,
    /// Final verdict.
    pub verdict: Verdict,
    /// stderr or compiler output.
    pub diagnostic: Option<String>,
}

/// Summary of a judging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeReport {
    /// Number of tests judged.
    pub tests_count: usize,
    /// Number of accepted tests.
    pub correct_count: usize,
    /// 0-based indexes of tests that were not accepted, ascending.
    pub incorrect_indexes: Vec<usize>,
    /// Earliest non-empty diagnostic in index order.
    pub first_diagnostic: Option<String>,
    /// Pass or fail.
    pub overall_status: OverallStatus,
    /// Per-test detail, in index order.
    pub outcomes: Vec<TestOutcome>,
}

impl JudgeReport {
    /// Reduces outcomes in index order, whatever order they arrived in.
    #[must_use]
    pub fn from_outcomes(mut outcomes: Vec<TestOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);

        let mut correct_count = 0;
        let mut incorrect_indexes = Vec::new();
        let mut first_diagnostic = None;
        for outcome in &outcomes {
            if outcome.verdict.is_correct() {
                correct_count += 1;
            } else {
                incorrect_indexes.push(outcome.index);
            }
            if first_diagnostic.is_none() {
                first_diagnostic =
                    outcome.diagnostic.clone().filter(|text| !text.trim().is_empty());
            }
        }

        let tests_count = outcomes.len();
        let overall_status =
            if correct_count == tests_count { OverallStatus::Pass } else { OverallStatus::Fail };

        Self {
            tests_count,
            correct_count,
            incorrect_indexes,
            first_diagnostic,
            overall_status,
            outcomes,
        }
    }

    /// True on [`OverallStatus::Pass`].
    #[must_use]
    pub fn passed(&self) -> bool {
        self.overall_status == OverallStatus::Pass
    }

    /// 1-based numbers of failing tests, as shown to authors.
    #[must_use]
    pub fn failed_test_numbers(&self) -> Vec<usize> {
        self.incorrect_indexes.iter().map(|index| index + 1).collect()
    }

    /// Human-readable result.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed() {
            return format!("All {} tests passed.", self.tests_count);
        }
        let failed = self
            .failed_test_numbers()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let mut text = format!(
            "{}/{} tests passed. Failed tests: {failed}",
            self.correct_count, self.tests_count
        );
        if let Some(diagnostic) = &self.first_diagnostic {
            text.push_str("\nDiagnostic output:\n");
            text.push_str(diagnostic.trim_end());
        }
        text
    }
}
