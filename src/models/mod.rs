//! Shared data models for engine events and check outcomes.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, SyntaxFailure, Violation};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Result of checking one file.
pub enum CheckOutcome {
    Pass,
    Fail,
    /// Failed, and the details were already printed by the reporter.
    FailReported,
}

impl CheckOutcome {
    pub fn passed(self) -> bool {
        self == Self::Pass
    }

    /// Pass only when both outcomes pass; keeps `FailReported` when either
    /// side already printed its details.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Pass, Self::Pass) => Self::Pass,
            (Self::FailReported, _) | (_, Self::FailReported) => Self::FailReported,
            _ => Self::Fail,
        }
    }
}

impl From<bool> for CheckOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Outcome and captured console output for one checked file.
pub struct FileReport {
    pub file: String,
    pub outcome: CheckOutcome,
    pub output: String,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub files: usize,
    pub failed: usize,
    pub excluded: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Results of a whole lint run.
pub struct RunReport {
    pub results: Vec<FileReport>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(results: Vec<FileReport>, excluded: usize) -> Self {
        let failed = results.iter().filter(|r| !r.outcome.passed()).count();
        let summary = Summary {
            files: results.len(),
            failed,
            excluded,
        };
        Self { results, summary }
    }

    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_and_requires_both() {
        assert_eq!(CheckOutcome::Pass.and(CheckOutcome::Pass), CheckOutcome::Pass);
        assert_eq!(CheckOutcome::Pass.and(CheckOutcome::Fail), CheckOutcome::Fail);
        assert_eq!(CheckOutcome::Fail.and(CheckOutcome::Pass), CheckOutcome::Fail);
        assert_eq!(
            CheckOutcome::Fail.and(CheckOutcome::FailReported),
            CheckOutcome::FailReported
        );
    }

    #[test]
    fn test_run_report_summary() {
        let results = vec![
            FileReport {
                file: "a.py".into(),
                outcome: CheckOutcome::Pass,
                output: String::new(),
            },
            FileReport {
                file: "b.py".into(),
                outcome: CheckOutcome::FailReported,
                output: "b.py:1:1 E101 - x\n".into(),
            },
        ];
        let report = RunReport::new(results, 3);
        assert_eq!(report.summary.files, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.excluded, 3);
        assert!(!report.passed());
    }
}
