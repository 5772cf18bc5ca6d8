//! Outcome of one diagnostics run.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: &'static str,
    pub outcome: StepOutcome,
}

/// Every step that ran, in execution order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            steps: Vec::new(),
        }
    }

    pub(crate) fn pass(&mut self, step: &'static str) {
        self.steps.push(StepReport {
            step,
            outcome: StepOutcome::Passed,
        });
    }

    pub(crate) fn fail(&mut self, step: &'static str, reason: impl Into<String>) {
        self.steps.push(StepReport {
            step,
            outcome: StepOutcome::Failed(reason.into()),
        });
    }

    /// True when no best-effort step failed.
    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|s| s.outcome == StepOutcome::Passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }

    pub fn outcome(&self, step: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step).map(|s| &s.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_tracked() {
        let mut report = RunReport::new(Uuid::nil());
        report.pass("a");
        report.fail("b", "boom");

        assert!(!report.all_passed());
        assert_eq!(report.step_names(), vec!["a", "b"]);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.outcome("b"), Some(&StepOutcome::Failed("boom".into())));
        assert_eq!(report.outcome("c"), None);
    }
}
