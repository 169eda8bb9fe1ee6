//! Stage sequencing with fail-fast or tolerant error policy.
//!
//! Every pipeline stage runs through a [`StageController`]. In fail-fast
//! mode (the default) the first failure is recorded and every subsequent
//! stage becomes a logged no-op skip; tolerant mode attempts every stage
//! regardless, so a batch of candidate inputs can be validated in one pass.
//! There is no automatic retry in either mode.

use tracing::{debug, error};

/// How a stage invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Failed,
    /// Not attempted because an earlier stage failed in fail-fast mode.
    Skipped,
}

/// Record of one stage invocation, for the run summary.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub name: String,
    pub status: StageStatus,
    /// First line of the failure message, empty otherwise.
    pub detail: String,
}

/// Sequences pipeline stages under one error policy.
#[derive(Debug, Default)]
pub struct StageController {
    tolerant: bool,
    had_error: bool,
    outcomes: Vec<StageOutcome>,
}

impl StageController {
    pub fn new(tolerant: bool) -> Self {
        Self {
            tolerant,
            had_error: false,
            outcomes: Vec::new(),
        }
    }

    /// Whether any stage has failed so far.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Run one stage, honoring the error policy.
    ///
    /// Returns the stage's value, or `None` when the stage failed or was
    /// skipped. Failures are logged one structured line per message line,
    /// never as a raw backtrace.
    pub fn run_stage<T>(
        &mut self,
        name: &str,
        stage: impl FnOnce() -> anyhow::Result<T>,
    ) -> Option<T> {
        if self.had_error && !self.tolerant {
            debug!("Skipping stage '{name}' after earlier failure");
            self.outcomes.push(StageOutcome {
                name: name.to_string(),
                status: StageStatus::Skipped,
                detail: String::new(),
            });
            return None;
        }
        match stage() {
            Ok(value) => {
                self.outcomes.push(StageOutcome {
                    name: name.to_string(),
                    status: StageStatus::Completed,
                    detail: String::new(),
                });
                Some(value)
            }
            Err(e) => {
                let message = format!("{e:#}");
                for line in message.lines() {
                    error!("{line}");
                }
                self.had_error = true;
                self.outcomes.push(StageOutcome {
                    name: name.to_string(),
                    status: StageStatus::Failed,
                    detail: message.lines().next().unwrap_or_default().to_string(),
                });
                None
            }
        }
    }

    /// Outcomes of every stage invocation so far, in order.
    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<StageOutcome> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn fail_fast_skips_after_first_failure() {
        let mut controller = StageController::new(false);

        assert_eq!(controller.run_stage("first", || Ok(1)), Some(1));
        assert_eq!(
            controller.run_stage("second", || Err::<i32, _>(anyhow!("boom"))),
            None
        );
        // third never runs
        let mut ran = false;
        assert_eq!(
            controller.run_stage("third", || {
                ran = true;
                Ok(3)
            }),
            None
        );
        assert!(!ran);
        assert!(controller.had_error());

        let statuses: Vec<StageStatus> = controller
            .outcomes()
            .iter()
            .map(|outcome| outcome.status)
            .collect();
        assert_eq!(statuses, vec![
            StageStatus::Completed,
            StageStatus::Failed,
            StageStatus::Skipped,
        ]);
    }

    #[test]
    fn tolerant_mode_attempts_every_stage() {
        let mut controller = StageController::new(true);

        assert_eq!(
            controller.run_stage("first", || Err::<i32, _>(anyhow!("boom"))),
            None
        );
        assert_eq!(controller.run_stage("second", || Ok(2)), Some(2));
        assert_eq!(
            controller.run_stage("third", || Err::<i32, _>(anyhow!("bang"))),
            None
        );
        assert!(controller.had_error());

        let failed = controller
            .outcomes()
            .iter()
            .filter(|outcome| outcome.status == StageStatus::Failed)
            .count();
        assert_eq!(failed, 2);
    }

    #[test]
    fn failure_detail_keeps_first_message_line() {
        let mut controller = StageController::new(false);
        controller.run_stage("stage", || {
            Err::<(), _>(anyhow!("first line\nsecond line"))
        });
        assert_eq!(controller.outcomes()[0].detail, "first line");
    }
}
