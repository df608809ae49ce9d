//! Sequential dispatch of named actions.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::actions::{execute_action, Action, ActionOutcome, AdminContext};
use crate::submit::TransactionSubmitter;
use crate::utils::read_json;

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ActionOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Exit decision for a finished run. Failed actions only turn into an
    /// error under `strict`.
    pub fn ensure_success(&self, strict: bool) -> Result<()> {
        if strict && !self.all_succeeded() {
            bail!("{} of {} actions failed", self.failed(), self.outcomes.len());
        }
        Ok(())
    }
}

/// Run `actions` in order, each awaited before the next starts.
///
/// A failed action is recorded and the batch continues.
pub async fn run_batch<S>(ctx: &AdminContext<S>, actions: &[Action]) -> BatchReport
where
    S: TransactionSubmitter + ?Sized,
{
    let mut report = BatchReport::default();
    for (i, action) in actions.iter().enumerate() {
        info!(step = i + 1, total = actions.len(), action = action.name(), "running action");
        report.outcomes.push(execute_action(ctx, action).await);
    }
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

/// Load a batch file: a JSON array of actions, or `-` for stdin.
pub fn load_batch(path: &Path) -> Result<Vec<Action>> {
    let value = read_json(path)?;
    serde_json::from_value(value).with_context(|| {
        format!(
            "batch {} must be a JSON array of actions like {{\"action\": \"set_points_rate\", \"rate\": 1000}}",
            path.display()
        )
    })
}
