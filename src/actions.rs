//! One action per entry point of the deployed package.
//!
//! An action builds its [`CallPlan`], hands it to the context's submitter and
//! reports an [`ActionOutcome`]. Errors stop at the action boundary: they are
//! logged and returned as a failed outcome, never propagated, so one bad call
//! does not abort a batch.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::config::AdminConfig;
use crate::plan::{self, CallPlan};
use crate::submit::TransactionSubmitter;

pub const DEFAULT_NEW_ADMIN: &str =
    "0x309cd5105640909dec844d8cba9dc40e1dda4dcd7500acb5e358d76576016943";
pub const DEFAULT_FEE_ACCOUNT: &str =
    "0x9630777ce7127498bc1bcc810054913b38528df6c1e4ab020f0ff12adf34f0af";

/// Which of the two configured case objects an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CaseSlot {
    One,
    Two,
}

impl CaseSlot {
    pub fn object_id(self, config: &AdminConfig) -> &str {
        match self {
            CaseSlot::One => &config.case_1_id,
            CaseSlot::Two => &config.case_2_id,
        }
    }

    /// MIST split off the gas coin by a deposit into this case.
    pub fn deposit_amount(self) -> u64 {
        match self {
            CaseSlot::One => 100_000,
            CaseSlot::Two => 200_000,
        }
    }
}

impl TryFrom<u8> for CaseSlot {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(CaseSlot::One),
            2 => Ok(CaseSlot::Two),
            other => Err(format!("unknown case {other} (expected 1 or 2)")),
        }
    }
}

impl From<CaseSlot> for u8 {
    fn from(slot: CaseSlot) -> u8 {
        match slot {
            CaseSlot::One => 1,
            CaseSlot::Two => 2,
        }
    }
}

impl FromStr for CaseSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("unknown case {s:?} (expected 1 or 2)"))?;
        CaseSlot::try_from(n)
    }
}

impl fmt::Display for CaseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

fn default_new_admin() -> String {
    DEFAULT_NEW_ADMIN.to_string()
}

fn default_fee_account() -> String {
    DEFAULT_FEE_ACCOUNT.to_string()
}

/// A runnable admin operation, as named on the command line or in a batch
/// file (`{"action": "set_points_rate", "rate": 1000}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetContractAdmin {
        #[serde(default = "default_new_admin")]
        new_admin: String,
    },
    SetFeeAccount {
        #[serde(default = "default_fee_account")]
        fee_account: String,
    },
    SetPointsRate {
        rate: u64,
    },
    AddCase {
        beneficiary: String,
    },
    Deposit {
        case: CaseSlot,
    },
    PayToBeneficiary {
        case: CaseSlot,
        amount: u64,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetContractAdmin { .. } => "set_contract_admin",
            Action::SetFeeAccount { .. } => "set_fee_account",
            Action::SetPointsRate { .. } => "set_points_rate",
            Action::AddCase { .. } => "add_case",
            Action::Deposit { .. } => "deposit",
            Action::PayToBeneficiary { .. } => "pay_to_beneficiary",
        }
    }

    pub fn plan(&self, config: &AdminConfig) -> CallPlan {
        match self {
            Action::SetContractAdmin { new_admin } => plan::set_contract_admin(config, new_admin),
            Action::SetFeeAccount { fee_account } => plan::set_fee_account(config, fee_account),
            Action::SetPointsRate { rate } => plan::set_points_rate(config, *rate),
            Action::AddCase { beneficiary } => plan::add_case(config, beneficiary),
            Action::Deposit { case } => {
                plan::deposit(config, case.object_id(config), case.deposit_amount())
            }
            Action::PayToBeneficiary { case, amount } => {
                plan::pay_to_beneficiary(config, case.object_id(config), *amount)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    Succeeded {
        response: Value,
    },
    Failed {
        error: String,
        /// Present when the network answered but execution failed.
        #[serde(skip_serializing_if = "Option::is_none")]
        response: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub action: String,
    pub target: String,
    #[serde(flatten)]
    pub status: ActionStatus,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ActionStatus::Succeeded { .. })
    }

    pub fn response(&self) -> Option<&Value> {
        match &self.status {
            ActionStatus::Succeeded { response } => Some(response),
            ActionStatus::Failed { response, .. } => response.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Succeeded { .. } => None,
            ActionStatus::Failed { error, .. } => Some(error),
        }
    }
}

/// Where full network responses are echoed.
pub type ResponseSink = Box<dyn Write + Send>;

/// Configuration plus the submitter every action shares read-only.
pub struct AdminContext<S: ?Sized> {
    pub config: AdminConfig,
    /// Receives each response the network returns; `None` disables the echo.
    output: Option<Mutex<ResponseSink>>,
    pub submitter: S,
}

impl<S> AdminContext<S> {
    /// Context that echoes responses to stdout.
    pub fn new(config: AdminConfig, submitter: S) -> Self {
        Self {
            config,
            output: Some(Mutex::new(Box::new(io::stdout()))),
            submitter,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        if !echo {
            self.output = None;
        } else if self.output.is_none() {
            self.output = Some(Mutex::new(Box::new(io::stdout())));
        }
        self
    }

    /// Echo responses into `sink` instead of stdout.
    pub fn with_output(mut self, sink: ResponseSink) -> Self {
        self.output = Some(Mutex::new(sink));
        self
    }
}

impl<S: ?Sized> AdminContext<S> {
    fn echo(&self, response: &Value) {
        let Some(output) = &self.output else {
            return;
        };
        let text = serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
        let mut out = output.lock();
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!(error = %err, "failed to write response");
        }
    }
}

/// Execution failure reported inside an otherwise successful RPC response.
fn execution_error(response: &Value) -> Option<String> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                .collect::<Vec<_>>()
                .join("; ");
            return Some(joined);
        }
    }
    let status = response.get("effects")?.get("status")?;
    if status.get("status").and_then(Value::as_str) == Some("failure") {
        let detail = status
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Some(detail.to_string());
    }
    None
}

fn response_digest(response: &Value) -> Option<&str> {
    response
        .get("digest")
        .or_else(|| response.get("effects").and_then(|e| e.get("transactionDigest")))
        .and_then(Value::as_str)
}

/// Run one action to completion. Never fails: the outcome says what happened.
pub async fn execute_action<S>(ctx: &AdminContext<S>, action: &Action) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    let plan = action.plan(&ctx.config);
    let target = plan.target();
    debug!(action = action.name(), ?plan, "built call plan");

    let status = match ctx.submitter.submit(&plan).await {
        Ok(response) => {
            ctx.echo(&response);
            let digest = response_digest(&response).unwrap_or("<none>").to_string();
            match execution_error(&response) {
                None => {
                    info!(action = action.name(), call = %target, %digest, "transaction succeeded");
                    ActionStatus::Succeeded { response }
                }
                Some(detail) => {
                    error!(action = action.name(), call = %target, %digest, error = %detail, "transaction failed on chain");
                    ActionStatus::Failed {
                        error: format!("execution failed: {detail}"),
                        response: Some(response),
                    }
                }
            }
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(action = action.name(), call = %target, error = %message, "transaction not submitted");
            ActionStatus::Failed {
                error: message,
                response: None,
            }
        }
    };

    ActionOutcome {
        action: action.name().to_string(),
        target,
        status,
    }
}

pub async fn set_contract_admin<S>(ctx: &AdminContext<S>, new_admin: &str) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    let action = Action::SetContractAdmin {
        new_admin: new_admin.to_string(),
    };
    execute_action(ctx, &action).await
}

pub async fn set_fee_account<S>(ctx: &AdminContext<S>, fee_account: &str) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    let action = Action::SetFeeAccount {
        fee_account: fee_account.to_string(),
    };
    execute_action(ctx, &action).await
}

pub async fn set_points_rate<S>(ctx: &AdminContext<S>, rate: u64) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    execute_action(ctx, &Action::SetPointsRate { rate }).await
}

pub async fn add_case<S>(ctx: &AdminContext<S>, beneficiary: &str) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    let action = Action::AddCase {
        beneficiary: beneficiary.to_string(),
    };
    execute_action(ctx, &action).await
}

pub async fn deposit<S>(ctx: &AdminContext<S>, case: CaseSlot) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    execute_action(ctx, &Action::Deposit { case }).await
}

pub async fn pay_to_beneficiary<S>(ctx: &AdminContext<S>, case: CaseSlot, amount: u64) -> ActionOutcome
where
    S: TransactionSubmitter + ?Sized,
{
    execute_action(ctx, &Action::PayToBeneficiary { case, amount }).await
}
