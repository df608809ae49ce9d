//! Call plans: what a transaction will do, before any object is resolved.
//!
//! A plan is plain data. Building one never fails, even from empty
//! identifiers; malformed ids are reported when the plan is turned into a PTB.

use serde::{Deserialize, Serialize};

use crate::config::AdminConfig;

pub const CONFIG_MODULE: &str = "config";
pub const VAULT_MODULE: &str = "vault";

/// A pure (BCS-encoded) argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PureArg {
    U64(u64),
    Address(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanArg {
    /// An on-chain object, owned or shared.
    Object(String),
    Pure(PureArg),
    /// The coin split off the gas object earlier in the same transaction.
    SplitCoin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCallPlan {
    pub package: String,
    pub module: String,
    pub function: String,
    pub args: Vec<PlanArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPlan {
    /// Amount to split off the gas coin before the call.
    pub gas_split: Option<u64>,
    pub call: MoveCallPlan,
}

impl CallPlan {
    fn new(config: &AdminConfig, module: &str, function: &str, args: Vec<PlanArg>) -> Self {
        Self {
            gas_split: None,
            call: MoveCallPlan {
                package: config.package_id.clone(),
                module: module.to_string(),
                function: function.to_string(),
                args,
            },
        }
    }

    fn with_gas_split(mut self, amount: u64) -> Self {
        self.gas_split = Some(amount);
        self
    }

    /// `module::function`
    pub fn target(&self) -> String {
        format!("{}::{}", self.call.module, self.call.function)
    }

    /// `package::module::function`
    pub fn full_target(&self) -> String {
        format!("{}::{}", self.call.package, self.target())
    }
}

fn object(id: &str) -> PlanArg {
    PlanArg::Object(id.to_string())
}

pub fn set_contract_admin(config: &AdminConfig, new_admin: &str) -> CallPlan {
    CallPlan::new(
        config,
        CONFIG_MODULE,
        "set_contract_admin",
        vec![
            object(&config.admin_cap_id),
            object(&config.config_id),
            PlanArg::Pure(PureArg::Address(new_admin.to_string())),
        ],
    )
}

pub fn set_fee_account(config: &AdminConfig, fee_account: &str) -> CallPlan {
    CallPlan::new(
        config,
        CONFIG_MODULE,
        "set_fee_account",
        vec![
            object(&config.admin_cap_id),
            object(&config.config_id),
            PlanArg::Pure(PureArg::Address(fee_account.to_string())),
        ],
    )
}

pub fn set_points_rate(config: &AdminConfig, rate: u64) -> CallPlan {
    CallPlan::new(
        config,
        CONFIG_MODULE,
        "set_points_rate",
        vec![
            object(&config.admin_cap_id),
            object(&config.config_id),
            PlanArg::Pure(PureArg::U64(rate)),
        ],
    )
}

pub fn add_case(config: &AdminConfig, beneficiary: &str) -> CallPlan {
    CallPlan::new(
        config,
        VAULT_MODULE,
        "add_case",
        vec![
            object(&config.admin_cap_id),
            object(&config.config_id),
            object(&config.case_count_id),
            PlanArg::Pure(PureArg::Address(beneficiary.to_string())),
        ],
    )
}

/// Deposit `amount` MIST, split off the gas coin, into the case object.
pub fn deposit(config: &AdminConfig, case_id: &str, amount: u64) -> CallPlan {
    CallPlan::new(
        config,
        VAULT_MODULE,
        "deposit",
        vec![object(case_id), PlanArg::SplitCoin],
    )
    .with_gas_split(amount)
}

pub fn pay_to_beneficiary(config: &AdminConfig, case_id: &str, amount: u64) -> CallPlan {
    CallPlan::new(
        config,
        VAULT_MODULE,
        "pay_to_beneficiary",
        vec![
            object(case_id),
            object(&config.config_id),
            PlanArg::Pure(PureArg::U64(amount)),
        ],
    )
}
