//! Signing and submitting call plans over Sui JSON-RPC.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared_crypto::intent::{Intent, IntentMessage};
use sui_json_rpc_types::{Coin, SuiObjectDataOptions, SuiTransactionBlockResponseOptions};
use sui_sdk::{SuiClient, SuiClientBuilder};
use sui_types::base_types::{ObjectID, ObjectRef, SuiAddress};
use sui_types::crypto::{Signature, SuiKeyPair};
use sui_types::object::Owner;
use sui_types::quorum_driver_types::ExecuteTransactionRequestType;
use sui_types::transaction::{ObjectArg, SharedObjectMutability, Transaction, TransactionData};
use tracing::{debug, info};

use crate::config::AdminConfig;
use crate::plan::CallPlan;
use crate::ptb::{build_programmable, ObjectResolver};

/// Submits one call plan and returns the network response as JSON.
///
/// The seam between actions and the network: tests substitute a recording
/// implementation.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(&self, plan: &CallPlan) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Sign, execute and wait for local execution.
    #[default]
    Execute,
    /// Simulate against current state; nothing is committed.
    DryRun,
}

/// Balance the gas payment must hold: the budget plus any amount the plan
/// splits off the gas coin.
pub fn required_gas_balance(gas_budget: u64, plan: &CallPlan) -> u64 {
    gas_budget.saturating_add(plan.gas_split.unwrap_or(0))
}

/// The process-wide authenticated channel: one keypair, one client.
pub struct SuiSubmitter {
    client: SuiClient,
    keypair: SuiKeyPair,
    sender: SuiAddress,
    gas_budget: u64,
    mode: SubmitMode,
}

impl SuiSubmitter {
    /// Connect to the configured fullnode, signing as `keypair`.
    pub async fn connect(
        config: &AdminConfig,
        keypair: SuiKeyPair,
        mode: SubmitMode,
    ) -> Result<Self> {
        let sender = SuiAddress::from(&keypair.public());
        let client = SuiClientBuilder::default()
            .build(&config.rpc_url)
            .await
            .with_context(|| format!("connect rpc: {}", config.rpc_url))?;
        info!(%sender, rpc_url = %config.rpc_url, ?mode, "signer ready");
        Ok(Self {
            client,
            keypair,
            sender,
            gas_budget: config.gas_budget,
            mode,
        })
    }

    /// Sender coins covering [`required_gas_balance`] for `plan`.
    async fn select_gas_coins(&self, plan: &CallPlan) -> Result<Vec<ObjectRef>> {
        let required = required_gas_balance(self.gas_budget, plan);
        let coins = self
            .client
            .coin_read_api()
            .select_coins(self.sender, None, u128::from(required), vec![])
            .await
            .with_context(|| {
                format!(
                    "select gas coins covering {required} MIST for sender {}",
                    self.sender
                )
            })?;
        if coins.is_empty() {
            bail!("no Coin<SUI> gas coins found for sender: {}", self.sender);
        }
        debug!(required, count = coins.len(), "selected gas coins");
        Ok(coins.iter().map(Coin::object_ref).collect())
    }

    fn response_options() -> SuiTransactionBlockResponseOptions {
        SuiTransactionBlockResponseOptions::new()
            .with_input()
            .with_effects()
            .with_events()
            .with_object_changes()
    }
}

#[async_trait]
impl ObjectResolver for SuiSubmitter {
    async fn resolve_object(&self, id: ObjectID) -> Result<ObjectArg> {
        let resp = self
            .client
            .read_api()
            .get_object_with_options(id, SuiObjectDataOptions::new().with_owner())
            .await
            .with_context(|| format!("get_object {id}"))?;
        let Some(data) = resp.data else {
            bail!("object not found: {id}");
        };
        let owner = data
            .owner
            .clone()
            .ok_or_else(|| anyhow!("object missing owner: {id}"))?;
        let arg = match owner {
            Owner::Shared {
                initial_shared_version,
            } => ObjectArg::SharedObject {
                id,
                initial_shared_version,
                mutability: SharedObjectMutability::Mutable,
            },
            _ => ObjectArg::ImmOrOwnedObject(data.object_ref()),
        };
        debug!(%id, ?arg, "resolved object");
        Ok(arg)
    }
}

#[async_trait]
impl TransactionSubmitter for SuiSubmitter {
    async fn submit(&self, plan: &CallPlan) -> Result<Value> {
        let pt = build_programmable(plan, self).await?;
        let gas = self.select_gas_coins(plan).await?;
        let gas_price = self
            .client
            .read_api()
            .get_reference_gas_price()
            .await
            .context("get_reference_gas_price")?;
        let tx_data =
            TransactionData::new_programmable(self.sender, gas, pt, self.gas_budget, gas_price);

        match self.mode {
            SubmitMode::DryRun => {
                let res = self
                    .client
                    .read_api()
                    .dry_run_transaction_block(tx_data)
                    .await
                    .context("dry_run_transaction_block")?;
                serde_json::to_value(&res).context("serialize dry-run JSON")
            }
            SubmitMode::Execute => {
                let intent_msg = IntentMessage::new(Intent::sui_transaction(), tx_data.clone());
                let signature = Signature::new_secure(&intent_msg, &self.keypair);
                let tx = Transaction::from_data(tx_data, vec![signature]);
                info!(call = %plan.full_target(), digest = %tx.digest(), "submitting transaction");
                let res = self
                    .client
                    .quorum_driver_api()
                    .execute_transaction_block(
                        tx,
                        Self::response_options(),
                        Some(ExecuteTransactionRequestType::WaitForLocalExecution),
                    )
                    .await
                    .context("execute_transaction_block")?;
                serde_json::to_value(&res).context("serialize transaction response")
            }
        }
    }
}
