//! Turn a [`CallPlan`] into a `ProgrammableTransaction`.
//!
//! Object inputs go through an [`ObjectResolver`] so construction can be
//! exercised without a fullnode.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use sui_types::base_types::ObjectID;
use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;
use sui_types::transaction::{
    Argument, Command, ObjectArg, ProgrammableMoveCall, ProgrammableTransaction,
};

use crate::plan::{CallPlan, PlanArg, PureArg};
use crate::utils::{parse_identifier, parse_object_id, parse_sui_address};

/// Resolves an object id into the input form a transaction needs.
///
/// Address-owned and immutable objects are passed by reference; shared
/// objects by their initial shared version.
#[async_trait]
pub trait ObjectResolver: Send + Sync {
    async fn resolve_object(&self, id: ObjectID) -> Result<ObjectArg>;
}

/// Build the PTB for `plan`: an optional `SplitCoins` off the gas coin,
/// followed by exactly one `MoveCall`.
pub async fn build_programmable<R>(plan: &CallPlan, resolver: &R) -> Result<ProgrammableTransaction>
where
    R: ObjectResolver + ?Sized,
{
    let call = &plan.call;
    let package = parse_object_id(&call.package).context("package id")?;
    let module = parse_identifier(&call.module)?;
    let function = parse_identifier(&call.function)?;

    let mut ptb = ProgrammableTransactionBuilder::new();

    let split_coin = match plan.gas_split {
        Some(amount) => {
            let amount_arg = ptb.pure(amount).context("ptb.pure split amount")?;
            let Argument::Result(idx) =
                ptb.command(Command::SplitCoins(Argument::GasCoin, vec![amount_arg]))
            else {
                bail!("SplitCoins did not produce a command result");
            };
            Some(Argument::NestedResult(idx, 0))
        }
        None => None,
    };

    let mut arguments = Vec::with_capacity(call.args.len());
    for (i, arg) in call.args.iter().enumerate() {
        let argument = match arg {
            PlanArg::Object(id) => {
                let id = parse_object_id(id).with_context(|| format!("argument {i}"))?;
                let object_arg = resolver
                    .resolve_object(id)
                    .await
                    .with_context(|| format!("resolve argument {i} ({id})"))?;
                ptb.obj(object_arg).context("ptb.obj")?
            }
            PlanArg::Pure(PureArg::U64(value)) => ptb.pure(*value).context("ptb.pure u64")?,
            PlanArg::Pure(PureArg::Address(addr)) => {
                let addr = parse_sui_address(addr).with_context(|| format!("argument {i}"))?;
                ptb.pure(addr).context("ptb.pure address")?
            }
            PlanArg::SplitCoin => split_coin
                .ok_or_else(|| anyhow!("argument {i} uses the split coin but the plan has no gas split"))?,
        };
        arguments.push(argument);
    }

    ptb.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
        package,
        module: module.to_string(),
        function: function.to_string(),
        type_arguments: vec![],
        arguments,
    })));

    Ok(ptb.finish())
}
