//! Admin and test transactions for the deployed vault package.
//!
//! Every operation is one Programmable Transaction Block containing a single
//! move call into the package's `config` or `vault` module:
//!
//! - **Configuration**: environment (and optional `.env`) values, see [`config`]
//! - **Call plans**: SDK-independent description of one call, see [`plan`]
//! - **PTB construction**: plans turned into `ProgrammableTransaction`s, see [`ptb`]
//! - **Submission**: signing and executing over JSON-RPC, see [`submit`]
//! - **Actions and dispatch**: per-entry-point actions and batch runs, see
//!   [`actions`] and [`dispatch`]

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod plan;
pub mod ptb;
pub mod signer;
pub mod submit;
pub mod utils;

pub use actions::{
    execute_action, Action, ActionOutcome, ActionStatus, AdminContext, CaseSlot, ResponseSink,
};
pub use config::AdminConfig;
pub use dispatch::{load_batch, run_batch, BatchReport};
pub use plan::{CallPlan, MoveCallPlan, PlanArg, PureArg};
pub use submit::{SubmitMode, SuiSubmitter, TransactionSubmitter};
