//! vault-admin: admin and test transactions for the deployed vault package
//!
//! Each subcommand submits one transaction calling one entry point of the
//! package's `config` or `vault` module. Object ids and the signing mnemonic
//! come from the environment (or a `.env` file). Without a subcommand the
//! signer is initialized and nothing is submitted.
//!
//! ## Example Usage
//!
//! ```bash
//! # Show the address derived from MNEMONICS
//! vault-admin address
//!
//! # Set the points accrual rate
//! vault-admin set-points-rate 1000
//!
//! # Deposit into case 2 (splits 200000 MIST off the gas coin)
//! vault-admin deposit --case 2
//!
//! # Simulate a payout without committing it
//! vault-admin --dry-run pay-to-beneficiary --case 1 90000
//!
//! # Run several actions in order
//! vault-admin batch --file actions.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vault_admin::actions::{CaseSlot, DEFAULT_FEE_ACCOUNT, DEFAULT_NEW_ADMIN};
use vault_admin::config::{load_env_file, AdminConfig};
use vault_admin::signer::derive_keypair;
use vault_admin::{load_batch, run_batch, Action, AdminContext, SubmitMode, SuiSubmitter};

#[derive(Parser)]
#[command(
    name = "vault-admin",
    author,
    version,
    about = "Admin and test transactions for the deployed vault package",
    long_about = "Builds, signs and submits one programmable transaction per action against the \
                  deployed config/vault package.\n\n\
                  Reads MNEMONICS, PACKAGE_ID, ADMIN_CAP_ID, CONFIG_ID, CASE_COUNT_ID, CASE_1_ID \
                  and CASE_2_ID from the environment or a .env file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load variables from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Fullnode RPC URL (overrides SUI_RPC_URL; default: testnet fullnode)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Gas budget in MIST (overrides GAS_BUDGET)
    #[arg(long, global = true)]
    gas_budget: Option<u64>,

    /// Key derivation path (overrides DERIVATION_PATH)
    #[arg(long, global = true)]
    derivation_path: Option<String>,

    /// Dry-run transactions instead of executing them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print a JSON report instead of each raw response
    #[arg(long, global = true)]
    json: bool,

    /// Exit non-zero when any action fails
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// config::set_contract_admin
    SetContractAdmin {
        /// New admin address
        #[arg(long, default_value = DEFAULT_NEW_ADMIN)]
        address: String,
    },

    /// config::set_fee_account
    SetFeeAccount {
        /// New fee-recipient address
        #[arg(long, default_value = DEFAULT_FEE_ACCOUNT)]
        address: String,
    },

    /// config::set_points_rate
    SetPointsRate { rate: u64 },

    /// vault::add_case under the case counter
    AddCase {
        /// Beneficiary address of the new case
        beneficiary: String,
    },

    /// vault::deposit a fixed amount split off the gas coin (case 1: 100000, case 2: 200000)
    Deposit {
        #[arg(long)]
        case: CaseSlot,
    },

    /// vault::pay_to_beneficiary from a case
    PayToBeneficiary {
        #[arg(long)]
        case: CaseSlot,
        amount: u64,
    },

    /// Run a JSON array of actions sequentially ('-' reads stdin)
    Batch {
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the address derived from MNEMONICS
    Address,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::SetContractAdmin { .. } => "set-contract-admin",
            Commands::SetFeeAccount { .. } => "set-fee-account",
            Commands::SetPointsRate { .. } => "set-points-rate",
            Commands::AddCase { .. } => "add-case",
            Commands::Deposit { .. } => "deposit",
            Commands::PayToBeneficiary { .. } => "pay-to-beneficiary",
            Commands::Batch { .. } => "batch",
            Commands::Address => "address",
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vault_admin=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn apply_overrides(config: &mut AdminConfig, cli: &Cli) {
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(budget) = cli.gas_budget {
        config.gas_budget = budget;
    }
    if let Some(path) = &cli.derivation_path {
        config.derivation_path = path.clone();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Before the subscriber, so RUST_LOG from the file applies.
    let env_file = load_env_file(cli.env_file.as_deref())?;
    init_tracing();
    if let Some(path) = env_file {
        info!(path = %path.display(), "loaded env file");
    }

    let mut config = AdminConfig::from_env()?;
    apply_overrides(&mut config, &cli);
    info!(
        command = cli.command.as_ref().map_or("none", Commands::name),
        "starting"
    );

    // Signer initialization is fatal, even for a run with nothing to submit.
    let (sender, keypair) = derive_keypair(&config.mnemonic, &config.derivation_path)?;

    let actions = match &cli.command {
        None => Vec::new(),
        Some(Commands::Address) => {
            println!("{sender}");
            return Ok(());
        }
        Some(Commands::Batch { file }) => load_batch(file)?,
        Some(Commands::SetContractAdmin { address }) => vec![Action::SetContractAdmin {
            new_admin: address.clone(),
        }],
        Some(Commands::SetFeeAccount { address }) => vec![Action::SetFeeAccount {
            fee_account: address.clone(),
        }],
        Some(Commands::SetPointsRate { rate }) => vec![Action::SetPointsRate { rate: *rate }],
        Some(Commands::AddCase { beneficiary }) => vec![Action::AddCase {
            beneficiary: beneficiary.clone(),
        }],
        Some(Commands::Deposit { case }) => vec![Action::Deposit { case: *case }],
        Some(Commands::PayToBeneficiary { case, amount }) => vec![Action::PayToBeneficiary {
            case: *case,
            amount: *amount,
        }],
    };

    if actions.is_empty() {
        info!("no actions to run");
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&vault_admin::BatchReport::default())?);
        }
        return Ok(());
    }

    let mode = if cli.dry_run {
        SubmitMode::DryRun
    } else {
        SubmitMode::Execute
    };
    let submitter = SuiSubmitter::connect(&config, keypair, mode).await?;
    let ctx = AdminContext::new(config, submitter).with_echo(!cli.json);

    let report = run_batch(&ctx, &actions).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    report.ensure_success(cli.strict)
}
