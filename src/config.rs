//! Environment-sourced configuration.
//!
//! Identifiers are opaque strings: an unset variable resolves to `""` and is
//! only rejected once a transaction built from it is resolved against the
//! network.

use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::signer::DEFAULT_ED25519_DERIVATION_PATH;

pub const ENV_MNEMONICS: &str = "MNEMONICS";
pub const ENV_PACKAGE_ID: &str = "PACKAGE_ID";
pub const ENV_ADMIN_CAP_ID: &str = "ADMIN_CAP_ID";
pub const ENV_CONFIG_ID: &str = "CONFIG_ID";
pub const ENV_CASE_COUNT_ID: &str = "CASE_COUNT_ID";
pub const ENV_CASE_1_ID: &str = "CASE_1_ID";
pub const ENV_CASE_2_ID: &str = "CASE_2_ID";

pub const ENV_RPC_URL: &str = "SUI_RPC_URL";
pub const ENV_DERIVATION_PATH: &str = "DERIVATION_PATH";
pub const ENV_GAS_BUDGET: &str = "GAS_BUDGET";

pub const DEFAULT_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
pub const DEFAULT_GAS_BUDGET: u64 = 10_000_000;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdminConfig {
    pub mnemonic: String,
    pub package_id: String,
    pub admin_cap_id: String,
    pub config_id: String,
    pub case_count_id: String,
    pub case_1_id: String,
    pub case_2_id: String,

    pub rpc_url: String,
    pub derivation_path: String,
    pub gas_budget: u64,
}

impl AdminConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Only `GAS_BUDGET` is parsed; every other value is taken verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let gas_budget = match lookup(ENV_GAS_BUDGET) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_GAS_BUDGET} must be an integer (got {raw:?})"))?,
            _ => DEFAULT_GAS_BUDGET,
        };

        Ok(Self {
            mnemonic: var(ENV_MNEMONICS),
            package_id: var(ENV_PACKAGE_ID),
            admin_cap_id: var(ENV_ADMIN_CAP_ID),
            config_id: var(ENV_CONFIG_ID),
            case_count_id: var(ENV_CASE_COUNT_ID),
            case_1_id: var(ENV_CASE_1_ID),
            case_2_id: var(ENV_CASE_2_ID),
            rpc_url: lookup(ENV_RPC_URL)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            derivation_path: lookup(ENV_DERIVATION_PATH)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_ED25519_DERIVATION_PATH.to_string()),
            gas_budget,
        })
    }
}

// The mnemonic never reaches logs.
impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field(
                "mnemonic",
                &if self.mnemonic.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("package_id", &self.package_id)
            .field("admin_cap_id", &self.admin_cap_id)
            .field("config_id", &self.config_id)
            .field("case_count_id", &self.case_count_id)
            .field("case_1_id", &self.case_1_id)
            .field("case_2_id", &self.case_2_id)
            .field("rpc_url", &self.rpc_url)
            .field("derivation_path", &self.derivation_path)
            .field("gas_budget", &self.gas_budget)
            .finish()
    }
}

/// Load a `.env` file into the process environment.
///
/// With an explicit path the file must exist. Without one, a `.env` in the
/// working directory is loaded if present. Variables already set in the
/// environment are never overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenv::from_path(path).map_err(|e| anyhow!("load {}: {}", path.display(), e))?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenv::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(anyhow!("load .env: {}", e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_values_are_empty_strings() {
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.mnemonic, "");
        assert_eq!(config.package_id, "");
        assert_eq!(config.admin_cap_id, "");
        assert_eq!(config.config_id, "");
        assert_eq!(config.case_count_id, "");
        assert_eq!(config.case_1_id, "");
        assert_eq!(config.case_2_id, "");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.derivation_path, DEFAULT_ED25519_DERIVATION_PATH);
        assert_eq!(config.gas_budget, DEFAULT_GAS_BUDGET);
    }

    #[test]
    fn test_values_are_taken_verbatim() {
        let config = AdminConfig::from_lookup(lookup_from(&[
            (ENV_PACKAGE_ID, "0xabc"),
            (ENV_CONFIG_ID, "not-an-id"),
            (ENV_CASE_2_ID, " 0x2 "),
            (ENV_GAS_BUDGET, "5000"),
        ]))
        .unwrap();
        assert_eq!(config.package_id, "0xabc");
        assert_eq!(config.config_id, "not-an-id");
        assert_eq!(config.case_2_id, " 0x2 ");
        assert_eq!(config.gas_budget, 5000);
    }

    #[test]
    fn test_invalid_gas_budget_is_rejected() {
        let err = AdminConfig::from_lookup(lookup_from(&[(ENV_GAS_BUDGET, "lots")])).unwrap_err();
        assert!(format!("{err:#}").contains(ENV_GAS_BUDGET));
    }

    #[test]
    fn test_debug_redacts_mnemonic() {
        let config = AdminConfig::from_lookup(lookup_from(&[(
            ENV_MNEMONICS,
            "secret words go here",
        )]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
