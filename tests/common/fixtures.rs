//! Object ids standing in for a deployed package.

use vault_admin::AdminConfig;

pub const PACKAGE: &str = "0x7a1d0f5e3b2c4a6980d1e2f3a4b5c6d7e8f90123456789abcdef0123456789ab";
pub const ADMIN_CAP: &str = "0x00000000000000000000000000000000000000000000000000000000000000ca";
pub const CONFIG: &str = "0x00000000000000000000000000000000000000000000000000000000000000cf";
pub const CASE_COUNT: &str = "0x00000000000000000000000000000000000000000000000000000000000000cc";
pub const CASE_1: &str = "0x00000000000000000000000000000000000000000000000000000000000000c1";
pub const CASE_2: &str = "0x00000000000000000000000000000000000000000000000000000000000000c2";

/// Every id set, as if read from a complete `.env`.
pub fn sample_config() -> AdminConfig {
    AdminConfig::from_lookup(|key| {
        let value = match key {
            "MNEMONICS" => "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "PACKAGE_ID" => PACKAGE,
            "ADMIN_CAP_ID" => ADMIN_CAP,
            "CONFIG_ID" => CONFIG,
            "CASE_COUNT_ID" => CASE_COUNT,
            "CASE_1_ID" => CASE_1,
            "CASE_2_ID" => CASE_2,
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("sample config should load")
}

/// Nothing set in the environment.
pub fn empty_config() -> AdminConfig {
    AdminConfig::from_lookup(|_| None).expect("empty config should load")
}
