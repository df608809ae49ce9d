//! Keypair derivation from a BIP-39 mnemonic.

use anyhow::{anyhow, bail, Result};
use bip32::DerivationPath;
use bip39::{Language, Mnemonic, Seed};
use std::str::FromStr;
use sui_keys::key_derive::derive_key_pair_from_path;
use sui_types::base_types::SuiAddress;
use sui_types::crypto::{SignatureScheme, SuiKeyPair};

/// SLIP-0010 path used by Sui wallets for the first Ed25519 account.
pub const DEFAULT_ED25519_DERIVATION_PATH: &str = "m/44'/784'/0'/0'/0'";

/// Derive the Ed25519 keypair (and its address) for `mnemonic` along `path`.
///
/// The seed uses an empty BIP-39 passphrase.
pub fn derive_keypair(mnemonic: &str, path: &str) -> Result<(SuiAddress, SuiKeyPair)> {
    let phrase = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
    if phrase.is_empty() {
        bail!("mnemonic is empty (set MNEMONICS)");
    }
    let mnemonic = Mnemonic::from_phrase(&phrase, Language::English)
        .map_err(|e| anyhow!("invalid mnemonic: {e}"))?;
    let seed = Seed::new(&mnemonic, "");
    let path = DerivationPath::from_str(path)
        .map_err(|e| anyhow!("invalid derivation path {path:?}: {e}"))?;

    derive_key_pair_from_path(seed.as_bytes(), Some(path), &SignatureScheme::ED25519)
        .map_err(|e| anyhow!("derive keypair: {e}"))
}
