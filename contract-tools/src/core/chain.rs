// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Chain descriptors and the registry that owns them.
//!
//! The registry is the single source of truth for explorer links and for the payload handed to a
//! wallet when it has to learn about a new network.

use std::{collections::BTreeMap, fs, path::Path};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the contract address in explorer templates.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

/// Decimals used by every built-in native currency.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Static description of an EVM chain that contracts can be deployed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    pub chain_id: u64,
    pub name: String,
    pub currency_name: String,
    pub currency_symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub rpc_url: String,
    /// Explorer URL for a contract, containing an `{address}` placeholder.
    pub explorer_url_template: String,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl ChainProfile {
    /// Explorer link for a deployed contract.
    pub fn explorer_url(&self, address: Address) -> String {
        self.explorer_url_template
            .replace(ADDRESS_PLACEHOLDER, &address.to_checksum(None))
    }

    /// Root of the block explorer, e.g. `https://basescan.org/`.
    pub fn explorer_base_url(&self) -> String {
        let prefix = self
            .explorer_url_template
            .split(ADDRESS_PLACEHOLDER)
            .next()
            .unwrap_or_default();
        let prefix = prefix.trim_end_matches('/');
        let prefix = prefix.strip_suffix("/address").unwrap_or(prefix);
        format!("{prefix}/")
    }

    /// Chain id in the `0x`-prefixed hex form wallets expect.
    pub fn hex_chain_id(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Payload for an EIP-3085 `wallet_addEthereumChain` request.
    pub fn add_chain_params(&self) -> AddChainParams {
        AddChainParams {
            chain_id: self.hex_chain_id(),
            chain_name: self.name.clone(),
            native_currency: NativeCurrency {
                name: self.currency_name.clone(),
                symbol: self.currency_symbol.clone(),
                decimals: self.decimals,
            },
            rpc_urls: vec![self.rpc_url.clone()],
            block_explorer_urls: vec![self.explorer_base_url()],
        }
    }

    fn validate(&self) -> Result<(), ChainRegistryError> {
        if self.rpc_url.is_empty() {
            return Err(ChainRegistryError::InvalidProfile {
                chain_id: self.chain_id,
                reason: "missing rpc url".to_string(),
            });
        }
        if !self.explorer_url_template.contains(ADDRESS_PLACEHOLDER) {
            return Err(ChainRegistryError::InvalidProfile {
                chain_id: self.chain_id,
                reason: format!("explorer template lacks {ADDRESS_PLACEHOLDER}"),
            });
        }
        Ok(())
    }
}

/// EIP-3085 chain descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl AddChainParams {
    /// Parses the hex chain id back into a number.
    pub fn numeric_chain_id(&self) -> Option<u64> {
        let digits = self.chain_id.strip_prefix("0x")?;
        u64::from_str_radix(digits, 16).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainRegistryError {
    #[error("chain {0} is already registered")]
    DuplicateChain(u64),
    #[error("chain {0} not found")]
    NotFound(u64),
    #[error("invalid profile for chain {chain_id}: {reason}")]
    InvalidProfile { chain_id: u64, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialize error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

/// Table of known chains, at most one profile per chain id.
#[derive(Clone, Debug, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<u64, ChainProfile>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in chains.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for profile in builtin_chains() {
            let registered = registry.register(profile);
            debug_assert!(registered.is_ok(), "bad built-in chain: {registered:?}");
        }
        registry
    }

    pub fn register(&mut self, profile: ChainProfile) -> Result<(), ChainRegistryError> {
        profile.validate()?;
        if self.chains.contains_key(&profile.chain_id) {
            return Err(ChainRegistryError::DuplicateChain(profile.chain_id));
        }
        self.chains.insert(profile.chain_id, profile);
        Ok(())
    }

    pub fn lookup(&self, chain_id: u64) -> Result<&ChainProfile, ChainRegistryError> {
        self.chains
            .get(&chain_id)
            .ok_or(ChainRegistryError::NotFound(chain_id))
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.chains.contains_key(&chain_id)
    }

    /// Profiles ordered by chain id.
    pub fn iter(&self) -> impl Iterator<Item = &ChainProfile> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Registers every `[[chain]]` table found in a TOML file.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ChainRegistryError> {
        let contents = fs::read_to_string(path)?;
        self.extend_from_toml(&contents)
    }

    /// Registers every `[[chain]]` table in `contents`, or none of them if any is rejected.
    pub fn extend_from_toml(&mut self, contents: &str) -> Result<(), ChainRegistryError> {
        let file: ChainsFile = toml::from_str(contents)?;
        let mut batch = BTreeMap::new();
        for profile in file.chain {
            profile.validate()?;
            if self.contains(profile.chain_id) || batch.contains_key(&profile.chain_id) {
                return Err(ChainRegistryError::DuplicateChain(profile.chain_id));
            }
            batch.insert(profile.chain_id, profile);
        }
        self.chains.extend(batch);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ChainsFile {
    #[serde(default)]
    chain: Vec<ChainProfile>,
}

fn profile(
    chain_id: u64,
    name: &str,
    currency: (&str, &str),
    rpc_url: &str,
    explorer: &str,
) -> ChainProfile {
    ChainProfile {
        chain_id,
        name: name.to_string(),
        currency_name: currency.0.to_string(),
        currency_symbol: currency.1.to_string(),
        decimals: DEFAULT_DECIMALS,
        rpc_url: rpc_url.to_string(),
        explorer_url_template: format!("{explorer}/address/{ADDRESS_PLACEHOLDER}"),
    }
}

/// Chains supported out of the box.
pub fn builtin_chains() -> Vec<ChainProfile> {
    vec![
        profile(
            10,
            "OP Mainnet",
            ("Ether", "ETH"),
            "https://mainnet.optimism.io",
            "https://optimistic.etherscan.io",
        ),
        profile(
            14,
            "Flare Mainnet",
            ("Flare", "FLR"),
            "https://flare-api.flare.network/ext/C/rpc",
            "https://flare-explorer.flare.network",
        ),
        profile(
            114,
            "Flare Testnet Coston2",
            ("Coston2 Flare", "C2FLR"),
            "https://coston2-api.flare.network/ext/C/rpc",
            "https://coston2-explorer.flare.network",
        ),
        profile(
            8453,
            "Base",
            ("Ether", "ETH"),
            "https://mainnet.base.org",
            "https://basescan.org",
        ),
        profile(
            84532,
            "Base Sepolia",
            ("Sepolia Ether", "ETH"),
            "https://sepolia.base.org",
            "https://sepolia.basescan.org",
        ),
        profile(
            11155420,
            "OP Sepolia",
            ("Sepolia Ether", "ETH"),
            "https://sepolia.optimism.io",
            "https://sepolia-optimism.etherscan.io",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use pretty_assertions::assert_eq;

    use super::*;

    fn coston2() -> ChainProfile {
        ChainRegistry::with_defaults().lookup(114).unwrap().clone()
    }

    #[test]
    fn defaults_are_ordered_and_unique() {
        let registry = ChainRegistry::with_defaults();
        let ids: Vec<u64> = registry.iter().map(|c| c.chain_id).collect();
        assert_eq!(ids, vec![10, 14, 114, 8453, 84532, 11155420]);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = ChainRegistry::with_defaults();
        let err = registry.register(coston2()).unwrap_err();
        assert!(matches!(err, ChainRegistryError::DuplicateChain(114)));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn lookup_unknown_chain() {
        let registry = ChainRegistry::with_defaults();
        assert!(matches!(
            registry.lookup(1),
            Err(ChainRegistryError::NotFound(1))
        ));
    }

    #[test]
    fn register_rejects_template_without_placeholder() {
        let mut registry = ChainRegistry::new();
        let mut profile = coston2();
        profile.explorer_url_template = "https://example.org/".to_string();
        assert!(matches!(
            registry.register(profile),
            Err(ChainRegistryError::InvalidProfile { chain_id: 114, .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn explorer_urls() {
        let profile = coston2();
        let addr = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(
            profile.explorer_url(addr),
            "https://coston2-explorer.flare.network/address/0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(
            profile.explorer_base_url(),
            "https://coston2-explorer.flare.network/"
        );
    }

    #[test]
    fn add_chain_payload() {
        let params = coston2().add_chain_params();
        assert_eq!(params.chain_id, "0x72");
        assert_eq!(params.numeric_chain_id(), Some(114));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chainId": "0x72",
                "chainName": "Flare Testnet Coston2",
                "nativeCurrency": { "name": "Coston2 Flare", "symbol": "C2FLR", "decimals": 18 },
                "rpcUrls": ["https://coston2-api.flare.network/ext/C/rpc"],
                "blockExplorerUrls": ["https://coston2-explorer.flare.network/"],
            })
        );
    }

    #[test]
    fn extends_from_toml() {
        let mut registry = ChainRegistry::with_defaults();
        registry
            .extend_from_toml(
                r#"
                [[chain]]
                chain_id = 31337
                name = "Anvil"
                currency_name = "Ether"
                currency_symbol = "ETH"
                rpc_url = "http://localhost:8545"
                explorer_url_template = "http://localhost:4000/address/{address}"
                "#,
            )
            .unwrap();
        let anvil = registry.lookup(31337).unwrap();
        assert_eq!(anvil.decimals, 18);
        assert_eq!(registry.len(), 7);

        let err = registry
            .extend_from_toml(&format!(
                "[[chain]]\nchain_id = 10\nname = \"dup\"\ncurrency_name = \"Ether\"\n\
                 currency_symbol = \"ETH\"\nrpc_url = \"http://x\"\n\
                 explorer_url_template = \"http://x/{{address}}\"\n"
            ))
            .unwrap_err();
        assert!(matches!(err, ChainRegistryError::DuplicateChain(10)));
    }

    const ANVIL: &str = r#"
        [[chain]]
        chain_id = 31337
        name = "Anvil"
        currency_name = "Ether"
        currency_symbol = "ETH"
        rpc_url = "http://localhost:8545"
        explorer_url_template = "http://localhost:4000/address/{address}"
    "#;

    #[test]
    fn failed_toml_load_registers_nothing() {
        let mut registry = ChainRegistry::with_defaults();
        let contents = format!(
            "{ANVIL}\n[[chain]]\nchain_id = 10\nname = \"dup\"\ncurrency_name = \"Ether\"\n\
             currency_symbol = \"ETH\"\nrpc_url = \"http://x\"\n\
             explorer_url_template = \"http://x/{{address}}\"\n"
        );
        let err = registry.extend_from_toml(&contents).unwrap_err();
        assert!(matches!(err, ChainRegistryError::DuplicateChain(10)));
        assert_eq!(registry.len(), 6);
        assert!(!registry.contains(31337));
    }

    #[test]
    fn toml_duplicates_within_one_file_are_rejected() {
        let mut registry = ChainRegistry::new();
        let err = registry
            .extend_from_toml(&format!("{ANVIL}{ANVIL}"))
            .unwrap_err();
        assert!(matches!(err, ChainRegistryError::DuplicateChain(31337)));
        assert!(registry.is_empty());
    }

    #[test]
    fn invalid_toml_profile_registers_nothing() {
        let mut registry = ChainRegistry::new();
        let contents = format!(
            "{ANVIL}\n[[chain]]\nchain_id = 5\nname = \"bad\"\ncurrency_name = \"Ether\"\n\
             currency_symbol = \"ETH\"\nrpc_url = \"\"\n\
             explorer_url_template = \"http://x/{{address}}\"\n"
        );
        let err = registry.extend_from_toml(&contents).unwrap_err();
        assert!(matches!(
            err,
            ChainRegistryError::InvalidProfile { chain_id: 5, .. }
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn builtin_chains_are_all_registered() {
        assert_eq!(ChainRegistry::with_defaults().len(), builtin_chains().len());
    }
}
