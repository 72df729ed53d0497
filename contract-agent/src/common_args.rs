// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf, time::Duration};

use alloy::{primitives::B256, signers::local::PrivateKeySigner};
use contract_tools::{
    core::deployment::DEFAULT_GAS_BUMP_PERCENT, ops, utils::decode0x, ChainProfile,
    ChainRegistry, DeploymentConfig, JsonFileStore, RemoteCompiler, RpcWallet,
};
use eyre::{bail, Context};
use reqwest::Url;

use crate::constants::{DEFAULT_CHAIN_ID, DEFAULT_COMPILER_URL, DEFAULT_RECORDS_DIR};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, env = "CONTRACT_AGENT_PRIVATE_KEY_PATH")]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "CONTRACT_AGENT_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
}

impl AuthArgs {
    pub fn signer(&self) -> eyre::Result<PrivateKeySigner> {
        let key = match (&self.private_key, &self.private_key_path) {
            (Some(key), _) => key.clone(),
            (None, Some(file)) => {
                fs::read_to_string(file).wrap_err("could not open private key file")?
            }
            (None, None) => bail!("no private key: pass --private-key or --private-key-path"),
        };
        if key.trim().is_empty() {
            bail!("empty private key");
        }
        let bytes = decode0x(key).wrap_err("private key is not hex")?;
        if bytes.len() != 32 {
            bail!("private key must be 32 bytes");
        }
        Ok(PrivateKeySigner::from_bytes(&B256::from_slice(&bytes))?)
    }
}

#[derive(Debug, clap::Args)]
pub struct RegistryArgs {
    /// TOML file with extra `[[chain]]` profiles
    #[arg(long, env = "CONTRACT_AGENT_CHAINS_FILE")]
    chains_file: Option<PathBuf>,
}

impl RegistryArgs {
    pub fn registry(&self) -> eyre::Result<ChainRegistry> {
        Ok(ops::load_chains(self.chains_file.as_deref())?)
    }
}

#[derive(Debug, clap::Args)]
pub struct ChainArgs {
    /// Id of the chain to deploy to
    #[arg(long, env = "CONTRACT_AGENT_CHAIN", default_value_t = DEFAULT_CHAIN_ID)]
    chain: u64,
    #[command(flatten)]
    registry: RegistryArgs,
}

impl ChainArgs {
    /// The chain registry and the target profile in it.
    pub fn target(&self) -> eyre::Result<(ChainRegistry, ChainProfile)> {
        let registry = self.registry.registry()?;
        let target = registry.lookup(self.chain)?.clone();
        Ok((registry, target))
    }
}

#[derive(Debug, clap::Args)]
pub struct CompilerArgs {
    /// Endpoint of the contract compiler service
    #[arg(long, env = "CONTRACT_AGENT_COMPILER_URL", default_value = DEFAULT_COMPILER_URL)]
    compiler_url: String,
}

impl CompilerArgs {
    pub fn compiler(&self) -> eyre::Result<RemoteCompiler> {
        let url = Url::parse(&self.compiler_url)
            .wrap_err_with(|| format!("invalid compiler url {}", self.compiler_url))?;
        Ok(RemoteCompiler::new(url))
    }
}

#[derive(Debug, clap::Args)]
pub struct GasArgs {
    /// Percent to bump the estimated deployment gas by
    #[arg(long, env = "CONTRACT_AGENT_GAS_BUMP_PERCENT", default_value_t = DEFAULT_GAS_BUMP_PERCENT)]
    gas_bump_percent: u64,
}

impl GasArgs {
    pub fn config(&self) -> DeploymentConfig {
        DeploymentConfig {
            gas_bump_percent: self.gas_bump_percent,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// RPC endpoint the wallet starts on (defaults to the target chain's endpoint)
    #[arg(short, long, env = "CONTRACT_AGENT_ENDPOINT")]
    endpoint: Option<String>,
    /// Seconds between receipt polls
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    poll_interval: u64,
}

impl ProviderArgs {
    pub fn build_wallet(&self, auth: &AuthArgs, target: &ChainProfile) -> eyre::Result<RpcWallet> {
        let endpoint = self.endpoint.as_deref().unwrap_or(&target.rpc_url);
        let url =
            Url::parse(endpoint).wrap_err_with(|| format!("invalid rpc endpoint {endpoint}"))?;
        Ok(RpcWallet::new(auth.signer()?)
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .connect(url))
    }
}

#[derive(Debug, clap::Args)]
pub struct StoreArgs {
    /// Directory deployment records are kept in
    #[arg(long, env = "CONTRACT_AGENT_RECORDS_DIR", default_value = DEFAULT_RECORDS_DIR)]
    records_dir: PathBuf,
}

impl StoreArgs {
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.records_dir.clone())
    }
}
