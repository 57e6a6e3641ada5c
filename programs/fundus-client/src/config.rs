use crate::error::ConfigError;
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use std::fmt;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SOL_DECIMALS: u32 = 9;
/// Fractional digits the donation input accepts.
pub const INPUT_DECIMALS: u32 = 2;

pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 512;
pub const MAX_IMAGE_URL_LEN: usize = 256;

pub const CAMPAIGN_SEED: &[u8] = b"campaign";
pub const DONOR_SEED: &[u8] = b"donor";

pub const ADDRESS_EDGE_CHARS: usize = 4;
pub const EXPLORER_URL: &str = "https://explorer.solana.com";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

pub const ENV_RPC_URL: &str = "FUNDUS_RPC_URL";
pub const ENV_CLUSTER: &str = "FUNDUS_CLUSTER";
pub const ENV_COMMITMENT: &str = "FUNDUS_COMMITMENT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    #[default]
    Localhost,
}

impl Cluster {
    /// Unknown names fall back to `Localhost`, which the explorer shows as a
    /// custom cluster.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Cluster::MainnetBeta,
            "devnet" => Cluster::Devnet,
            "testnet" => Cluster::Testnet,
            _ => Cluster::Localhost,
        }
    }

    /// Value of the explorer's `cluster` query parameter.
    pub fn explorer_param(self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Localhost => "custom",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.explorer_param())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(ConfigError::InvalidCommitment(other.to_string())),
        }
    }

    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Connection settings for [`crate::RpcProgramClient`].
///
/// Layered: defaults, then an optional `[client]` TOML section, then
/// `FUNDUS_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub cluster: Cluster,
    pub commitment: Commitment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            cluster: Cluster::default(),
            commitment: Commitment::default(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    client: ClientConfig,
}

impl ClientConfig {
    /// Parses the `[client]` section of a TOML document. A document
    /// without the section yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.client)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// All layers: defaults, then the `[client]` section of `toml` if
    /// given, then the process environment.
    pub fn load(toml: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with(toml, |key| std::env::var(key).ok())
    }

    pub fn load_with(
        toml: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match toml {
            Some(content) => Self::from_toml_str(content)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which is `std::env::var` outside of
    /// tests.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_RPC_URL).filter(|s| !s.trim().is_empty()) {
            self.rpc_url = url.trim().to_string();
        }
        if let Some(cluster) = lookup(ENV_CLUSTER) {
            self.cluster = Cluster::from_name(&cluster);
        }
        if let Some(commitment) = lookup(ENV_COMMITMENT) {
            self.commitment = Commitment::parse(&commitment)?;
        }
        Ok(())
    }
}
