//! The TOML configuration of the order library.
//!
//! ```toml
//! chain-id = 1
//! node-url = "http://localhost:8545"
//!
//! [contracts]
//! exchange = "0x59728544B08AB483533076417FbBB2fD0B17CE3a"
//!
//! [defaults]
//! min-percentage-to-ask = 8500
//!
//! [strategy-params]
//! "0x58D83536D3EfeDB9F7f2A1Ec3BDaad2b1A4DD98C" = ["address"]
//!
//! [logging]
//! filter = "info,exchange=debug"
//! ```

mod defaults;
mod overrides;

pub use self::{defaults::Defaults, overrides::ContractOverrides};
use {
    alloy::{dyn_abi::DynSolType, primitives::Address},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::{collections::HashMap, path::Path, str::FromStr},
    url::Url,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub chain_id: u64,

    /// JSON-RPC endpoint used for ledger reads. Not needed when the caller
    /// brings its own provider.
    #[serde(default)]
    pub node_url: Option<Url>,

    #[serde(default)]
    pub contracts: ContractOverrides,

    #[serde(default)]
    pub defaults: Defaults,

    /// Solidity types of the `params` each strategy expects, keyed by strategy
    /// address.
    #[serde(default)]
    pub strategy_params: HashMap<Address, Vec<String>>,

    #[serde(default)]
    pub logging: observe::Config,
}

impl Config {
    /// Reads and parses the configuration file at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("I/O error while reading {path:?}"))?;
        let config = data
            .parse::<Self>()
            .with_context(|| format!("invalid configuration in {path:?}"))?;
        tracing::debug!(?path, chain_id = config.chain_id, "loaded configuration");
        Ok(config)
    }

    /// The protocol addresses for the configured chain with all overrides
    /// applied.
    pub fn addresses(&self) -> Result<contracts::Addresses> {
        self.contracts.resolve(self.chain_id)
    }

    /// Parses the declared strategy parameter types.
    pub fn strategy_param_types(&self) -> Result<HashMap<Address, Vec<DynSolType>>> {
        self.strategy_params
            .iter()
            .map(|(strategy, types)| {
                let types = model::params::parse_types(types)
                    .with_context(|| format!("params of strategy {strategy}"))?;
                Ok((*strategy, types))
            })
            .collect()
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("TOML syntax error")?;
        config.addresses()?;
        config.strategy_param_types()?;
        Ok(config)
    }
}
