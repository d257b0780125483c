//! Construction, signing and verification of maker and taker orders for the
//! LooksRare exchange.
//!
//! [`Exchange`] bundles the configuration of one exchange deployment with the
//! ledger it reads from and, optionally, the identity that signs orders.
//! Without a signing identity the exchange works in read-only mode: takers
//! can be derived and orders verified, but building, signing and cancelling
//! fail with [`Error::Signer`].

pub mod builder;
pub mod calls;
mod error;
pub mod ledger;
pub mod signing;
pub mod verifier;

pub use {
    builder::{BuiltMakerOrder, Defaults, MakerIntent, Side, TakerIntent},
    calls::CollectionKind,
    error::{Error, TimestampError},
    ledger::{LedgerReading, Onchain},
    signing::SigningIdentity,
};
use {
    alloy::primitives::Address,
    anyhow::Context,
    contracts::Addresses,
    model::{Domain, DomainSeparator},
    std::sync::Arc,
};

pub struct Exchange {
    chain_id: u64,
    addresses: Addresses,
    domain: Domain,
    domain_separator: DomainSeparator,
    defaults: Defaults,
    ledger: Arc<dyn LedgerReading>,
    signer: Option<Arc<dyn SigningIdentity>>,
}

impl Exchange {
    pub fn new(
        chain_id: u64,
        addresses: Addresses,
        ledger: Arc<dyn LedgerReading>,
        signer: Option<Arc<dyn SigningIdentity>>,
    ) -> Self {
        let domain = Domain::new(chain_id, addresses.exchange);
        Self {
            chain_id,
            domain_separator: domain.separator(),
            domain,
            defaults: Defaults::new(&addresses),
            addresses,
            ledger,
            signer,
        }
    }

    /// Creates the exchange described by the configuration on top of the
    /// given ledger.
    pub fn from_config(
        config: &configs::Config,
        ledger: Arc<dyn LedgerReading>,
        signer: Option<Arc<dyn SigningIdentity>>,
    ) -> anyhow::Result<Self> {
        let addresses = config.addresses()?;
        let defaults = Defaults::new(&addresses)
            .with_config(&config.defaults)
            .with_strategy_params(config.strategy_param_types()?);
        Ok(Self::new(config.chain_id, addresses, ledger, signer).with_defaults(defaults))
    }

    /// Like [`Self::from_config`] but reads from the configured node.
    pub fn connect(
        config: &configs::Config,
        signer: Option<Arc<dyn SigningIdentity>>,
    ) -> anyhow::Result<Self> {
        let url = config
            .node_url
            .clone()
            .context("node-url is required to connect to the ledger")?;
        let ledger = Onchain::from_url(url, config.addresses()?);
        Self::from_config(config, Arc::new(ledger), signer)
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn addresses(&self) -> &Addresses {
        &self.addresses
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Address of the signing identity, `None` in read-only mode.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|signer| signer.address())
    }

    fn signer(&self) -> Result<&Arc<dyn SigningIdentity>, Error> {
        self.signer.as_ref().ok_or(Error::Signer)
    }
}
