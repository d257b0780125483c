mod ledger;

pub use ledger::{FakeLedger, Standard};
use {
    alloy::{
        primitives::{Address, B256, U256},
        signers::local::PrivateKeySigner,
    },
    anyhow::Result,
    contracts::{Addresses, networks},
    exchange::{Exchange, SigningIdentity},
    model::{interaction::InteractionData, signature::EcdsaSignature},
    number::units::EthUnit,
    std::{
        future::Future,
        io::Write,
        sync::{
            Arc,
            atomic::{AtomicU8, Ordering},
        },
    },
    tempfile::TempPath,
};

/// Protocol fee of the whitelisted strategies in basis points.
pub const PROTOCOL_FEE: u64 = 200;

/// Create a temporary file with the given content.
pub fn config_tmp_file<C: AsRef<[u8]>>(content: C) -> TempPath {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_ref()).unwrap();
    file.into_temp_path()
}

/// *Testing* function that takes a closure and runs it against a freshly
/// deployed fake marketplace.
///
/// This function also initializes tracing and sets the panic hook.
pub async fn run_test<F, Fut>(f: F)
where
    F: FnOnce(Marketplace) -> Fut,
    Fut: Future<Output = ()>,
{
    let filters = ["warn", "e2e=debug", "exchange=debug", "configs=debug"].join(",");
    observe::tracing::initialize_reentrant(&filters);

    f(Marketplace::deploy()).await;
}

/// Protocol addresses of the local test chain.
pub fn hardhat_addresses() -> Addresses {
    let address = |byte: u8| Address::repeat_byte(byte);
    Addresses {
        exchange: address(0xe0),
        transfer_manager_erc721: address(0xe1),
        transfer_manager_erc1155: address(0xe2),
        transfer_selector_nft: address(0xe3),
        strategy_standard_sale: address(0xe4),
        strategy_collection_sale: address(0xe5),
        strategy_private_sale: address(0xe6),
        strategy_dutch_auction: address(0xe7),
        weth: address(0xe8),
        royalty_fee_registry: address(0xea),
        currency_manager: address(0xeb),
        execution_manager: address(0xec),
    }
}

/// The configuration file of the local test chain.
pub fn hardhat_config() -> String {
    let contracts = toml::to_string(&hardhat_addresses()).unwrap();
    format!(
        "chain-id = {}\n\n[defaults]\nmin-percentage-to-ask = 8500\n\n[contracts]\n{contracts}",
        networks::HARDHAT
    )
}

/// A user with a private key.
#[derive(Clone)]
pub struct TestAccount {
    signer: PrivateKeySigner,
}

impl TestAccount {
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

/// A contract wallet whose owner signs on its behalf.
pub struct ContractWallet {
    pub address: Address,
    pub owner: TestAccount,
}

#[async_trait::async_trait]
impl SigningIdentity for ContractWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_hash(&self, hash: &B256) -> Result<EcdsaSignature> {
        EcdsaSignature::sign(hash, self.owner.signer())
    }
}

/// The exchange deployment of a test together with its participants.
pub struct Marketplace {
    ledger: Arc<FakeLedger>,
    config: configs::Config,
    next_key: AtomicU8,
}

impl Marketplace {
    /// Deploys the protocol with WETH and the standard, collection and
    /// private sale strategies whitelisted. The chain clock runs a minute
    /// ahead of the local clock so orders starting now are active.
    pub fn deploy() -> Self {
        let config: configs::Config = hardhat_config().parse().unwrap();
        let addresses = config.addresses().unwrap();
        let ledger = FakeLedger::new(addresses, model::time::now_in_epoch_seconds() + 60);
        ledger.whitelist_currency(addresses.weth);
        for strategy in [
            addresses.strategy_standard_sale,
            addresses.strategy_collection_sale,
            addresses.strategy_private_sale,
        ] {
            ledger.whitelist_strategy(strategy, PROTOCOL_FEE);
        }
        Self {
            ledger: Arc::new(ledger),
            config,
            next_key: AtomicU8::new(1),
        }
    }

    pub fn ledger(&self) -> &FakeLedger {
        &self.ledger
    }

    /// The ledger for exchanges created outside of [`Marketplace::exchange`].
    pub fn shared_ledger(&self) -> Arc<FakeLedger> {
        self.ledger.clone()
    }

    pub fn addresses(&self) -> &Addresses {
        self.ledger.addresses()
    }

    pub fn config(&self) -> &configs::Config {
        &self.config
    }

    /// Creates accounts holding `weth` wrapped ether each.
    pub fn make_accounts<const N: usize>(&self, weth: U256) -> [TestAccount; N] {
        std::array::from_fn(|_| {
            let key = B256::with_last_byte(self.next_key.fetch_add(1, Ordering::SeqCst));
            let account = TestAccount {
                signer: PrivateKeySigner::from_bytes(&key).unwrap(),
            };
            self.ledger
                .fund(self.addresses().weth, account.address(), weth);
            account
        })
    }

    /// Deploys an ERC-721 collection with `token_id` minted to `owner`.
    pub fn deploy_erc721(&self, byte: u8, owner: &TestAccount, token_id: u64) -> Address {
        let collection = Address::repeat_byte(byte);
        self.ledger.deploy_collection(collection, Standard::Erc721);
        self.ledger
            .mint(collection, owner.address(), U256::from(token_id), U256::from(1))
            .unwrap();
        collection
    }

    /// The exchange as seen by `account`.
    pub fn exchange(&self, account: &TestAccount) -> Exchange {
        Exchange::from_config(
            &self.config,
            self.ledger.clone(),
            Some(Arc::new(account.signer.clone())),
        )
        .unwrap()
    }

    /// The exchange as seen by any signing identity.
    pub fn exchange_as(&self, identity: Arc<dyn SigningIdentity>) -> Exchange {
        Exchange::from_config(&self.config, self.ledger.clone(), Some(identity)).unwrap()
    }

    /// The exchange without a signing identity.
    pub fn read_only(&self) -> Exchange {
        Exchange::from_config(&self.config, self.ledger.clone(), None).unwrap()
    }

    /// Sends an assembled call from `account`.
    pub fn send(&self, account: &TestAccount, interaction: &InteractionData) -> Result<()> {
        self.ledger.dispatch(account.address(), interaction)
    }

    /// Current time of the chain.
    pub fn now(&self) -> u64 {
        self.ledger.now()
    }
}

/// One ether worth of the smallest currency unit.
pub fn eth(amount: u64) -> U256 {
    amount.eth()
}
