use {
    alloy::{
        primitives::{Address, B256, Bytes, U256},
        sol_types::SolCall,
    },
    anyhow::{Context, Result, anyhow, ensure},
    contracts::{Addresses, ERC20, ERC721, ERC1155, LooksRareExchange},
    exchange::{
        LedgerReading,
        ledger::{NonceState, Royalty, RoyaltySource, TransferManager},
    },
    model::{interaction::InteractionData, signature::EcdsaSignature},
    number::basis_points,
    std::{
        collections::{HashMap, HashSet},
        sync::{Mutex, MutexGuard},
    },
};

/// Token standard of a fake collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Standard {
    Erc721,
    Erc1155,
}

#[derive(Debug)]
struct Collection {
    standard: Standard,
    owners: HashMap<U256, Address>,
    balances: HashMap<(Address, U256), U256>,
    operators: HashSet<(Address, Address)>,
    token_approvals: HashMap<U256, Address>,
    /// Royalty in basis points reported through ERC-2981.
    erc2981: Option<(Address, U256)>,
}

#[derive(Debug, Default)]
struct Token {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

#[derive(Debug, Default)]
struct State {
    block_timestamp: u64,
    executed_or_cancelled: HashSet<(Address, U256)>,
    min_nonces: HashMap<Address, U256>,
    currencies: HashSet<Address>,
    strategies: HashMap<Address, U256>,
    collections: HashMap<Address, Collection>,
    custom_managers: HashMap<Address, Address>,
    /// Royalty in basis points set in the royalty fee registry.
    registry: HashMap<Address, (Address, U256)>,
    tokens: HashMap<Address, Token>,
    /// Smart contract wallets and the key owner they accept signatures of.
    wallets: HashMap<Address, Address>,
}

/// In-memory exchange deployment. Reads answer the way the exchange
/// contracts would and [`FakeLedger::dispatch`] applies assembled calls.
#[derive(Debug)]
pub struct FakeLedger {
    addresses: Addresses,
    state: Mutex<State>,
}

impl FakeLedger {
    pub fn new(addresses: Addresses, block_timestamp: u64) -> Self {
        Self {
            addresses,
            state: Mutex::new(State {
                block_timestamp,
                ..Default::default()
            }),
        }
    }

    pub fn addresses(&self) -> &Addresses {
        &self.addresses
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A test that panicked while holding the lock fails on its own.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn now(&self) -> u64 {
        self.state().block_timestamp
    }

    pub fn set_block_timestamp(&self, timestamp: u64) {
        self.state().block_timestamp = timestamp;
    }

    pub fn advance_time(&self, seconds: u64) {
        self.state().block_timestamp += seconds;
    }

    pub fn whitelist_currency(&self, currency: Address) {
        self.state().currencies.insert(currency);
    }

    pub fn remove_currency(&self, currency: Address) {
        self.state().currencies.remove(&currency);
    }

    /// Whitelists the strategy with a protocol fee in basis points.
    pub fn whitelist_strategy(&self, strategy: Address, protocol_fee: u64) {
        self.state()
            .strategies
            .insert(strategy, U256::from(protocol_fee));
    }

    pub fn deploy_collection(&self, collection: Address, standard: Standard) {
        self.state().collections.insert(
            collection,
            Collection {
                standard,
                owners: Default::default(),
                balances: Default::default(),
                operators: Default::default(),
                token_approvals: Default::default(),
                erc2981: None,
            },
        );
    }

    pub fn set_custom_transfer_manager(&self, collection: Address, manager: Address) {
        self.state().custom_managers.insert(collection, manager);
    }

    pub fn set_registry_royalty(&self, collection: Address, receiver: Address, bps: u64) {
        self.state()
            .registry
            .insert(collection, (receiver, U256::from(bps)));
    }

    pub fn set_erc2981_royalty(&self, collection: Address, receiver: Address, bps: u64) -> Result<()> {
        let mut state = self.state();
        let collection = collection_mut(&mut state, collection)?;
        collection.erc2981 = Some((receiver, U256::from(bps)));
        Ok(())
    }

    pub fn mint(&self, collection: Address, owner: Address, token_id: U256, amount: U256) -> Result<()> {
        let mut state = self.state();
        let collection = collection_mut(&mut state, collection)?;
        match collection.standard {
            Standard::Erc721 => {
                ensure!(
                    !collection.owners.contains_key(&token_id),
                    "token {token_id} already minted"
                );
                collection.owners.insert(token_id, owner);
            }
            Standard::Erc1155 => {
                *collection.balances.entry((owner, token_id)).or_default() += amount;
            }
        }
        Ok(())
    }

    pub fn fund(&self, currency: Address, owner: Address, amount: U256) {
        *self
            .state()
            .tokens
            .entry(currency)
            .or_default()
            .balances
            .entry(owner)
            .or_default() += amount;
    }

    /// Deploys a smart contract wallet at `wallet` that accepts signatures of
    /// `owner` through ERC-1271.
    pub fn deploy_wallet(&self, wallet: Address, owner: Address) {
        self.state().wallets.insert(wallet, owner);
    }

    pub fn token_owner(&self, collection: Address, token_id: U256) -> Option<Address> {
        self.state()
            .collections
            .get(&collection)?
            .owners
            .get(&token_id)
            .copied()
    }

    pub fn currency_balance(&self, currency: Address, owner: Address) -> U256 {
        self.state()
            .tokens
            .get(&currency)
            .and_then(|token| token.balances.get(&owner))
            .copied()
            .unwrap_or_default()
    }

    /// Applies a call sent by `from` the way the targeted contract would.
    /// Failing calls leave the state untouched.
    pub fn dispatch(&self, from: Address, interaction: &InteractionData) -> Result<()> {
        let data = &interaction.call_data[..];
        let selector: [u8; 4] = data.get(..4).context("call data without selector")?.try_into()?;
        tracing::debug!(%from, target = %interaction.target, "dispatching call");
        let mut state = self.state();

        if interaction.target == self.addresses.exchange {
            let min_nonce = state.min_nonces.get(&from).copied().unwrap_or_default();
            if selector == LooksRareExchange::cancelAllOrdersForSenderCall::SELECTOR {
                let call = LooksRareExchange::cancelAllOrdersForSenderCall::abi_decode(data)?;
                ensure!(call.minNonce > min_nonce, "cancel: nonce lower than current");
                state.min_nonces.insert(from, call.minNonce);
                return Ok(());
            }
            if selector == LooksRareExchange::cancelMultipleMakerOrdersCall::SELECTOR {
                let call = LooksRareExchange::cancelMultipleMakerOrdersCall::abi_decode(data)?;
                ensure!(
                    call.orderNonces.iter().all(|nonce| *nonce >= min_nonce),
                    "cancel: nonce lower than current"
                );
                for nonce in call.orderNonces {
                    state.executed_or_cancelled.insert((from, nonce));
                }
                return Ok(());
            }
            if selector == LooksRareExchange::matchAskWithTakerBidCall::SELECTOR {
                let call = LooksRareExchange::matchAskWithTakerBidCall::abi_decode(data)?;
                return self.settle(&mut state, &call.makerAsk, &call.takerBid, from, U256::ZERO);
            }
            if selector == LooksRareExchange::matchAskWithTakerBidUsingETHAndWETHCall::SELECTOR {
                let call =
                    LooksRareExchange::matchAskWithTakerBidUsingETHAndWETHCall::abi_decode(data)?;
                return self.settle(
                    &mut state,
                    &call.makerAsk,
                    &call.takerBid,
                    from,
                    interaction.value,
                );
            }
            if selector == LooksRareExchange::matchBidWithTakerAskCall::SELECTOR {
                let call = LooksRareExchange::matchBidWithTakerAskCall::abi_decode(data)?;
                return self.settle(&mut state, &call.makerBid, &call.takerAsk, from, U256::ZERO);
            }
            return Err(anyhow!("unknown exchange call"));
        }

        if let Some(collection) = state.collections.get_mut(&interaction.target) {
            let call = match collection.standard {
                Standard::Erc721 => ERC721::setApprovalForAllCall::abi_decode(data)
                    .map(|call| (call.operator, call.approved)),
                Standard::Erc1155 => ERC1155::setApprovalForAllCall::abi_decode(data)
                    .map(|call| (call.operator, call.approved)),
            };
            let (operator, approved) = call.context("unknown collection call")?;
            match approved {
                true => collection.operators.insert((from, operator)),
                false => collection.operators.remove(&(from, operator)),
            };
            return Ok(());
        }

        let call = ERC20::approveCall::abi_decode(data).context("unknown token call")?;
        state
            .tokens
            .entry(interaction.target)
            .or_default()
            .allowances
            .insert((from, call.spender), call.amount);
        Ok(())
    }

    /// Executes a matched pair. Fees and royalties stay with the seller.
    fn settle(
        &self,
        state: &mut State,
        maker: &LooksRareExchange::MakerOrder,
        taker: &LooksRareExchange::TakerOrder,
        sender: Address,
        value: U256,
    ) -> Result<()> {
        ensure!(taker.taker == sender, "taker must be the sender");
        ensure!(maker.isOrderAsk != taker.isOrderAsk, "orders on the same side");
        ensure!(maker.price == taker.price, "price mismatch");
        let now = U256::from(state.block_timestamp);
        ensure!(
            maker.startTime <= now && now <= maker.endTime,
            "order outside its validity window"
        );
        let min_nonce = state
            .min_nonces
            .get(&maker.signer)
            .copied()
            .unwrap_or_default();
        ensure!(
            maker.nonce >= min_nonce
                && !state
                    .executed_or_cancelled
                    .contains(&(maker.signer, maker.nonce)),
            "order expired"
        );

        let (seller, buyer) = match maker.isOrderAsk {
            true => (maker.signer, taker.taker),
            false => (taker.taker, maker.signer),
        };
        let token_id = taker.tokenId;
        let exchange = self.addresses.exchange;

        let owed = maker.price.checked_sub(value).context("value above price")?;
        let token = state.tokens.entry(maker.currency).or_default();
        let buyer_balance = token.balances.get(&buyer).copied().unwrap_or_default();
        let allowance = token
            .allowances
            .get(&(buyer, exchange))
            .copied()
            .unwrap_or_default();
        ensure!(buyer_balance >= owed, "insufficient currency balance");
        ensure!(allowance >= owed, "insufficient currency allowance");

        let collection = collection_mut(state, maker.collection)?;
        match collection.standard {
            Standard::Erc721 => {
                let manager = self.addresses.transfer_manager_erc721;
                ensure!(
                    collection.owners.get(&token_id) == Some(&seller),
                    "seller does not own the token"
                );
                ensure!(
                    collection.operators.contains(&(seller, manager))
                        || collection.token_approvals.get(&token_id) == Some(&manager),
                    "transfer manager not approved"
                );
                collection.owners.insert(token_id, buyer);
                collection.token_approvals.remove(&token_id);
            }
            Standard::Erc1155 => {
                let manager = self.addresses.transfer_manager_erc1155;
                ensure!(
                    collection.operators.contains(&(seller, manager)),
                    "transfer manager not approved"
                );
                let seller_balance = collection
                    .balances
                    .get(&(seller, token_id))
                    .copied()
                    .unwrap_or_default();
                ensure!(seller_balance >= maker.amount, "insufficient token balance");
                collection
                    .balances
                    .insert((seller, token_id), seller_balance - maker.amount);
                *collection.balances.entry((buyer, token_id)).or_default() += maker.amount;
            }
        }

        let token = state.tokens.entry(maker.currency).or_default();
        token.balances.insert(buyer, buyer_balance - owed);
        token.allowances.insert((buyer, exchange), allowance - owed);
        *token.balances.entry(seller).or_default() += owed;
        state.executed_or_cancelled.insert((maker.signer, maker.nonce));
        Ok(())
    }
}

fn collection_mut(state: &mut State, collection: Address) -> Result<&mut Collection> {
    state
        .collections
        .get_mut(&collection)
        .with_context(|| format!("no collection deployed at {collection}"))
}

#[async_trait::async_trait]
impl LedgerReading for FakeLedger {
    async fn block_timestamp(&self) -> Result<u64> {
        Ok(self.state().block_timestamp)
    }

    async fn nonce_state(&self, user: Address, nonce: U256) -> Result<NonceState> {
        let state = self.state();
        Ok(NonceState {
            executed_or_cancelled: state.executed_or_cancelled.contains(&(user, nonce)),
            min_nonce: state.min_nonces.get(&user).copied().unwrap_or_default(),
        })
    }

    async fn transfer_manager(&self, collection: Address) -> Result<TransferManager> {
        let state = self.state();
        if let Some(manager) = state.custom_managers.get(&collection) {
            return Ok(TransferManager::Custom(*manager));
        }
        Ok(match state.collections.get(&collection).map(|c| c.standard) {
            Some(Standard::Erc721) => {
                TransferManager::Erc721(self.addresses.transfer_manager_erc721)
            }
            Some(Standard::Erc1155) => {
                TransferManager::Erc1155(self.addresses.transfer_manager_erc1155)
            }
            None => TransferManager::None,
        })
    }

    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> Result<bool> {
        Ok(self
            .state()
            .collections
            .get(&collection)
            .is_some_and(|c| c.operators.contains(&(owner, operator))))
    }

    async fn token_approval(&self, collection: Address, token_id: U256) -> Result<Option<Address>> {
        Ok(self
            .state()
            .collections
            .get(&collection)
            .and_then(|c| c.token_approvals.get(&token_id))
            .copied())
    }

    async fn owner_of(&self, collection: Address, token_id: U256) -> Result<Option<Address>> {
        Ok(self.token_owner(collection, token_id))
    }

    async fn erc1155_balance(
        &self,
        collection: Address,
        owner: Address,
        token_id: U256,
    ) -> Result<U256> {
        Ok(self
            .state()
            .collections
            .get(&collection)
            .and_then(|c| c.balances.get(&(owner, token_id)))
            .copied()
            .unwrap_or_default())
    }

    async fn allowance(&self, currency: Address, owner: Address, spender: Address) -> Result<U256> {
        Ok(self
            .state()
            .tokens
            .get(&currency)
            .and_then(|token| token.allowances.get(&(owner, spender)))
            .copied()
            .unwrap_or_default())
    }

    async fn balance(&self, currency: Address, owner: Address) -> Result<U256> {
        Ok(self.currency_balance(currency, owner))
    }

    async fn is_currency_whitelisted(&self, currency: Address) -> Result<bool> {
        Ok(self.state().currencies.contains(&currency))
    }

    async fn is_strategy_whitelisted(&self, strategy: Address) -> Result<bool> {
        Ok(self.state().strategies.contains_key(&strategy))
    }

    async fn protocol_fee(&self, strategy: Address) -> Result<U256> {
        Ok(self
            .state()
            .strategies
            .get(&strategy)
            .copied()
            .unwrap_or_default())
    }

    async fn royalty(&self, collection: Address, _token_id: U256, price: U256) -> Result<Royalty> {
        let state = self.state();
        let (source, royalty) = match state.registry.get(&collection) {
            Some(royalty) => (RoyaltySource::Registry, Some(royalty)),
            None => (
                RoyaltySource::Erc2981,
                state
                    .collections
                    .get(&collection)
                    .and_then(|c| c.erc2981.as_ref()),
            ),
        };
        Ok(match royalty {
            Some((receiver, bps)) => Royalty {
                source,
                receiver: *receiver,
                amount: basis_points::share(price, *bps).context("royalty overflows")?,
            },
            None => Royalty::default(),
        })
    }

    async fn is_contract(&self, address: Address) -> Result<bool> {
        Ok(self.state().wallets.contains_key(&address))
    }

    async fn eip1271_signature(
        &self,
        signer: Address,
        hash: B256,
        signature: Bytes,
    ) -> Result<Option<bool>> {
        let Some(owner) = self.state().wallets.get(&signer).copied() else {
            return Ok(None);
        };
        let Ok(bytes) = <[u8; 65]>::try_from(&signature[..]) else {
            return Ok(Some(false));
        };
        let recovered = EcdsaSignature::from_bytes(&bytes).recover(&hash).ok();
        Ok(Some(recovered == Some(owner)))
    }
}
