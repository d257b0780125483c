//! Construction of maker orders from user intents and derivation of the
//! matching taker orders.

use {
    crate::{Error, Exchange, TimestampError, ledger::TransferManager},
    alloy::{
        dyn_abi::{DynSolType, DynSolValue},
        primitives::{Address, U256},
    },
    contracts::Addresses,
    model::{
        order::{MakerOrder, TakerOrder},
        params,
        time,
    },
    std::collections::HashMap,
};

/// Values the builder uses for everything an intent leaves open.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    pub amount: U256,
    /// Strategy of asks and bids for one specific token.
    pub strategy: Address,
    /// Strategy of collection offers.
    pub collection_strategy: Address,
    /// Strategy whose single param is the only taker allowed to fill.
    pub private_sale_strategy: Address,
    pub currency: Address,
    pub min_percentage_to_ask: U256,
    /// Param types of strategies that take params.
    pub strategy_params: HashMap<Address, Vec<DynSolType>>,
}

impl Defaults {
    pub fn new(addresses: &Addresses) -> Self {
        let configured = configs::Defaults::default();
        Self {
            amount: configured.amount,
            strategy: addresses.strategy_standard_sale,
            collection_strategy: addresses.strategy_collection_sale,
            private_sale_strategy: addresses.strategy_private_sale,
            currency: addresses.weth,
            min_percentage_to_ask: configured.min_percentage_to_ask,
            strategy_params: HashMap::new(),
        }
    }

    pub fn with_config(mut self, config: &configs::Defaults) -> Self {
        self.amount = config.amount;
        self.min_percentage_to_ask = config.min_percentage_to_ask;
        self
    }

    pub fn with_strategy_params(mut self, params: HashMap<Address, Vec<DynSolType>>) -> Self {
        self.strategy_params = params;
        self
    }
}

/// The kind of maker order to build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// Sell one token.
    Ask,
    /// Buy one token.
    Bid,
    /// Buy any token of a collection.
    CollectionOffer,
}

/// What the maker wants to trade. Everything left unset is resolved from
/// [`Defaults`] when the order gets built.
#[derive(Clone, Debug, PartialEq)]
pub struct MakerIntent {
    pub collection: Address,
    pub price: U256,
    /// `None` for collection offers.
    pub token_id: Option<U256>,
    pub nonce: U256,
    pub end_time: u64,
    pub amount: Option<U256>,
    pub strategy: Option<Address>,
    pub currency: Option<Address>,
    pub start_time: Option<u64>,
    pub min_percentage_to_ask: Option<U256>,
    /// The only taker allowed to fill a private sale.
    pub taker: Option<Address>,
    pub params: Vec<DynSolValue>,
}

impl MakerIntent {
    pub fn new(collection: Address, price: U256, token_id: U256, nonce: U256, end_time: u64) -> Self {
        Self {
            collection,
            price,
            token_id: Some(token_id),
            nonce,
            end_time,
            amount: None,
            strategy: None,
            currency: None,
            start_time: None,
            min_percentage_to_ask: None,
            taker: None,
            params: Vec::new(),
        }
    }

    pub fn collection_offer(collection: Address, price: U256, nonce: U256, end_time: u64) -> Self {
        Self {
            token_id: None,
            ..Self::new(collection, price, U256::ZERO, nonce, end_time)
        }
    }

    pub fn with_amount(mut self, amount: U256) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_strategy(mut self, strategy: Address) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_currency(mut self, currency: Address) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_min_percentage_to_ask(mut self, min_percentage_to_ask: U256) -> Self {
        self.min_percentage_to_ask = Some(min_percentage_to_ask);
        self
    }

    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }

    pub fn with_params(mut self, params: Vec<DynSolValue>) -> Self {
        self.params = params;
        self
    }
}

/// A freshly built, still unsigned maker order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuiltMakerOrder {
    pub maker: MakerOrder,
    /// For asks whether the transfer manager may move the signer's items of
    /// the collection, for bids and offers whether the exchange may spend
    /// `price` of the signer's currency. Orders get built either way.
    pub is_approved: bool,
}

/// What the taker contributes when filling a maker order.
#[derive(Clone, Debug, PartialEq)]
pub struct TakerIntent {
    pub taker: Address,
    /// Defaults to the maker's value.
    pub min_percentage_to_ask: Option<U256>,
    /// Defaults to the maker's params.
    pub params: Option<Vec<DynSolValue>>,
}

impl TakerIntent {
    pub fn new(taker: Address) -> Self {
        Self {
            taker,
            min_percentage_to_ask: None,
            params: None,
        }
    }

    pub fn with_min_percentage_to_ask(mut self, min_percentage_to_ask: U256) -> Self {
        self.min_percentage_to_ask = Some(min_percentage_to_ask);
        self
    }

    pub fn with_params(mut self, params: Vec<DynSolValue>) -> Self {
        self.params = Some(params);
        self
    }
}

fn validate_timestamps(start_time: u64, end_time: u64) -> Result<(), TimestampError> {
    for (field, value) in [("startTime", start_time), ("endTime", end_time)] {
        if !time::is_in_seconds(value) {
            return Err(TimestampError::NotSeconds { field, value });
        }
    }
    if start_time >= end_time {
        return Err(TimestampError::StartNotBeforeEnd {
            start: start_time,
            end: end_time,
        });
    }
    Ok(())
}

impl Exchange {
    /// Builds an unsigned maker order for the configured signing identity.
    ///
    /// All local validation happens before the single ledger read that
    /// determines [`BuiltMakerOrder::is_approved`].
    pub async fn build_maker_order(
        &self,
        intent: MakerIntent,
        side: Side,
    ) -> Result<BuiltMakerOrder, Error> {
        let signer = self.signer()?.address();

        let start_time = intent
            .start_time
            .unwrap_or_else(time::now_in_epoch_seconds);
        validate_timestamps(start_time, intent.end_time)?;

        let defaults = &self.defaults;
        let (token_id, default_strategy) = match side {
            Side::Ask | Side::Bid => (intent.token_id.unwrap_or_default(), defaults.strategy),
            Side::CollectionOffer => (U256::ZERO, defaults.collection_strategy),
        };
        let strategy = intent.strategy.unwrap_or(default_strategy);

        let mut param_values = intent.params;
        if strategy == defaults.private_sale_strategy && param_values.is_empty() {
            if let Some(taker) = intent.taker {
                param_values.push(DynSolValue::Address(taker));
            }
        }
        let params = match defaults.strategy_params.get(&strategy) {
            Some(types) => params::encode_typed(types, &param_values)?,
            None => params::encode(&param_values),
        };

        let maker = MakerOrder {
            is_order_ask: side == Side::Ask,
            signer,
            collection: intent.collection,
            price: intent.price,
            token_id,
            amount: intent.amount.unwrap_or(defaults.amount),
            strategy,
            currency: intent.currency.unwrap_or(defaults.currency),
            nonce: intent.nonce,
            start_time,
            end_time: intent.end_time,
            min_percentage_to_ask: intent
                .min_percentage_to_ask
                .unwrap_or(defaults.min_percentage_to_ask),
            params,
        };

        let is_approved = self.is_approved(&maker).await.map_err(Error::Remote)?;
        tracing::debug!(?side, ?maker, is_approved, "built maker order");
        Ok(BuiltMakerOrder { maker, is_approved })
    }

    pub async fn create_maker_ask(&self, intent: MakerIntent) -> Result<BuiltMakerOrder, Error> {
        self.build_maker_order(intent, Side::Ask).await
    }

    pub async fn create_maker_bid(&self, intent: MakerIntent) -> Result<BuiltMakerOrder, Error> {
        self.build_maker_order(intent, Side::Bid).await
    }

    pub async fn create_maker_collection_offer(
        &self,
        intent: MakerIntent,
    ) -> Result<BuiltMakerOrder, Error> {
        self.build_maker_order(intent, Side::CollectionOffer).await
    }

    async fn is_approved(&self, maker: &MakerOrder) -> anyhow::Result<bool> {
        if maker.is_order_ask {
            let manager = self.ledger.transfer_manager(maker.collection).await?;
            return match manager.address() {
                Some(operator) => {
                    self.ledger
                        .is_approved_for_all(maker.collection, maker.signer, operator)
                        .await
                }
                None => Ok(false),
            };
        }
        let allowance = self
            .ledger
            .allowance(maker.currency, maker.signer, self.addresses.exchange)
            .await?;
        Ok(allowance >= maker.price)
    }

    /// Derives the taker order filling `maker`.
    ///
    /// Collection offers carry a placeholder token id and have to be filled
    /// through [`Self::create_taker_collection_offer`].
    pub fn create_taker(&self, maker: &MakerOrder, intent: TakerIntent) -> TakerOrder {
        debug_assert!(
            !is_collection_offer(maker, &self.addresses),
            "collection offers are filled with create_taker_collection_offer"
        );
        self.create_taker_for_token(maker, maker.token_id, intent)
    }

    /// Derives the taker order filling a collection offer with `token_id`.
    pub fn create_taker_collection_offer(
        &self,
        maker: &MakerOrder,
        token_id: U256,
        intent: TakerIntent,
    ) -> TakerOrder {
        self.create_taker_for_token(maker, token_id, intent)
    }

    fn create_taker_for_token(
        &self,
        maker: &MakerOrder,
        token_id: U256,
        intent: TakerIntent,
    ) -> TakerOrder {
        TakerOrder {
            is_order_ask: !maker.is_order_ask,
            taker: intent.taker,
            price: maker.price,
            token_id,
            min_percentage_to_ask: intent
                .min_percentage_to_ask
                .unwrap_or(maker.min_percentage_to_ask),
            params: match intent.params {
                Some(values) => params::encode(&values),
                None => maker.params.clone(),
            },
        }
    }
}

/// Whether a maker order was built by [`Exchange::create_maker_collection_offer`]
/// for the given deployment.
pub fn is_collection_offer(maker: &MakerOrder, addresses: &Addresses) -> bool {
    !maker.is_order_ask && addresses.is_collection_strategy(maker.strategy)
}
