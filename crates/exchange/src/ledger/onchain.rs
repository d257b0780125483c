use {
    super::{LedgerReading, NonceState, Royalty, RoyaltySource, TransferManager},
    alloy::{
        eips::BlockNumberOrTag,
        primitives::{Address, B256, Bytes, U256},
        providers::{DynProvider, Provider, ProviderBuilder},
        transports::RpcError,
    },
    anyhow::{Context, Result},
    contracts::{
        Addresses,
        CurrencyManager,
        ERC20,
        ERC165,
        ERC721,
        ERC1155,
        ERC1271,
        ERC1271_MAGIC_VALUE,
        ERC2981,
        ExecutionManager,
        ExecutionStrategy,
        INTERFACE_ID_ERC2981,
        LooksRareExchange,
        RoyaltyFeeRegistry,
        TransferSelectorNFT,
    },
    std::future::IntoFuture,
    url::Url,
};

/// [`LedgerReading`] backed by an Ethereum node.
#[derive(Clone)]
pub struct Onchain {
    provider: DynProvider,
    addresses: Addresses,
}

impl Onchain {
    pub fn new(provider: DynProvider, addresses: Addresses) -> Self {
        Self {
            provider,
            addresses,
        }
    }

    /// Connects to the JSON-RPC endpoint over HTTP.
    pub fn from_url(url: Url, addresses: Addresses) -> Self {
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Self::new(provider, addresses)
    }

    fn exchange(&self) -> LooksRareExchange::Instance {
        LooksRareExchange::Instance::new(self.addresses.exchange, self.provider.clone())
    }
}

/// Maps calls that revert, or hit an account without code, to `None`. Node
/// errors get propagated.
fn unless_reverted<T>(result: Result<T, alloy::contract::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if is_node_error(&err) => Err(err.into()),
        Err(err) => {
            tracing::trace!(?err, "call reverted");
            Ok(None)
        }
    }
}

/// Transport failures, including error responses without revert data.
/// Reverts surface as error responses that carry revert data, possibly empty.
fn is_node_error(err: &alloy::contract::Error) -> bool {
    match err {
        alloy::contract::Error::TransportError(RpcError::ErrorResp(err)) => {
            let no_revert_data = err.as_revert_data().is_none();
            tracing::debug!(?err, %no_revert_data, "rpc error response");
            no_revert_data
        }
        alloy::contract::Error::TransportError(_) => true,
        _ => false,
    }
}

fn non_zero(address: Address) -> Option<Address> {
    (!address.is_zero()).then_some(address)
}

#[async_trait::async_trait]
impl LedgerReading for Onchain {
    async fn block_timestamp(&self) -> Result<u64> {
        Ok(self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .context("failed to get latest block")?
            .context("no latest block")?
            .header
            .timestamp)
    }

    async fn nonce_state(&self, user: Address, nonce: U256) -> Result<NonceState> {
        let exchange = self.exchange();
        let executed_or_cancelled = exchange.isUserOrderNonceExecutedOrCancelled(user, nonce);
        let min_nonce = exchange.userMinOrderNonce(user);
        let (executed_or_cancelled, min_nonce) = futures::try_join!(
            executed_or_cancelled.call().into_future(),
            min_nonce.call().into_future()
        )
        .with_context(|| format!("failed to read nonce {nonce} of {user}"))?;
        Ok(NonceState {
            executed_or_cancelled,
            min_nonce,
        })
    }

    async fn transfer_manager(&self, collection: Address) -> Result<TransferManager> {
        let manager = TransferSelectorNFT::Instance::new(
            self.addresses.transfer_selector_nft,
            self.provider.clone(),
        )
        .checkTransferManagerForToken(collection)
        .call()
        .await
        .with_context(|| format!("failed to select transfer manager of {collection}"))?;
        Ok(match manager {
            manager if manager.is_zero() => TransferManager::None,
            manager if manager == self.addresses.transfer_manager_erc721 => {
                TransferManager::Erc721(manager)
            }
            manager if manager == self.addresses.transfer_manager_erc1155 => {
                TransferManager::Erc1155(manager)
            }
            manager => TransferManager::Custom(manager),
        })
    }

    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> Result<bool> {
        ERC721::Instance::new(collection, self.provider.clone())
            .isApprovedForAll(owner, operator)
            .call()
            .await
            .with_context(|| format!("failed to read approval of {owner} on {collection}"))
    }

    async fn token_approval(&self, collection: Address, token_id: U256) -> Result<Option<Address>> {
        let approved = unless_reverted(
            ERC721::Instance::new(collection, self.provider.clone())
                .getApproved(token_id)
                .call()
                .await,
        )
        .with_context(|| format!("failed to read approval of {collection} #{token_id}"))?;
        Ok(approved.and_then(non_zero))
    }

    async fn owner_of(&self, collection: Address, token_id: U256) -> Result<Option<Address>> {
        let owner = unless_reverted(
            ERC721::Instance::new(collection, self.provider.clone())
                .ownerOf(token_id)
                .call()
                .await,
        )
        .with_context(|| format!("failed to read owner of {collection} #{token_id}"))?;
        Ok(owner.and_then(non_zero))
    }

    async fn erc1155_balance(
        &self,
        collection: Address,
        owner: Address,
        token_id: U256,
    ) -> Result<U256> {
        ERC1155::Instance::new(collection, self.provider.clone())
            .balanceOf(owner, token_id)
            .call()
            .await
            .with_context(|| format!("failed to read balance of {owner} in {collection} #{token_id}"))
    }

    async fn allowance(&self, currency: Address, owner: Address, spender: Address) -> Result<U256> {
        ERC20::Instance::new(currency, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .with_context(|| format!("failed to read allowance of {owner} for {currency}"))
    }

    async fn balance(&self, currency: Address, owner: Address) -> Result<U256> {
        ERC20::Instance::new(currency, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("failed to read balance of {owner} for {currency}"))
    }

    async fn is_currency_whitelisted(&self, currency: Address) -> Result<bool> {
        CurrencyManager::Instance::new(self.addresses.currency_manager, self.provider.clone())
            .isCurrencyWhitelisted(currency)
            .call()
            .await
            .context("failed to read currency whitelist")
    }

    async fn is_strategy_whitelisted(&self, strategy: Address) -> Result<bool> {
        ExecutionManager::Instance::new(self.addresses.execution_manager, self.provider.clone())
            .isStrategyWhitelisted(strategy)
            .call()
            .await
            .context("failed to read strategy whitelist")
    }

    async fn protocol_fee(&self, strategy: Address) -> Result<U256> {
        ExecutionStrategy::Instance::new(strategy, self.provider.clone())
            .viewProtocolFee()
            .call()
            .await
            .with_context(|| format!("failed to read protocol fee of {strategy}"))
    }

    async fn royalty(&self, collection: Address, token_id: U256, price: U256) -> Result<Royalty> {
        let registered = RoyaltyFeeRegistry::Instance::new(
            self.addresses.royalty_fee_registry,
            self.provider.clone(),
        )
        .royaltyInfo(collection, price)
        .call()
        .await
        .context("failed to read royalty fee registry")?;
        if !registered.receiver.is_zero() {
            return Ok(Royalty {
                source: RoyaltySource::Registry,
                receiver: registered.receiver,
                amount: registered.royaltyAmount,
            });
        }

        let supports_erc2981 = unless_reverted(
            ERC165::Instance::new(collection, self.provider.clone())
                .supportsInterface(INTERFACE_ID_ERC2981.into())
                .call()
                .await,
        )?
        .unwrap_or(false);
        if !supports_erc2981 {
            return Ok(Royalty::default());
        }

        let reported = unless_reverted(
            ERC2981::Instance::new(collection, self.provider.clone())
                .royaltyInfo(token_id, price)
                .call()
                .await,
        )
        .with_context(|| format!("failed to read ERC-2981 royalty of {collection}"))?;
        Ok(match reported {
            Some(reported) if !reported.receiver.is_zero() => Royalty {
                source: RoyaltySource::Erc2981,
                receiver: reported.receiver,
                amount: reported.royaltyAmount,
            },
            _ => Royalty::default(),
        })
    }

    async fn is_contract(&self, address: Address) -> Result<bool> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .with_context(|| format!("failed to get code of {address}"))?;
        Ok(!code.is_empty())
    }

    async fn eip1271_signature(
        &self,
        signer: Address,
        hash: B256,
        signature: Bytes,
    ) -> Result<Option<bool>> {
        let magic = unless_reverted(
            ERC1271::Instance::new(signer, self.provider.clone())
                .isValidSignature(hash, signature)
                .call()
                .await,
        )
        .with_context(|| format!("failed to call isValidSignature on {signer}"))?;
        Ok(magic.map(|magic| magic.0 == ERC1271_MAGIC_VALUE))
    }
}
