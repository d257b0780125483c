//! Assembly of the state changing exchange calls. The caller dispatches the
//! returned [`InteractionData`] through its own ledger client.

use {
    crate::{Error, Exchange},
    alloy::{
        primitives::{Address, U256},
        sol_types::SolCall,
    },
    contracts::{ERC20, ERC721, ERC1155, LooksRareExchange},
    model::{
        interaction::InteractionData,
        order::{MakerOrder, MakerOrderWithSignature, TakerOrder},
        signature::EcdsaSignature,
    },
};

/// The token standard of a collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollectionKind {
    Erc721,
    Erc1155,
}

impl Exchange {
    /// Approves the transfer manager of the collection's standard to move
    /// every item the caller holds.
    pub fn approve_all_collection_items(
        &self,
        collection: Address,
        kind: CollectionKind,
    ) -> InteractionData {
        let call_data = match kind {
            CollectionKind::Erc721 => ERC721::setApprovalForAllCall {
                operator: self.addresses.transfer_manager_erc721,
                approved: true,
            }
            .abi_encode(),
            CollectionKind::Erc1155 => ERC1155::setApprovalForAllCall {
                operator: self.addresses.transfer_manager_erc1155,
                approved: true,
            }
            .abi_encode(),
        };
        InteractionData {
            target: collection,
            value: U256::ZERO,
            call_data: call_data.into(),
        }
    }

    /// Approves the exchange to spend `amount` of the currency, an unlimited
    /// amount when `None`.
    pub fn approve_erc20(&self, currency: Address, amount: Option<U256>) -> InteractionData {
        let call = ERC20::approveCall {
            spender: self.addresses.exchange,
            amount: amount.unwrap_or(U256::MAX),
        };
        InteractionData {
            target: currency,
            value: U256::ZERO,
            call_data: call.abi_encode().into(),
        }
    }

    /// Matches a signed maker order with a taker order.
    ///
    /// A non-zero `value` on a maker ask pays with native currency and tops
    /// up with the wrapped currency.
    pub fn execute_order(
        &self,
        maker: &MakerOrder,
        taker: &TakerOrder,
        signature: &EcdsaSignature,
        value: Option<U256>,
    ) -> InteractionData {
        let maker = maker_tuple(&MakerOrderWithSignature::new(maker.clone(), *signature));
        let taker = taker_tuple(taker);
        let value = value.unwrap_or_default();
        let (call_data, value) = match (maker.isOrderAsk, value.is_zero()) {
            (true, false) => {
                let call = LooksRareExchange::matchAskWithTakerBidUsingETHAndWETHCall {
                    takerBid: taker,
                    makerAsk: maker,
                };
                (call.abi_encode(), value)
            }
            (true, true) => {
                let call = LooksRareExchange::matchAskWithTakerBidCall {
                    takerBid: taker,
                    makerAsk: maker,
                };
                (call.abi_encode(), U256::ZERO)
            }
            (false, _) => {
                let call = LooksRareExchange::matchBidWithTakerAskCall {
                    takerAsk: taker,
                    makerBid: maker,
                };
                (call.abi_encode(), U256::ZERO)
            }
        };
        tracing::debug!(%value, "assembled order execution");
        InteractionData {
            target: self.addresses.exchange,
            value,
            call_data: call_data.into(),
        }
    }

    /// Cancels every order of the signer with a nonce below `min_nonce`.
    pub fn cancel_all_orders_for_sender(&self, min_nonce: U256) -> Result<InteractionData, Error> {
        self.signer()?;
        let call = LooksRareExchange::cancelAllOrdersForSenderCall { minNonce: min_nonce };
        Ok(self.exchange_call(call.abi_encode()))
    }

    /// Cancels the signer's orders with the given nonces.
    pub fn cancel_multiple_maker_orders(&self, nonces: &[U256]) -> Result<InteractionData, Error> {
        self.signer()?;
        let call = LooksRareExchange::cancelMultipleMakerOrdersCall {
            orderNonces: nonces.to_vec(),
        };
        Ok(self.exchange_call(call.abi_encode()))
    }

    fn exchange_call(&self, call_data: Vec<u8>) -> InteractionData {
        InteractionData {
            target: self.addresses.exchange,
            value: U256::ZERO,
            call_data: call_data.into(),
        }
    }
}

fn maker_tuple(maker: &MakerOrderWithSignature) -> LooksRareExchange::MakerOrder {
    let order = &maker.order;
    LooksRareExchange::MakerOrder {
        isOrderAsk: order.is_order_ask,
        signer: order.signer,
        collection: order.collection,
        price: order.price,
        tokenId: order.token_id,
        amount: order.amount,
        strategy: order.strategy,
        currency: order.currency,
        nonce: order.nonce,
        startTime: U256::from(order.start_time),
        endTime: U256::from(order.end_time),
        minPercentageToAsk: order.min_percentage_to_ask,
        params: order.params.clone(),
        v: maker.v,
        r: maker.r,
        s: maker.s,
    }
}

fn taker_tuple(taker: &TakerOrder) -> LooksRareExchange::TakerOrder {
    LooksRareExchange::TakerOrder {
        isOrderAsk: taker.is_order_ask,
        taker: taker.taker,
        price: taker.price,
        tokenId: taker.token_id,
        minPercentageToAsk: taker.min_percentage_to_ask,
        params: taker.params.clone(),
    }
}
