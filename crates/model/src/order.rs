//! Maker and taker orders together with their EIP-712 hashing.

use {
    crate::{
        DomainSeparator,
        signature::{EcdsaSignature, hashed_eip712_message},
    },
    alloy::primitives::{Address, B256, Bytes, U256, b256, keccak256},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// An order created by the party that lists an item or places an offer.
///
/// The maker signs the EIP-712 hash of this struct off-chain. Changing any
/// field after signing invalidates the signature.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerOrder {
    /// `true` when selling an item, `false` when bidding for one.
    pub is_order_ask: bool,
    pub signer: Address,
    pub collection: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub price: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub token_id: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount: U256,
    pub strategy: Address,
    pub currency: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub nonce: U256,
    pub start_time: u64,
    pub end_time: u64,
    /// Lowest share of the price, in basis points, the ask side accepts to
    /// receive after protocol and royalty fees.
    #[serde_as(as = "HexOrDecimalU256")]
    pub min_percentage_to_ask: U256,
    /// ABI encoded strategy specific parameters. Empty when the strategy takes
    /// none.
    #[serde(default)]
    pub params: Bytes,
}

impl MakerOrder {
    pub const TYPE_STRING: &'static str = "MakerOrder(bool isOrderAsk,address signer,address \
                                           collection,uint256 price,uint256 tokenId,uint256 \
                                           amount,address strategy,address currency,uint256 \
                                           nonce,uint256 startTime,uint256 endTime,uint256 \
                                           minPercentageToAsk,bytes params)";
    /// keccak256 of [`Self::TYPE_STRING`].
    pub const TYPE_HASH: B256 =
        b256!("40261ade532fa1d2c7293df30aaadb9b3c616fae525a0b56d3d411c841a85028");

    /// Returns the EIP-712 `hashStruct` of the order.
    pub fn hash_struct(&self) -> B256 {
        let mut hash_data = [0u8; 448];
        hash_data[0..32].copy_from_slice(Self::TYPE_HASH.as_slice());
        hash_data[63] = u8::from(self.is_order_ask);
        hash_data[76..96].copy_from_slice(self.signer.as_slice());
        hash_data[108..128].copy_from_slice(self.collection.as_slice());
        hash_data[128..160].copy_from_slice(&self.price.to_be_bytes::<32>());
        hash_data[160..192].copy_from_slice(&self.token_id.to_be_bytes::<32>());
        hash_data[192..224].copy_from_slice(&self.amount.to_be_bytes::<32>());
        hash_data[236..256].copy_from_slice(self.strategy.as_slice());
        hash_data[268..288].copy_from_slice(self.currency.as_slice());
        hash_data[288..320].copy_from_slice(&self.nonce.to_be_bytes::<32>());
        hash_data[344..352].copy_from_slice(&self.start_time.to_be_bytes());
        hash_data[376..384].copy_from_slice(&self.end_time.to_be_bytes());
        hash_data[384..416].copy_from_slice(&self.min_percentage_to_ask.to_be_bytes::<32>());
        hash_data[416..448].copy_from_slice(keccak256(&self.params).as_slice());
        keccak256(hash_data)
    }

    /// The digest the signer signs for the given exchange domain.
    pub fn signing_hash(&self, domain: &DomainSeparator) -> B256 {
        hashed_eip712_message(domain, &self.hash_struct())
    }
}

/// A maker order paired with the signature of its owner. This is the form in
/// which orders get shared with takers and submitted to the exchange.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerOrderWithSignature {
    #[serde(flatten)]
    pub order: MakerOrder,
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl MakerOrderWithSignature {
    pub fn new(order: MakerOrder, signature: EcdsaSignature) -> Self {
        Self {
            order,
            v: signature.v,
            r: signature.r,
            s: signature.s,
        }
    }

    pub fn signature(&self) -> EcdsaSignature {
        EcdsaSignature {
            r: self.r,
            s: self.s,
            v: self.v,
        }
    }
}

/// The counterparty order matching a maker order. Takers are never signed.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakerOrder {
    pub is_order_ask: bool,
    pub taker: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub price: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub token_id: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub min_percentage_to_ask: U256,
    #[serde(default)]
    pub params: Bytes,
}
