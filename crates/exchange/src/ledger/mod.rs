//! Read access to the ledger state orders are checked against.
//!
//! The order library never writes to the ledger. State changing calls are
//! assembled as [`model::interaction::InteractionData`] and dispatched by the
//! caller.

mod onchain;

pub use onchain::Onchain;
use {
    alloy::primitives::{Address, B256, Bytes, U256},
    anyhow::Result,
};

/// Nonce bookkeeping of the exchange for one user.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NonceState {
    /// The nonce was used by an executed order or cancelled explicitly.
    pub executed_or_cancelled: bool,
    /// Every nonce below this one was cancelled in bulk.
    pub min_nonce: U256,
}

/// The transfer manager the exchange moves a collection's items with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferManager {
    Erc721(Address),
    Erc1155(Address),
    /// A manager registered for this collection only. Its approval semantics
    /// are unknown to the verifier.
    Custom(Address),
    None,
}

impl TransferManager {
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Erc721(address) | Self::Erc1155(address) | Self::Custom(address) => {
                Some(*address)
            }
            Self::None => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RoyaltySource {
    #[default]
    None,
    /// Royalty set in the exchange's royalty fee registry.
    Registry,
    /// Royalty reported by the collection itself through ERC-2981.
    Erc2981,
}

/// The royalty the exchange pays out of a sale.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Royalty {
    pub source: RoyaltySource,
    pub receiver: Address,
    pub amount: U256,
}

/// Abstracts the ledger reads of the order builder and verifier.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait LedgerReading: Send + Sync {
    /// Timestamp of the latest block in seconds.
    async fn block_timestamp(&self) -> Result<u64>;

    async fn nonce_state(&self, user: Address, nonce: U256) -> Result<NonceState>;

    /// The transfer manager selected for the collection.
    async fn transfer_manager(&self, collection: Address) -> Result<TransferManager>;

    /// `isApprovedForAll` of an ERC-721 or ERC-1155 collection.
    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> Result<bool>;

    /// The account approved for one ERC-721 token, `None` when there is none
    /// or the token does not exist.
    async fn token_approval(&self, collection: Address, token_id: U256) -> Result<Option<Address>>;

    /// The owner of an ERC-721 token, `None` when the token does not exist.
    async fn owner_of(&self, collection: Address, token_id: U256) -> Result<Option<Address>>;

    async fn erc1155_balance(
        &self,
        collection: Address,
        owner: Address,
        token_id: U256,
    ) -> Result<U256>;

    async fn allowance(&self, currency: Address, owner: Address, spender: Address) -> Result<U256>;

    async fn balance(&self, currency: Address, owner: Address) -> Result<U256>;

    async fn is_currency_whitelisted(&self, currency: Address) -> Result<bool>;

    async fn is_strategy_whitelisted(&self, strategy: Address) -> Result<bool>;

    /// Protocol fee of the strategy in basis points.
    async fn protocol_fee(&self, strategy: Address) -> Result<U256>;

    /// The royalty paid when `token_id` of `collection` sells for `price`.
    async fn royalty(&self, collection: Address, token_id: U256, price: U256) -> Result<Royalty>;

    /// Whether code is deployed at the address.
    async fn is_contract(&self, address: Address) -> Result<bool>;

    /// Asks a contract signer whether the signature is valid for the hash.
    /// Returns `None` when the contract does not implement ERC-1271.
    async fn eip1271_signature(
        &self,
        signer: Address,
        hash: B256,
        signature: Bytes,
    ) -> Result<Option<bool>>;
}
