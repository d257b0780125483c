//! Contains the order models shared by the order builder, the signing engine
//! and the validity verifier.

pub mod interaction;
pub mod order;
pub mod params;
pub mod signature;
pub mod time;
pub mod validity;

use {
    alloy::{
        hex::{self, FromHex, FromHexError},
        primitives::{Address, B256, U256, b256, keccak256},
        sol_types::{Eip712Domain, SolValue},
    },
    serde::{Deserialize, Serialize},
    std::{borrow::Cow, fmt},
};

/// The EIP-712 domain the exchange contract verifies maker orders under.
///
/// Every field must match the values the deployed exchange uses, otherwise
/// signatures are well formed locally but rejected on-chain.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    /// The EIP-712 domain name of the exchange contract.
    pub const NAME: &'static str = "LooksRareExchange";
    /// The EIP-712 domain version of the exchange contract.
    pub const VERSION: &'static str = "1";
    /// keccak256("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")
    pub const TYPE_HASH: B256 =
        b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

    /// The exchange domain for the given chain and exchange deployment.
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: Self::NAME.to_string(),
            version: Self::VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    pub fn separator(&self) -> DomainSeparator {
        let encoded = (
            Self::TYPE_HASH,
            keccak256(self.name.as_bytes()),
            keccak256(self.version.as_bytes()),
            U256::from(self.chain_id),
            self.verifying_contract,
        )
            .abi_encode();
        DomainSeparator(keccak256(encoded).0)
    }
}

impl From<&Domain> for Eip712Domain {
    fn from(domain: &Domain) -> Self {
        Eip712Domain::new(
            Some(Cow::Owned(domain.name.clone())),
            Some(Cow::Owned(domain.version.clone())),
            Some(U256::from(domain.chain_id)),
            Some(domain.verifying_contract),
            None,
        )
    }
}

#[derive(Copy, Clone, Default, Eq, Hash, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl std::str::FromStr for DomainSeparator {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(FromHex::from_hex(s)?))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<DomainSeparator> for B256 {
    fn from(separator: DomainSeparator) -> Self {
        B256::from(separator.0)
    }
}
