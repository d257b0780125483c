use {
    alloy::primitives::{Address, address},
    serde::{Deserialize, Serialize},
    std::{collections::HashMap, sync::LazyLock},
};

pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const HARDHAT: u64 = 31337;
}

/// Addresses of every protocol contract the order library interacts with on
/// one chain.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Addresses {
    pub exchange: Address,
    pub transfer_manager_erc721: Address,
    pub transfer_manager_erc1155: Address,
    pub transfer_selector_nft: Address,
    pub strategy_standard_sale: Address,
    pub strategy_collection_sale: Address,
    pub strategy_private_sale: Address,
    pub strategy_dutch_auction: Address,
    pub weth: Address,
    pub royalty_fee_registry: Address,
    pub currency_manager: Address,
    pub execution_manager: Address,
}

static DEPLOYMENTS: LazyLock<HashMap<u64, Addresses>> = LazyLock::new(|| {
    maplit::hashmap! {
        networks::MAINNET => Addresses {
            exchange: address!("59728544B08AB483533076417FbBB2fD0B17CE3a"),
            transfer_manager_erc721: address!("f42aa99F011A1fA7CDA90E5E98b277E306BcA83e"),
            transfer_manager_erc1155: address!("FED24eC7E22f573c2e08AEF55aA6797Ca2b3A051"),
            transfer_selector_nft: address!("9Ba628F27aAc9B2D78A9f2Bf40A8a6DF4Ccd9e2c"),
            strategy_standard_sale: address!("56244Bb70CbD3EA9Dc8007399F61dFC065190031"),
            strategy_collection_sale: address!("86F909F70813CdB1Bc733f4D97Dc6b03B8e7E8F3"),
            strategy_private_sale: address!("58D83536D3EfeDB9F7f2A1Ec3BDaad2b1A4DD98C"),
            strategy_dutch_auction: address!("3E80795Cae5Ee215EBbDf518689467Bf4243BAe0"),
            weth: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            royalty_fee_registry: address!("55010472a93921a117aAD9b055c141060c8d8022"),
            currency_manager: address!("C881ADdf409eE2C4b6bBc8B607c2C5CAFaB93d25"),
            execution_manager: address!("9Cc58bf22a173C0fA8791c13Df396d18185D62b2"),
        },
    }
});

impl Addresses {
    /// The canonical deployment on the given chain, if there is one. Test
    /// networks have to provide every address through configuration.
    pub fn for_chain(chain_id: u64) -> Option<Self> {
        DEPLOYMENTS.get(&chain_id).copied()
    }

    /// Whether the strategy matches any item of a collection rather than one
    /// specific token id.
    pub fn is_collection_strategy(&self, strategy: Address) -> bool {
        strategy == self.strategy_collection_sale
    }
}
