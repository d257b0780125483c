use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    contracts::Addresses,
    serde::Deserialize,
};

/// Per address overrides of the canonical deployment. Chains without a
/// canonical deployment have to set every field.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContractOverrides {
    pub exchange: Option<Address>,
    pub transfer_manager_erc721: Option<Address>,
    pub transfer_manager_erc1155: Option<Address>,
    pub transfer_selector_nft: Option<Address>,
    pub strategy_standard_sale: Option<Address>,
    pub strategy_collection_sale: Option<Address>,
    pub strategy_private_sale: Option<Address>,
    pub strategy_dutch_auction: Option<Address>,
    pub weth: Option<Address>,
    pub royalty_fee_registry: Option<Address>,
    pub currency_manager: Option<Address>,
    pub execution_manager: Option<Address>,
}

impl ContractOverrides {
    pub fn resolve(&self, chain_id: u64) -> Result<Addresses> {
        let canonical = Addresses::for_chain(chain_id);
        macro_rules! pick {
            ($field:ident) => {
                self.$field
                    .or(canonical.map(|addresses| addresses.$field))
                    .with_context(|| {
                        format!(
                            "no {} address for chain {chain_id}",
                            stringify!($field).replace('_', "-")
                        )
                    })?
            };
        }
        Ok(Addresses {
            exchange: pick!(exchange),
            transfer_manager_erc721: pick!(transfer_manager_erc721),
            transfer_manager_erc1155: pick!(transfer_manager_erc1155),
            transfer_selector_nft: pick!(transfer_selector_nft),
            strategy_standard_sale: pick!(strategy_standard_sale),
            strategy_collection_sale: pick!(strategy_collection_sale),
            strategy_private_sale: pick!(strategy_private_sale),
            strategy_dutch_auction: pick!(strategy_dutch_auction),
            weth: pick!(weth),
            royalty_fee_registry: pick!(royalty_fee_registry),
            currency_manager: pick!(currency_manager),
            execution_manager: pick!(execution_manager),
        })
    }
}

impl From<Addresses> for ContractOverrides {
    fn from(addresses: Addresses) -> Self {
        Self {
            exchange: Some(addresses.exchange),
            transfer_manager_erc721: Some(addresses.transfer_manager_erc721),
            transfer_manager_erc1155: Some(addresses.transfer_manager_erc1155),
            transfer_selector_nft: Some(addresses.transfer_selector_nft),
            strategy_standard_sale: Some(addresses.strategy_standard_sale),
            strategy_collection_sale: Some(addresses.strategy_collection_sale),
            strategy_private_sale: Some(addresses.strategy_private_sale),
            strategy_dutch_auction: Some(addresses.strategy_dutch_auction),
            weth: Some(addresses.weth),
            royalty_fee_registry: Some(addresses.royalty_fee_registry),
            currency_manager: Some(addresses.currency_manager),
            execution_manager: Some(addresses.execution_manager),
        }
    }
}
