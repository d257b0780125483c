use {
    alloy::primitives::U256,
    number::serialization::HexOrDecimalU256,
    serde::Deserialize,
    serde_with::serde_as,
};

/// Builder defaults that can be tuned per deployment.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Defaults {
    /// Basis points of the price an ask must at least receive after fees.
    #[serde_as(as = "HexOrDecimalU256")]
    #[serde(default = "default_min_percentage_to_ask")]
    pub min_percentage_to_ask: U256,

    #[serde_as(as = "HexOrDecimalU256")]
    #[serde(default = "default_amount")]
    pub amount: U256,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            min_percentage_to_ask: default_min_percentage_to_ask(),
            amount: default_amount(),
        }
    }
}

fn default_min_percentage_to_ask() -> U256 {
    U256::from(8500)
}

fn default_amount() -> U256 {
    U256::from(1)
}
