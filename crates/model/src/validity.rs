//! Validity codes reported by the order verifier.
//!
//! Codes are grouped by hundreds according to the check that emits them. The
//! numeric values are stable and match the ones the exchange tooling reports,
//! so they can be shared with other clients.

use {
    serde::{Deserialize, Serialize},
    strum::IntoEnumIterator,
};

/// The outcome of one verification check for one order.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(into = "u16", try_from = "u16")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidityCode {
    ExpectedToBeValid,

    NonceExecutedOrCancelled,
    NonceBelowMinOrderNonce,

    OrderAmountCannotBeZero,

    MakerSignerIsNullSigner,
    InvalidSParameterEoa,
    InvalidVParameterEoa,
    NullSignerEoa,
    WrongSignerEoa,
    SignatureInvalidEip1271,
    MissingIsValidSignatureFunctionEip1271,

    CurrencyNotWhitelisted,
    StrategyNotWhitelisted,

    MinNetRatioAboveProtocolFee,
    MinNetRatioAboveRoyaltyFeeRegistryAndProtocolFee,
    MinNetRatioAboveRoyaltyFeeErc2981AndProtocolFee,

    TooEarlyToExecuteOrder,
    TooLateToExecuteOrder,

    NoTransferManagerAvailableForCollection,
    CustomTransferManager,
    Erc20BalanceInferiorToPrice,
    Erc20ApprovalInferiorToPrice,
    Erc721TokenIdDoesNotExist,
    Erc721TokenIdNotInBalance,
    Erc721NoApprovalForAllOrTokenId,
    Erc1155BalanceOfTokenIdInferiorToAmount,
    Erc1155NoApprovalForAll,
}

impl ValidityCode {
    pub fn code(self) -> u16 {
        match self {
            Self::ExpectedToBeValid => 0,
            Self::NonceExecutedOrCancelled => 101,
            Self::NonceBelowMinOrderNonce => 102,
            Self::OrderAmountCannotBeZero => 201,
            Self::MakerSignerIsNullSigner => 301,
            Self::InvalidSParameterEoa => 302,
            Self::InvalidVParameterEoa => 303,
            Self::NullSignerEoa => 304,
            Self::WrongSignerEoa => 305,
            Self::SignatureInvalidEip1271 => 311,
            Self::MissingIsValidSignatureFunctionEip1271 => 312,
            Self::CurrencyNotWhitelisted => 401,
            Self::StrategyNotWhitelisted => 402,
            Self::MinNetRatioAboveProtocolFee => 501,
            Self::MinNetRatioAboveRoyaltyFeeRegistryAndProtocolFee => 502,
            Self::MinNetRatioAboveRoyaltyFeeErc2981AndProtocolFee => 503,
            Self::TooEarlyToExecuteOrder => 601,
            Self::TooLateToExecuteOrder => 602,
            Self::NoTransferManagerAvailableForCollection => 701,
            Self::CustomTransferManager => 702,
            Self::Erc20BalanceInferiorToPrice => 711,
            Self::Erc20ApprovalInferiorToPrice => 712,
            Self::Erc721TokenIdDoesNotExist => 721,
            Self::Erc721TokenIdNotInBalance => 722,
            Self::Erc721NoApprovalForAllOrTokenId => 723,
            Self::Erc1155BalanceOfTokenIdInferiorToAmount => 732,
            Self::Erc1155NoApprovalForAll => 734,
        }
    }

    /// Informational codes describe the order without making it invalid.
    pub fn is_informational(self) -> bool {
        matches!(self, Self::CustomTransferManager)
    }

    pub fn is_failure(self) -> bool {
        !matches!(self, Self::ExpectedToBeValid) && !self.is_informational()
    }
}

impl From<ValidityCode> for u16 {
    fn from(code: ValidityCode) -> Self {
        code.code()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown validity code {0}")]
pub struct UnknownValidityCode(pub u16);

impl TryFrom<u16> for ValidityCode {
    type Error = UnknownValidityCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|code| code.code() == value)
            .ok_or(UnknownValidityCode(value))
    }
}

/// The verification checks, in the order they run.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum Check {
    Nonce,
    Amount,
    Signature,
    Whitelists,
    MinPercentageToAsk,
    Timestamps,
    ApprovalsAndBalances,
}

/// The collapsed result of all checks for one order.
///
/// Holds every failing code (plus informational ones) when at least one check
/// failed. Otherwise holds [`ValidityCode::ExpectedToBeValid`] followed by the
/// informational codes. An empty list means no check ran and is never valid.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidityCodes(Vec<ValidityCode>);

impl ValidityCodes {
    pub fn from_checks(codes: impl IntoIterator<Item = ValidityCode>) -> Self {
        let mut failures = Vec::new();
        let mut informational = Vec::new();
        let mut any = false;
        for code in codes {
            any = true;
            let bucket = match code {
                code if code.is_failure() => &mut failures,
                code if code.is_informational() => &mut informational,
                _ => continue,
            };
            if !bucket.contains(&code) {
                bucket.push(code);
            }
        }
        if !any {
            return Self::default();
        }
        if failures.is_empty() {
            failures.push(ValidityCode::ExpectedToBeValid);
        }
        failures.extend(informational);
        Self(failures)
    }

    pub fn is_expected_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.iter().any(|code| code.is_failure())
    }

    pub fn contains(&self, code: ValidityCode) -> bool {
        self.0.contains(&code)
    }

    pub fn failures(&self) -> impl Iterator<Item = ValidityCode> + '_ {
        self.0.iter().copied().filter(|code| code.is_failure())
    }

    pub fn as_slice(&self) -> &[ValidityCode] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<ValidityCode> {
        self.0
    }
}

impl From<ValidityCodes> for Vec<ValidityCode> {
    fn from(codes: ValidityCodes) -> Self {
        codes.0
    }
}
