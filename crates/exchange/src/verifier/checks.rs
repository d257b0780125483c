//! The individual verification checks. Each one returns exactly one code,
//! [`ValidityCode::ExpectedToBeValid`] when it passes.

use {
    crate::ledger::{LedgerReading, RoyaltySource, TransferManager},
    alloy::primitives::{Address, B256, Bytes, U256},
    anyhow::Result,
    model::{order::MakerOrder, signature::EcdsaSignature, validity::ValidityCode},
    number::basis_points,
};

pub async fn nonce(ledger: &dyn LedgerReading, maker: &MakerOrder) -> Result<ValidityCode> {
    let state = ledger.nonce_state(maker.signer, maker.nonce).await?;
    Ok(if state.executed_or_cancelled {
        ValidityCode::NonceExecutedOrCancelled
    } else if maker.nonce < state.min_nonce {
        ValidityCode::NonceBelowMinOrderNonce
    } else {
        ValidityCode::ExpectedToBeValid
    })
}

pub fn amount(maker: &MakerOrder) -> ValidityCode {
    match maker.amount.is_zero() {
        true => ValidityCode::OrderAmountCannotBeZero,
        false => ValidityCode::ExpectedToBeValid,
    }
}

/// Mirrors the exchange's signature verification: `ecrecover` with
/// malleability checks for accounts without code, ERC-1271 for contracts.
pub async fn signature(
    ledger: &dyn LedgerReading,
    maker: &MakerOrder,
    signature: &EcdsaSignature,
    digest: B256,
) -> Result<ValidityCode> {
    if maker.signer.is_zero() {
        return Ok(ValidityCode::MakerSignerIsNullSigner);
    }

    if ledger.is_contract(maker.signer).await? {
        let bytes = Bytes::copy_from_slice(&signature.to_bytes());
        return Ok(
            match ledger.eip1271_signature(maker.signer, digest, bytes).await? {
                None => ValidityCode::MissingIsValidSignatureFunctionEip1271,
                Some(false) => ValidityCode::SignatureInvalidEip1271,
                Some(true) => ValidityCode::ExpectedToBeValid,
            },
        );
    }

    if !signature.is_s_canonical() {
        return Ok(ValidityCode::InvalidSParameterEoa);
    }
    if !signature.is_v_standard() {
        return Ok(ValidityCode::InvalidVParameterEoa);
    }
    Ok(match signature.recover(&digest) {
        Ok(recovered) if recovered == maker.signer => ValidityCode::ExpectedToBeValid,
        Ok(recovered) if !recovered.is_zero() => ValidityCode::WrongSignerEoa,
        _ => ValidityCode::NullSignerEoa,
    })
}

pub async fn whitelists(ledger: &dyn LedgerReading, maker: &MakerOrder) -> Result<ValidityCode> {
    let (currency, strategy) = futures::try_join!(
        ledger.is_currency_whitelisted(maker.currency),
        ledger.is_strategy_whitelisted(maker.strategy),
    )?;
    Ok(if !currency {
        ValidityCode::CurrencyNotWhitelisted
    } else if !strategy {
        ValidityCode::StrategyNotWhitelisted
    } else {
        ValidityCode::ExpectedToBeValid
    })
}

/// Only asks carry a meaningful minimum: the seller's net share after the
/// protocol fee and royalty has to reach `min_percentage_to_ask` of the price.
pub async fn min_percentage_to_ask(
    ledger: &dyn LedgerReading,
    maker: &MakerOrder,
) -> Result<ValidityCode> {
    if !maker.is_order_ask {
        return Ok(ValidityCode::ExpectedToBeValid);
    }
    let (fee_bps, royalty) = futures::try_join!(
        ledger.protocol_fee(maker.strategy),
        ledger.royalty(maker.collection, maker.token_id, maker.price),
    )?;
    let protocol_fee = basis_points::share(maker.price, fee_bps).unwrap_or(U256::MAX);
    let net = maker
        .price
        .saturating_sub(protocol_fee)
        .saturating_sub(royalty.amount);
    if basis_points::reaches(net, maker.price, maker.min_percentage_to_ask) {
        return Ok(ValidityCode::ExpectedToBeValid);
    }
    Ok(match royalty.source {
        RoyaltySource::None => ValidityCode::MinNetRatioAboveProtocolFee,
        RoyaltySource::Registry => ValidityCode::MinNetRatioAboveRoyaltyFeeRegistryAndProtocolFee,
        RoyaltySource::Erc2981 => ValidityCode::MinNetRatioAboveRoyaltyFeeErc2981AndProtocolFee,
    })
}

pub fn timestamps(maker: &MakerOrder, block_timestamp: u64) -> ValidityCode {
    if maker.start_time > block_timestamp {
        ValidityCode::TooEarlyToExecuteOrder
    } else if maker.end_time < block_timestamp {
        ValidityCode::TooLateToExecuteOrder
    } else {
        ValidityCode::ExpectedToBeValid
    }
}

/// Bids need currency the exchange may spend, asks need items the transfer
/// manager may move.
pub async fn approvals_and_balances(
    ledger: &dyn LedgerReading,
    maker: &MakerOrder,
    exchange: Address,
) -> Result<ValidityCode> {
    if !maker.is_order_ask {
        let (balance, allowance) = futures::try_join!(
            ledger.balance(maker.currency, maker.signer),
            ledger.allowance(maker.currency, maker.signer, exchange),
        )?;
        return Ok(if balance < maker.price {
            ValidityCode::Erc20BalanceInferiorToPrice
        } else if allowance < maker.price {
            ValidityCode::Erc20ApprovalInferiorToPrice
        } else {
            ValidityCode::ExpectedToBeValid
        });
    }

    match ledger.transfer_manager(maker.collection).await? {
        TransferManager::None => Ok(ValidityCode::NoTransferManagerAvailableForCollection),
        TransferManager::Custom(_) => Ok(ValidityCode::CustomTransferManager),
        TransferManager::Erc721(manager) => erc721(ledger, maker, manager).await,
        TransferManager::Erc1155(manager) => erc1155(ledger, maker, manager).await,
    }
}

async fn erc721(
    ledger: &dyn LedgerReading,
    maker: &MakerOrder,
    manager: Address,
) -> Result<ValidityCode> {
    match ledger.owner_of(maker.collection, maker.token_id).await? {
        None => return Ok(ValidityCode::Erc721TokenIdDoesNotExist),
        Some(owner) if owner != maker.signer => return Ok(ValidityCode::Erc721TokenIdNotInBalance),
        Some(_) => (),
    }
    let (approved_for_all, token_approval) = futures::try_join!(
        ledger.is_approved_for_all(maker.collection, maker.signer, manager),
        ledger.token_approval(maker.collection, maker.token_id),
    )?;
    Ok(match approved_for_all || token_approval == Some(manager) {
        true => ValidityCode::ExpectedToBeValid,
        false => ValidityCode::Erc721NoApprovalForAllOrTokenId,
    })
}

async fn erc1155(
    ledger: &dyn LedgerReading,
    maker: &MakerOrder,
    manager: Address,
) -> Result<ValidityCode> {
    let (balance, approved_for_all) = futures::try_join!(
        ledger.erc1155_balance(maker.collection, maker.signer, maker.token_id),
        ledger.is_approved_for_all(maker.collection, maker.signer, manager),
    )?;
    Ok(if balance < maker.amount {
        ValidityCode::Erc1155BalanceOfTokenIdInferiorToAmount
    } else if !approved_for_all {
        ValidityCode::Erc1155NoApprovalForAll
    } else {
        ValidityCode::ExpectedToBeValid
    })
}
