//! Off-chain verification of signed maker orders.
//!
//! Every check reads the current ledger state. Nothing is cached between
//! calls, so a cancellation is visible to the next verification. Orders of a
//! batch are verified independently of each other; two orders sharing a nonce
//! both verify as valid until one of them executes.

mod checks;

use {
    crate::{Error, Exchange},
    model::{
        order::MakerOrder,
        signature::EcdsaSignature,
        validity::{Check, ValidityCode, ValidityCodes},
    },
    tracing::instrument,
};

impl Exchange {
    /// Runs every check and collapses the outcome into [`ValidityCodes`].
    pub async fn verify(
        &self,
        maker: &MakerOrder,
        signature: &EcdsaSignature,
    ) -> Result<ValidityCodes, Error> {
        let checks = self.verify_checks(maker, signature).await?;
        Ok(ValidityCodes::from_checks(
            checks.into_iter().map(|(_, code)| code),
        ))
    }

    /// Verifies orders concurrently. The result at index `i` belongs to
    /// `makers[i]` signed with `signatures[i]`.
    #[instrument(skip_all, fields(orders = makers.len()))]
    pub async fn verify_many(
        &self,
        makers: &[MakerOrder],
        signatures: &[EcdsaSignature],
    ) -> Result<Vec<ValidityCodes>, Error> {
        if makers.len() != signatures.len() {
            return Err(Error::BatchMismatch {
                orders: makers.len(),
                signatures: signatures.len(),
            });
        }
        futures::future::try_join_all(
            makers
                .iter()
                .zip(signatures)
                .map(|(maker, signature)| self.verify(maker, signature)),
        )
        .await
    }

    /// Runs every check and returns the code of each one, in the order of
    /// [`Check`].
    #[instrument(skip_all, fields(signer = %maker.signer, nonce = %maker.nonce))]
    pub async fn verify_checks(
        &self,
        maker: &MakerOrder,
        signature: &EcdsaSignature,
    ) -> Result<Vec<(Check, ValidityCode)>, Error> {
        let ledger = self.ledger.as_ref();
        let digest = maker.signing_hash(&self.domain_separator);
        let (nonce, signature, whitelists, min_percentage_to_ask, timestamps, approvals) =
            futures::try_join!(
                checks::nonce(ledger, maker),
                checks::signature(ledger, maker, signature, digest),
                checks::whitelists(ledger, maker),
                checks::min_percentage_to_ask(ledger, maker),
                async {
                    let block_timestamp = ledger.block_timestamp().await?;
                    Ok::<_, anyhow::Error>(checks::timestamps(maker, block_timestamp))
                },
                checks::approvals_and_balances(ledger, maker, self.addresses.exchange),
            )
            .map_err(Error::Remote)?;

        let checks = vec![
            (Check::Nonce, nonce),
            (Check::Amount, checks::amount(maker)),
            (Check::Signature, signature),
            (Check::Whitelists, whitelists),
            (Check::MinPercentageToAsk, min_percentage_to_ask),
            (Check::Timestamps, timestamps),
            (Check::ApprovalsAndBalances, approvals),
        ];
        tracing::debug!(?checks, "verified maker order");
        Ok(checks)
    }
}
