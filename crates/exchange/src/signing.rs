//! EIP-712 signing of maker orders.

use {
    crate::{Error, Exchange},
    alloy::{
        primitives::{Address, B256},
        signers::local::PrivateKeySigner,
    },
    anyhow::Result,
    model::{Domain, order::MakerOrder, signature::EcdsaSignature},
};

/// An identity able to sign 32 byte digests, typically the maker's wallet.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait SigningIdentity: Send + Sync {
    fn address(&self) -> Address;

    async fn sign_hash(&self, hash: &B256) -> Result<EcdsaSignature>;
}

#[async_trait::async_trait]
impl SigningIdentity for PrivateKeySigner {
    fn address(&self) -> Address {
        alloy::signers::Signer::address(self)
    }

    async fn sign_hash(&self, hash: &B256) -> Result<EcdsaSignature> {
        EcdsaSignature::sign(hash, self)
    }
}

impl Exchange {
    /// Signs the maker order under the exchange's EIP-712 domain. The order's
    /// signer must be the signing identity.
    pub async fn sign_maker_order(&self, maker: &MakerOrder) -> Result<EcdsaSignature, Error> {
        let signer = self.signer()?;
        if maker.signer != signer.address() {
            return Err(Error::SignerMismatch {
                maker: maker.signer,
                identity: signer.address(),
            });
        }
        let hash = maker.signing_hash(&self.domain_separator);
        let signature = signer.sign_hash(&hash).await.map_err(Error::Signing)?;
        tracing::debug!(?hash, signer = %signer.address(), "signed maker order");
        Ok(signature)
    }

    /// Recovers the address that signed the maker order.
    pub fn recover_signer(&self, maker: &MakerOrder, signature: &EcdsaSignature) -> Result<Address> {
        signature.recover(&maker.signing_hash(&self.domain_separator))
    }

    /// The EIP-712 domain orders are signed under.
    pub fn typed_data_domain(&self) -> &Domain {
        &self.domain
    }
}
