use {
    crate::DomainSeparator,
    alloy::{
        hex,
        primitives::{self, Address, B256, U256, keccak256, uint},
        signers::{SignerSync, local::PrivateKeySigner},
    },
    anyhow::{Context as _, Result, bail},
    serde::{Deserialize, Serialize, de},
    std::{fmt, str::FromStr},
};

/// Half of the secp256k1 curve order. The exchange rejects signatures whose
/// `s` value lies above it.
pub const SECP256K1_HALF_ORDER: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// An ECDSA signature over the EIP-712 digest of a maker order.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Hash)]
pub struct EcdsaSignature {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

/// Returns the EIP-712 digest `keccak256(0x1901 ‖ domainSeparator ‖ structHash)`.
pub fn hashed_eip712_message(domain_separator: &DomainSeparator, struct_hash: &B256) -> B256 {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain_separator.0);
    message[34..66].copy_from_slice(struct_hash.as_slice());
    keccak256(message)
}

impl EcdsaSignature {
    /// r + s + v
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(self.r.as_slice());
        bytes[32..64].copy_from_slice(self.s.as_slice());
        bytes[64] = self.v;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        EcdsaSignature {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }

    /// Whether `s` lies in the lower half of the curve order.
    pub fn is_s_canonical(&self) -> bool {
        U256::from_be_bytes(self.s.0) <= SECP256K1_HALF_ORDER
    }

    /// Whether `v` is one of the two values `ecrecover` accepts.
    pub fn is_v_standard(&self) -> bool {
        matches!(self.v, 27 | 28)
    }

    /// Recovers the address that produced this signature over `hash`.
    ///
    /// Fails for a `v` outside of `{0, 1, 27, 28}` or when `(r, s)` is not a
    /// valid point on the curve.
    pub fn recover(&self, hash: &B256) -> Result<Address> {
        let parity = match self.v {
            0 | 27 => false,
            1 | 28 => true,
            v => bail!("invalid recovery id {v}"),
        };
        let signature = primitives::Signature::new(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            parity,
        );
        signature
            .recover_address_from_prehash(hash)
            .context("unrecoverable signature")
    }

    /// Signs the raw 32 byte digest with the given key.
    pub fn sign(hash: &B256, key: &PrivateKeySigner) -> Result<Self> {
        let signature = key
            .sign_hash_sync(hash)
            .context("failed to sign digest")?;
        Ok(Self::from(signature))
    }

    /// Returns an arbitrary non-zero signature that can be used for recovery
    /// when you don't actually care about the owner.
    pub fn non_zero() -> Self {
        Self {
            r: B256::repeat_byte(1),
            s: B256::repeat_byte(2),
            v: 27,
        }
    }
}

impl From<primitives::Signature> for EcdsaSignature {
    fn from(signature: primitives::Signature) -> Self {
        Self {
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
            v: 27 + u8::from(signature.v()),
        }
    }
}

impl FromStr for EcdsaSignature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 65];
        hex::decode_to_slice(s, &mut bytes)
            .with_context(|| format!("failed to decode {s:?} as hex ecdsa signature"))?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl fmt::Display for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor {}
        impl de::Visitor<'_> for Visitor {
            type Value = EcdsaSignature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "the 65 ecdsa signature bytes as a hex encoded string, ordered as r, s, v, \
                     where v is either 27 or 28"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if !s.starts_with("0x") {
                    return Err(de::Error::custom(format!(
                        "{s:?} can't be decoded as hex ecdsa signature because it does not start \
                         with '0x'"
                    )));
                }
                EcdsaSignature::from_str(s).map_err(|err| de::Error::custom(format!("{err:#}")))
            }
        }

        deserializer.deserialize_str(Visitor {})
    }
}
