//! ABI encoding of the strategy specific `params` carried by maker and taker
//! orders.

use alloy::{
    dyn_abi::{DynSolType, DynSolValue},
    primitives::Bytes,
};

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("strategy expects {expected} params but {actual} were given")]
    Arity { expected: usize, actual: usize },
    #[error("param {index} is not a valid {expected}")]
    Mismatch { index: usize, expected: String },
    #[error("unknown solidity type {ty:?}: {reason}")]
    UnknownType { ty: String, reason: String },
    #[error("params cannot be decoded: {0}")]
    Decode(String),
}

/// ABI encodes the values as a sequence of function parameters. No values
/// encode to empty bytes.
pub fn encode(values: &[DynSolValue]) -> Bytes {
    if values.is_empty() {
        return Bytes::new();
    }
    DynSolValue::Tuple(values.to_vec()).abi_encode_params().into()
}

/// Like [`encode`] but checks the values against the parameter types a
/// strategy declares.
pub fn encode_typed(types: &[DynSolType], values: &[DynSolValue]) -> Result<Bytes, ParamsError> {
    if types.len() != values.len() {
        return Err(ParamsError::Arity {
            expected: types.len(),
            actual: values.len(),
        });
    }
    if let Some((index, ty)) = types
        .iter()
        .zip(values)
        .enumerate()
        .find_map(|(index, (ty, value))| (!ty.matches(value)).then_some((index, ty)))
    {
        return Err(ParamsError::Mismatch {
            index,
            expected: ty.to_string(),
        });
    }
    Ok(encode(values))
}

/// Decodes params previously produced by [`encode_typed`].
pub fn decode(types: &[DynSolType], data: &[u8]) -> Result<Vec<DynSolValue>, ParamsError> {
    if types.is_empty() {
        return match data.is_empty() {
            true => Ok(Vec::new()),
            false => Err(ParamsError::Decode(format!(
                "{} unexpected bytes",
                data.len()
            ))),
        };
    }
    match DynSolType::Tuple(types.to_vec())
        .abi_decode_params(data)
        .map_err(|err| ParamsError::Decode(err.to_string()))?
    {
        DynSolValue::Tuple(values) => Ok(values),
        value => Ok(vec![value]),
    }
}

/// Parses solidity type names such as `"address"` or `"uint256"`.
pub fn parse_types<T: AsRef<str>>(types: &[T]) -> Result<Vec<DynSolType>, ParamsError> {
    types
        .iter()
        .map(|ty| {
            DynSolType::parse(ty.as_ref()).map_err(|err| ParamsError::UnknownType {
                ty: ty.as_ref().to_string(),
                reason: err.to_string(),
            })
        })
        .collect()
}
