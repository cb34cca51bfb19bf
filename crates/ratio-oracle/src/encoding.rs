//! ABI encoding of the oracle output. The calling test harness decodes the
//! printed line as `(uint256, uint256)`.

use {
    crate::swap::Deltas,
    anyhow::{Context, Result, bail, ensure},
    ethabi::{ParamType, Token},
    num::{BigInt, Signed},
    number::conversions::big_int_to_u256,
    primitive_types::U256,
};

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("{name} = {value} is negative and cannot be encoded as uint256")]
    Negative { name: &'static str, value: BigInt },
    #[error("{name} = {value} does not fit into uint256")]
    Overflow { name: &'static str, value: BigInt },
}

/// Encodes `(delta_a, delta_b)` as two `uint256` words and returns them as a
/// `0x` prefixed lowercase hex string.
pub fn encode(deltas: &Deltas) -> Result<String, EncodingError> {
    let tokens = [
        Token::Uint(to_uint256("delta_a", &deltas.delta_a)?),
        Token::Uint(to_uint256("delta_b", &deltas.delta_b)?),
    ];
    Ok(format!("0x{}", const_hex::encode(ethabi::encode(&tokens))))
}

/// Inverse of [`encode`].
pub fn decode(encoded: &str) -> Result<(U256, U256)> {
    let hex = encoded.strip_prefix("0x").context("missing 0x prefix")?;
    let bytes = const_hex::decode(hex).context("invalid hex")?;
    ensure!(bytes.len() == 64, "expected 64 bytes but got {}", bytes.len());
    let tokens = ethabi::decode(&[ParamType::Uint(256), ParamType::Uint(256)], &bytes)?;
    match tokens.as_slice() {
        [Token::Uint(delta_a), Token::Uint(delta_b)] => Ok((*delta_a, *delta_b)),
        tokens => bail!("unexpected tokens {tokens:?}"),
    }
}

fn to_uint256(name: &'static str, value: &BigInt) -> Result<U256, EncodingError> {
    if value.is_negative() {
        return Err(EncodingError::Negative {
            name,
            value: value.clone(),
        });
    }
    big_int_to_u256(value).map_err(|_| EncodingError::Overflow {
        name,
        value: value.clone(),
    })
}
