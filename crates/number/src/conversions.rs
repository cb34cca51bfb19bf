//! Conversions between arbitrary precision integers and the fixed width
//! types used on chain.

use {
    anyhow::{Result, ensure},
    num::{
        BigInt,
        BigRational,
        BigUint,
        ToPrimitive,
        bigint::Sign,
    },
    primitive_types::U256,
};

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_big_endian(&bytes))
}

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    let mut bytes = [0; 32];
    input.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

/// Converts an integer to the nearest `f64` (ties to even). Fails when the
/// value is outside of the finite `f64` range.
pub fn big_int_to_f64(input: &BigInt) -> Result<f64> {
    let value = input.to_f64().unwrap_or(f64::NAN);
    ensure!(value.is_finite(), "{input} does not fit into an f64");
    Ok(value)
}

/// Converts the exact quotient `numer / denom` to the nearest `f64`. Unlike
/// converting both operands first and dividing afterwards this rounds only
/// once, which is how true division of two integers behaves in most
/// scripting languages.
pub fn big_ratio_to_f64(numer: &BigInt, denom: &BigInt) -> Result<f64> {
    ensure!(denom.sign() != Sign::NoSign, "division by zero");
    let value = BigRational::new(numer.clone(), denom.clone())
        .to_f64()
        .unwrap_or(f64::NAN);
    ensure!(value.is_finite(), "{numer} / {denom} does not fit into an f64");
    Ok(value)
}
