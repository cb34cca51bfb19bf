//! Swap to ratio evaluated on IEEE-754 doubles, the way the legacy oracle
//! scripts did it: integers are rounded to the nearest double when they meet
//! a float, integer by integer division is rounded once, and the result is
//! truncated toward zero after rescaling.
//!
//! The absolute error of the rescaled result is in the order of
//! `delta * 2^-52`, i.e. a few hundred wei for deltas around 1e20.

use {
    super::{Direction, Error},
    num::{BigInt, FromPrimitive},
    number::conversions::{big_int_to_f64, big_ratio_to_f64},
};

const ONE_18: f64 = 1e18;

pub fn fixed_point_delta_a(
    price: &BigInt,
    ratio: &BigInt,
    balance_a: &BigInt,
    balance_b: &BigInt,
) -> Result<(BigInt, Direction), Error> {
    let a = to_f64(balance_a)? / ONE_18;
    let b = to_f64(balance_b)? / ONE_18;
    let r = to_f64(ratio)? / ONE_18;
    let p = to_f64(price)? / ONE_18;

    let rb = r * b;
    let d = 1.0 + r / p;
    if d == 0.0 {
        return Err(Error::ZeroDivisor);
    }
    let (delta_a, direction) = if a > rb {
        ((a - rb) / d, Direction::SellA)
    } else {
        ((rb - a) / d, Direction::BuyA)
    };
    Ok((truncate(delta_a * ONE_18)?, direction))
}

pub fn integer_deltas(
    price: &BigInt,
    mid_ratio: &BigInt,
    excess_a: &BigInt,
) -> Result<(BigInt, BigInt), Error> {
    let d = 1.0
        + big_ratio_to_f64(mid_ratio, price)
            .map_err(|err| Error::NonFinite(err.to_string()))?;
    if d == 0.0 {
        return Err(Error::ZeroDivisor);
    }
    let delta_a = to_f64(excess_a)? / d;
    let delta_b = delta_a / to_f64(price)?;
    Ok((truncate(delta_a)?, truncate(delta_b)?))
}

fn to_f64(value: &BigInt) -> Result<f64, Error> {
    big_int_to_f64(value).map_err(|err| Error::NonFinite(err.to_string()))
}

fn truncate(value: f64) -> Result<BigInt, Error> {
    if !value.is_finite() {
        return Err(Error::NonFinite(value.to_string()));
    }
    BigInt::from_f64(value.trunc()).ok_or_else(|| Error::NonFinite(value.to_string()))
}
