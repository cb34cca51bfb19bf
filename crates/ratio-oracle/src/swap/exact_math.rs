//! Swap to ratio evaluated on rationals. Every intermediate value is kept
//! exact and the result is truncated toward zero exactly once, so the output
//! does not depend on the platform's floating point behaviour.

use {
    super::{Direction, Error, ONE_18},
    num::{BigInt, Zero},
};

/// `|a - r * b| / (1 + r / p)` rescaled to 1e18, where `a`, `b`, `r` and `p`
/// are the 1e18 fixed point inputs.
///
/// Expanding the fixed point scaling gives
/// `|A * 1e18 - R * B| * P / (1e18 * (P + R))`.
pub fn fixed_point_delta_a(
    price: &BigInt,
    ratio: &BigInt,
    balance_a: &BigInt,
    balance_b: &BigInt,
) -> Result<(BigInt, Direction), Error> {
    // Both sides carry a 1e36 scale.
    let a = balance_a * &*ONE_18;
    let rb = ratio * balance_b;
    let (imbalance, direction) = if a > rb {
        (a - rb, Direction::SellA)
    } else {
        (rb - a, Direction::BuyA)
    };

    let divisor = (price + ratio) * &*ONE_18;
    if divisor.is_zero() {
        return Err(Error::ZeroDivisor);
    }
    // `BigInt` division truncates toward zero.
    Ok((imbalance * price / divisor, direction))
}

/// `(excess_a / (1 + m / p), excess_a / (1 + m / p) / p)` where
/// `excess_a = balance_a - m * balance_b`, on plain integers.
pub fn integer_deltas(
    price: &BigInt,
    mid_ratio: &BigInt,
    excess_a: &BigInt,
) -> Result<(BigInt, BigInt), Error> {
    let divisor = price + mid_ratio;
    if divisor.is_zero() {
        return Err(Error::ZeroDivisor);
    }
    let delta_a = excess_a * price / &divisor;
    let delta_b = excess_a / &divisor;
    Ok((delta_a, delta_b))
}
