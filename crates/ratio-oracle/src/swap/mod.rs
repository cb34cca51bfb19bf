//! Closed form "swap to ratio" computation: given two pool balances, a price
//! and a target ratio, the token amounts that need to be swapped for the pool
//! to end up at the target ratio.
//!
//! Two formulas exist. The fixed point one works on 1e18 scaled inputs and
//! only produces a magnitude for token A. The integer one works on unscaled
//! inputs, keeps the sign of the imbalance and also derives the token B leg.

use {
    num::{BigInt, Signed, Zero},
    std::sync::LazyLock,
};

mod error;
mod exact_math;
mod float_math;

pub use error::Error;

/// 1e18, the scale of the fixed point inputs and outputs.
pub static ONE_18: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(10).pow(18));

/// Numeric domain the formula is evaluated in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Arithmetic {
    /// Rational arithmetic on big integers, truncated toward zero once at the
    /// very end.
    #[default]
    Exact,
    /// IEEE-754 doubles, truncated toward zero after rescaling by 1e18.
    Float,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    FixedPoint,
    Integer,
}

/// Which way token A has to flow for the pool to reach the target ratio.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// The pool holds more A than the target ratio allows.
    SellA,
    /// The pool holds less A than the target ratio requires (or exactly the
    /// right amount).
    BuyA,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deltas {
    pub delta_a: BigInt,
    pub delta_b: BigInt,
    pub direction: Direction,
}

impl Deltas {
    pub fn zero() -> Self {
        Self {
            delta_a: BigInt::zero(),
            delta_b: BigInt::zero(),
            direction: Direction::BuyA,
        }
    }
}

/// Inputs of the swap to ratio formula. Unset values are treated as zero by
/// the fixed point formula and short circuit the integer formula.
#[derive(Clone, Debug, Default)]
pub struct SwapToRatio {
    pub price: Option<BigInt>,
    pub ratio: Option<BigInt>,
    pub balance_a: Option<BigInt>,
    pub balance_b: Option<BigInt>,
}

impl SwapToRatio {
    pub fn compute(&self, variant: Variant, arithmetic: Arithmetic) -> Result<Deltas, Error> {
        let deltas = match variant {
            Variant::FixedPoint => self.fixed_point(arithmetic)?,
            Variant::Integer => self.integer(arithmetic)?,
        };
        tracing::debug!(
            ?variant,
            ?arithmetic,
            direction = ?deltas.direction,
            delta_a = %deltas.delta_a,
            delta_b = %deltas.delta_b,
            "computed swap to ratio"
        );
        Ok(deltas)
    }

    fn fixed_point(&self, arithmetic: Arithmetic) -> Result<Deltas, Error> {
        let zero = BigInt::zero();
        let price = self.price.as_ref().unwrap_or(&zero);
        let ratio = self.ratio.as_ref().unwrap_or(&zero);
        if price.is_zero() || ratio.is_zero() {
            tracing::debug!("price or ratio is zero, nothing to swap");
            return Ok(Deltas::zero());
        }
        let balance_a = self.balance_a.as_ref().unwrap_or(&zero);
        let balance_b = self.balance_b.as_ref().unwrap_or(&zero);

        let (delta_a, direction) = match arithmetic {
            Arithmetic::Exact => {
                exact_math::fixed_point_delta_a(price, ratio, balance_a, balance_b)?
            }
            Arithmetic::Float => {
                float_math::fixed_point_delta_a(price, ratio, balance_a, balance_b)?
            }
        };
        // Only the token A leg is defined for this formula.
        Ok(Deltas {
            delta_a,
            delta_b: BigInt::zero(),
            direction,
        })
    }

    fn integer(&self, arithmetic: Arithmetic) -> Result<Deltas, Error> {
        let (Some(price), Some(mid_ratio), Some(balance_a), Some(balance_b)) = (
            &self.price,
            &self.ratio,
            &self.balance_a,
            &self.balance_b,
        ) else {
            tracing::debug!("not all inputs are set, nothing to swap");
            return Ok(Deltas::zero());
        };
        if price.is_zero() {
            tracing::debug!("price is zero, nothing to swap");
            return Ok(Deltas::zero());
        }

        let excess_a = balance_a - mid_ratio * balance_b;
        let direction = if excess_a.is_positive() {
            Direction::SellA
        } else {
            Direction::BuyA
        };
        let (delta_a, delta_b) = match arithmetic {
            Arithmetic::Exact => exact_math::integer_deltas(price, mid_ratio, &excess_a)?,
            Arithmetic::Float => float_math::integer_deltas(price, mid_ratio, &excess_a)?,
        };
        Ok(Deltas {
            delta_a,
            delta_b,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e18(units: i64) -> Option<BigInt> {
        Some(BigInt::from(units) * &*ONE_18)
    }

    fn fixed_point(
        price: Option<BigInt>,
        ratio: Option<BigInt>,
        balance_a: Option<BigInt>,
        balance_b: Option<BigInt>,
    ) -> SwapToRatio {
        SwapToRatio {
            price,
            ratio,
            balance_a,
            balance_b,
        }
    }

    #[test]
    fn surplus_of_a_is_sold() {
        let inputs = fixed_point(e18(2), e18(1), e18(10), e18(0));
        let deltas = inputs
            .compute(Variant::FixedPoint, Arithmetic::Exact)
            .unwrap();
        assert_eq!(deltas.delta_a, BigInt::from(6_666_666_666_666_666_666_u64));
        assert_eq!(deltas.delta_b, BigInt::zero());
        assert_eq!(deltas.direction, Direction::SellA);
    }

    #[test]
    fn legacy_float_evaluation_drifts() {
        let inputs = fixed_point(e18(2), e18(1), e18(10), e18(0));
        let deltas = inputs
            .compute(Variant::FixedPoint, Arithmetic::Float)
            .unwrap();
        assert_eq!(deltas.delta_a, BigInt::from(6_666_666_666_666_667_008_u64));
        assert_eq!(deltas.delta_b, BigInt::zero());
    }

    #[test]
    fn degenerate_inputs_swap_nothing() {
        for arithmetic in [Arithmetic::Exact, Arithmetic::Float] {
            for inputs in [
                fixed_point(e18(2), e18(0), e18(10), e18(3)),
                fixed_point(e18(0), e18(1), e18(10), e18(3)),
                fixed_point(None, e18(1), e18(10), e18(3)),
                fixed_point(e18(2), None, e18(10), e18(3)),
                SwapToRatio::default(),
            ] {
                assert_eq!(
                    inputs.compute(Variant::FixedPoint, arithmetic).unwrap(),
                    Deltas::zero()
                );
            }
        }
    }

    #[test]
    fn pool_at_target_ratio_swaps_nothing() {
        for (price, ratio, balance_a, balance_b) in [(2, 1, 5, 5), (3, 2, 8, 4), (1, 4, 0, 0)] {
            let inputs = fixed_point(e18(price), e18(ratio), e18(balance_a), e18(balance_b));
            for arithmetic in [Arithmetic::Exact, Arithmetic::Float] {
                let deltas = inputs.compute(Variant::FixedPoint, arithmetic).unwrap();
                assert_eq!(deltas.delta_a, BigInt::zero());
                assert_eq!(deltas.direction, Direction::BuyA);
            }
        }
    }

    #[test]
    fn mirrored_imbalance_has_same_magnitude() {
        // a = 10, rb = 4 and a = 4, rb = 10 at r = 1, p = 2.
        let surplus = fixed_point(e18(2), e18(1), e18(10), e18(4))
            .compute(Variant::FixedPoint, Arithmetic::Exact)
            .unwrap();
        let deficit = fixed_point(e18(2), e18(1), e18(4), e18(10))
            .compute(Variant::FixedPoint, Arithmetic::Exact)
            .unwrap();

        assert_eq!(surplus.delta_a, BigInt::from(4) * &*ONE_18);
        assert_eq!(surplus.delta_a, deficit.delta_a);
        assert_eq!(surplus.direction, Direction::SellA);
        assert_eq!(deficit.direction, Direction::BuyA);
    }

    #[test]
    fn fixed_point_delta_is_never_negative() {
        for (price, ratio, balance_a, balance_b) in [
            (1, 1, 0, 100),
            (7, 3, 100, 0),
            (1_000, 1, 1, 1),
            (1, 1_000, 1, 1),
            (13, 17, 19, 23),
        ] {
            let deltas = fixed_point(e18(price), e18(ratio), e18(balance_a), e18(balance_b))
                .compute(Variant::FixedPoint, Arithmetic::Exact)
                .unwrap();
            assert!(!deltas.delta_a.is_negative());
        }
    }

    #[test]
    fn fixed_point_rejects_vanishing_divisor() {
        // 1 + r / p == 1 + (-2 / 2) == 0
        let inputs = fixed_point(e18(2), e18(-2), e18(1), e18(1));
        for arithmetic in [Arithmetic::Exact, Arithmetic::Float] {
            assert!(matches!(
                inputs.compute(Variant::FixedPoint, arithmetic),
                Err(Error::ZeroDivisor)
            ));
        }
    }

    #[test]
    fn integer_variant() {
        // (10 - 1 * 2) / (1 + 1 / 2) = 5.33.., 5.33.. / 2 = 2.66..
        let inputs = SwapToRatio {
            price: Some(2.into()),
            ratio: Some(1.into()),
            balance_a: Some(10.into()),
            balance_b: Some(2.into()),
        };
        for arithmetic in [Arithmetic::Exact, Arithmetic::Float] {
            let deltas = inputs.compute(Variant::Integer, arithmetic).unwrap();
            assert_eq!(deltas.delta_a, BigInt::from(5));
            assert_eq!(deltas.delta_b, BigInt::from(2));
            assert_eq!(deltas.direction, Direction::SellA);
        }
    }

    #[test]
    fn integer_variant_keeps_sign() {
        // (1 - 1 * 5) / (1 + 1 / 1) = -2
        let inputs = SwapToRatio {
            price: Some(1.into()),
            ratio: Some(1.into()),
            balance_a: Some(1.into()),
            balance_b: Some(5.into()),
        };
        let deltas = inputs.compute(Variant::Integer, Arithmetic::Exact).unwrap();
        assert_eq!(deltas.delta_a, BigInt::from(-2));
        assert_eq!(deltas.delta_b, BigInt::from(-2));
        assert_eq!(deltas.direction, Direction::BuyA);
    }

    #[test]
    fn integer_variant_needs_every_input() {
        let complete = SwapToRatio {
            price: Some(2.into()),
            ratio: Some(1.into()),
            balance_a: Some(10.into()),
            balance_b: Some(2.into()),
        };
        for inputs in [
            SwapToRatio {
                price: None,
                ..complete.clone()
            },
            SwapToRatio {
                ratio: None,
                ..complete.clone()
            },
            SwapToRatio {
                balance_a: None,
                ..complete.clone()
            },
            SwapToRatio {
                balance_b: None,
                ..complete.clone()
            },
            SwapToRatio {
                price: Some(0.into()),
                ..complete.clone()
            },
        ] {
            assert_eq!(
                inputs.compute(Variant::Integer, Arithmetic::Exact).unwrap(),
                Deltas::zero()
            );
        }
    }

    #[test]
    fn integer_variant_with_zero_mid_ratio() {
        // d = 1, so the whole balance of A is swapped.
        let inputs = SwapToRatio {
            price: Some(4.into()),
            ratio: Some(0.into()),
            balance_a: Some(9.into()),
            balance_b: Some(100.into()),
        };
        let deltas = inputs.compute(Variant::Integer, Arithmetic::Exact).unwrap();
        assert_eq!(deltas.delta_a, BigInt::from(9));
        assert_eq!(deltas.delta_b, BigInt::from(2));
    }
}
