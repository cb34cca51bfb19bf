use {
    crate::swap::{Arithmetic, SwapToRatio, Variant},
    num::BigInt,
    std::fmt::{self, Display, Formatter},
};

/// Functions the oracle can evaluate. The differential tests select one by
/// its name as the first positional argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum Function {
    SwapToRatio,
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwapToRatio => f.write_str("swap_to_ratio"),
        }
    }
}

#[derive(clap::Parser)]
#[clap(about = "Reference oracle for the swap to ratio differential tests")]
pub struct Arguments {
    #[clap(value_enum)]
    pub function: Function,

    /// Pool price, 1e18 fixed point unless `--mid-ratio` is used.
    #[clap(long, allow_negative_numbers = true)]
    pub price: Option<BigInt>,

    /// Target ratio as a 1e18 fixed point number.
    #[clap(long, allow_negative_numbers = true, conflicts_with = "mid_ratio")]
    pub ratio: Option<BigInt>,

    /// Target ratio in plain integer units. Selects the integer formula.
    #[clap(long, allow_negative_numbers = true)]
    pub mid_ratio: Option<BigInt>,

    #[clap(long, allow_negative_numbers = true)]
    pub balance_a: Option<BigInt>,

    #[clap(long, allow_negative_numbers = true)]
    pub balance_b: Option<BigInt>,

    /// How the formula is evaluated. `float` reproduces the IEEE-754 double
    /// evaluation of the legacy oracle including its rounding drift.
    #[clap(long, value_enum, default_value = "exact")]
    pub arithmetic: Arithmetic,

    /// Tracing filter directives. Logs are written to stderr.
    #[clap(long, default_value = "warn")]
    pub log_filter: String,
}

impl Arguments {
    /// Formula inputs together with the formula variant the flags select.
    pub fn swap_to_ratio(&self) -> (SwapToRatio, Variant) {
        let (ratio, variant) = match &self.mid_ratio {
            Some(mid_ratio) => (Some(mid_ratio.clone()), Variant::Integer),
            None => (self.ratio.clone(), Variant::FixedPoint),
        };
        let inputs = SwapToRatio {
            price: self.price.clone(),
            ratio,
            balance_a: self.balance_a.clone(),
            balance_b: self.balance_b.clone(),
        };
        (inputs, variant)
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            function,
            price,
            ratio,
            mid_ratio,
            balance_a,
            balance_b,
            arithmetic,
            log_filter,
        } = self;

        writeln!(f, "function: {function}")?;
        display_option(f, "price", price)?;
        display_option(f, "ratio", ratio)?;
        display_option(f, "mid_ratio", mid_ratio)?;
        display_option(f, "balance_a", balance_a)?;
        display_option(f, "balance_b", balance_b)?;
        writeln!(f, "arithmetic: {arithmetic:?}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        Ok(())
    }
}

fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> fmt::Result {
    match option {
        Some(value) => writeln!(f, "{name}: {value}"),
        None => writeln!(f, "{name}: None"),
    }
}
