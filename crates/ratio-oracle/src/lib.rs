pub mod arguments;
pub mod encoding;
pub mod swap;

use {
    anyhow::{Context, Result},
    arguments::{Arguments, Function},
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::EnvFilter,
};

/// Parses the command line, evaluates the requested function and prints the
/// encoded result as a single line on stdout. Exits with a non-zero status on
/// any failure.
pub fn start(args: impl IntoIterator<Item = String>) {
    let args = Arguments::parse_from(args);
    initialize_tracing(&args.log_filter);
    tracing::debug!("running ratio oracle with validated arguments:\n{}", args);

    match run(&args) {
        Ok(encoded) => println!("{encoded}"),
        Err(err) => {
            tracing::error!("ratio oracle failed: {:?}", err);
            std::process::exit(1);
        }
    }
}

/// Evaluates the function selected by `args` and returns the line the oracle
/// prints.
pub fn run(args: &Arguments) -> Result<String> {
    match args.function {
        Function::SwapToRatio => {
            let (inputs, variant) = args.swap_to_ratio();
            let deltas = inputs
                .compute(variant, args.arithmetic)
                .context("computing swap to ratio")?;
            let encoded = encoding::encode(&deltas).context("encoding swap to ratio deltas")?;
            Ok(encoded)
        }
    }
}

fn initialize_tracing(filter: &str) {
    // stdout carries the oracle output only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
