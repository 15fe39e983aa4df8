use anyhow::{bail, Result};
use chem_formula::{parse_with, ParserConfig, DEFAULT_MAX_DEPTH};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const SAMPLE_FORMULAS: [&str; 3] = ["H2O", "Cu(OH)2", "C2H5OH"];

#[derive(Parser, Debug)]
#[command(name = "chem-formula", version, about = "Count the elements of chemical formulas")]
struct Args {
    /// Formulas to parse; a few samples are used when none are given
    formulas: Vec<String>,

    /// Deepest parenthesis nesting to accept
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Trace segmentation to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "warn,chem_formula=trace"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ParserConfig::new().with_max_depth(args.max_depth);
    let formulas: Vec<&str> = if args.formulas.is_empty() {
        SAMPLE_FORMULAS.to_vec()
    } else {
        args.formulas.iter().map(String::as_str).collect()
    };

    let mut failed = 0;
    for formula in formulas {
        match parse_with(formula, &config) {
            Ok(result) => println!("{} => {}", formula, result),
            Err(e) => {
                println!("{} => error: {}", formula, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} formula(s) could not be parsed", failed);
    }
    Ok(())
}
